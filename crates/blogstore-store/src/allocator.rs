// ABOUTME: Assigns identifiers for newly created posts from the store's current contents.
// ABOUTME: Reserves each id under a lock so concurrent creates in one process never share an id.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use blogstore_core::{MAX_POST_ID, PostId};

use crate::error::StoreError;
use crate::file_store::PostStore;

/// Hands out ids for create requests.
///
/// The candidate is `count + 1`, raised past the highest stored id and past
/// every id this allocator already handed out. If the store cannot be
/// enumerated, the current Unix time in seconds is used instead. The
/// high-water mark lives in memory only, so separate processes sharing one
/// storage directory can still collide.
///
/// Ids never exceed [`MAX_POST_ID`]; once the next id would pass it,
/// allocation fails rather than handing out a stored id again.
#[derive(Debug, Default)]
pub struct IdAllocator {
    high_water: Mutex<PostId>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return a fresh id.
    pub fn allocate<S: PostStore + ?Sized>(&self, store: &S) -> Result<PostId, StoreError> {
        let mut high_water = self.high_water.lock().unwrap_or_else(|e| e.into_inner());

        let candidate = match store.ids() {
            Ok(ids) => {
                let by_count = ids.len() as PostId + 1;
                let past_max = match ids.iter().max() {
                    Some(m) => m
                        .checked_add(1)
                        .ok_or(StoreError::IdsExhausted { max: MAX_POST_ID })?,
                    None => 0,
                };
                by_count.max(past_max)
            }
            Err(e) => {
                tracing::error!("failed to enumerate stored posts: {}", e);
                let fallback = unix_seconds();
                tracing::warn!("falling back to time-derived post id {}", fallback);
                fallback
            }
        };

        let next = high_water
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { max: MAX_POST_ID })?;
        let id = candidate.max(next);
        if id > MAX_POST_ID {
            return Err(StoreError::IdsExhausted { max: MAX_POST_ID });
        }
        *high_water = id;
        Ok(id)
    }
}

fn unix_seconds() -> PostId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::file_store::{FileStore, ViewOutcome};
    use blogstore_core::BlogPost;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// A store whose directory can never be listed.
    struct UnlistableStore;

    impl PostStore for UnlistableStore {
        fn put(&self, post: BlogPost) -> Result<BlogPost, StoreError> {
            Ok(post)
        }

        fn get(&self, id: PostId) -> Result<BlogPost, StoreError> {
            Err(StoreError::NotFound(id))
        }

        fn ids(&self) -> Result<Vec<PostId>, StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }

        fn record_view(&self, id: PostId) -> Result<ViewOutcome, StoreError> {
            Err(StoreError::NotFound(id))
        }
    }

    fn store_with(ids: &[PostId]) -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        for id in ids {
            store
                .put(BlogPost::new(format!("post {}", id), "body".to_string()).with_id(*id))
                .unwrap();
        }
        (dir, store)
    }

    #[test]
    fn empty_store_allocates_one() {
        let (_dir, store) = store_with(&[]);
        assert_eq!(IdAllocator::new().allocate(&store).unwrap(), 1);
    }

    #[test]
    fn allocates_count_plus_one() {
        let (_dir, store) = store_with(&[1, 2]);
        assert_eq!(IdAllocator::new().allocate(&store).unwrap(), 3);
    }

    #[test]
    fn back_to_back_creates_get_distinct_ids() {
        let (_dir, store) = store_with(&[1, 2]);
        let allocator = IdAllocator::new();

        // No persist between the two allocations
        let a = allocator.allocate(&store).unwrap();
        let b = allocator.allocate(&store).unwrap();

        assert_eq!(a, 3);
        assert_eq!(b, 4);
    }

    #[test]
    fn skips_past_highest_stored_id() {
        // count + 1 would be 3, which is already taken
        let (_dir, store) = store_with(&[1, 3]);
        assert_eq!(IdAllocator::new().allocate(&store).unwrap(), 4);
    }

    #[test]
    fn allocation_after_persist_continues() {
        let (_dir, store) = store_with(&[]);
        let allocator = IdAllocator::new();

        let first = allocator.allocate(&store).unwrap();
        store
            .put(BlogPost::new("t".to_string(), "c".to_string()).with_id(first))
            .unwrap();
        let second = allocator.allocate(&store).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn stored_id_at_u64_max_exhausts_instead_of_reusing() {
        let (_dir, store) = store_with(&[1, PostId::MAX]);
        let allocator = IdAllocator::new();

        let err = allocator.allocate(&store).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { .. }));
        // Still refuses on the next attempt, never returning the stored id
        assert!(allocator.allocate(&store).is_err());
    }

    #[test]
    fn refuses_ids_past_the_signed_range() {
        let (_dir, store) = store_with(&[MAX_POST_ID - 1]);
        let allocator = IdAllocator::new();

        assert_eq!(allocator.allocate(&store).unwrap(), MAX_POST_ID);
        assert!(matches!(
            allocator.allocate(&store),
            Err(StoreError::IdsExhausted { max }) if max == MAX_POST_ID
        ));
    }

    #[test]
    fn falls_back_to_unix_time() {
        let before = unix_seconds();
        let id = IdAllocator::new().allocate(&UnlistableStore).unwrap();
        let after = unix_seconds();

        assert!(id >= before && id <= after, "id {} not in [{}, {}]", id, before, after);
    }

    #[test]
    fn fallback_ids_stay_distinct() {
        let allocator = IdAllocator::new();

        let a = allocator.allocate(&UnlistableStore).unwrap();
        let b = allocator.allocate(&UnlistableStore).unwrap();

        assert!(b > a);
    }

    #[test]
    fn concurrent_allocations_are_unique() {
        let (_dir, store) = store_with(&[1, 2]);
        let store = Arc::new(store);
        let allocator = Arc::new(IdAllocator::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let allocator = Arc::clone(&allocator);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| allocator.allocate(&*store).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(id >= 3);
                assert!(seen.insert(id), "id {} handed out twice", id);
            }
        }
        assert_eq!(seen.len(), 200);
    }
}
