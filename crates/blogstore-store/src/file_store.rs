// ABOUTME: File-backed post store: one pretty-printed <id>.json file per post under a root directory.
// ABOUTME: Writes go through a temp file + fsync + rename so readers never observe a partial post.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use blogstore_core::{BlogPost, PostId};
use chrono::Utc;

use crate::error::StoreError;

/// Persistence contract for posts keyed by id. Implementations own the
/// storage medium; callers only ever hold copies.
pub trait PostStore: Send + Sync {
    /// Persist a post, overwriting any prior version with the same id.
    ///
    /// Sets `updated_at` to now. `created_at` is kept when the caller supplies
    /// it, otherwise taken from the stored version, otherwise set to now.
    fn put(&self, post: BlogPost) -> Result<BlogPost, StoreError>;

    /// Load the post last persisted under `id`.
    fn get(&self, id: PostId) -> Result<BlogPost, StoreError>;

    /// Ids of every stored post, in no particular order.
    fn ids(&self) -> Result<Vec<PostId>, StoreError>;

    /// Load a post and persist it again with its view count bumped by one.
    fn record_view(&self, id: PostId) -> Result<ViewOutcome, StoreError>;

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.ids()?.len())
    }

    fn max_id(&self) -> Result<Option<PostId>, StoreError> {
        Ok(self.ids()?.into_iter().max())
    }
}

/// Result of a retrieval that counted a view.
#[derive(Debug, Clone)]
pub struct ViewOutcome {
    /// The post with its incremented view count.
    pub post: BlogPost,
    /// False when the incremented count could not be written back.
    pub persisted: bool,
}

/// Stores posts as `<root>/<id>.json`.
pub struct FileStore {
    root: PathBuf,
    /// Per-post locks serializing read-modify-write sequences on one id.
    /// An entry lives only while some caller holds or waits on it.
    locks: Mutex<HashMap<PostId, Arc<Mutex<()>>>>,
    /// Temp file sequence, so concurrent writers of one id never share a temp path.
    tmp_seq: AtomicU64,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if it does not exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!("opened post store at {}", root.display());
        Ok(Self {
            root,
            locks: Mutex::new(HashMap::new()),
            tmp_seq: AtomicU64::new(0),
        })
    }

    /// Return the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding post `id` (does not check that it exists).
    pub fn path_for(&self, id: PostId) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Run `f` while holding the lock for `id`, then drop the lock entry if
    /// no other caller picked it up in the meantime.
    fn with_lock<T>(&self, id: PostId, f: impl FnOnce() -> T) -> T {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(id).or_default())
        };

        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };

        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // One reference in the map, one here: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&id);
        }
        result
    }

    #[cfg(test)]
    fn lock_entries(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn tmp_path_for(&self, id: PostId, seq: u64) -> PathBuf {
        self.root
            .join(format!("{}.json.{}.{}.tmp", id, std::process::id(), seq))
    }

    fn read(&self, id: PostId) -> Result<BlogPost, StoreError> {
        let contents = match fs::read_to_string(self.path_for(id)) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(id)),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Stamp timestamps and write. Caller must hold the lock for `post.id`.
    fn write(&self, mut post: BlogPost) -> Result<BlogPost, StoreError> {
        let now = Utc::now();

        if post.created_at.is_none() {
            post.created_at = match self.read(post.id) {
                Ok(prior) => prior.created_at,
                Err(StoreError::NotFound(_)) => None,
                Err(e) => {
                    tracing::warn!("stored post {} is unreadable, overwriting: {}", post.id, e);
                    None
                }
            };
        }
        let created_at = *post.created_at.get_or_insert(now);
        post.updated_at = Some(now.max(created_at));

        let json = serde_json::to_string_pretty(&post)?;

        let final_path = self.path_for(post.id);
        let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self.tmp_path_for(post.id, seq);

        let result = write_and_rename(&tmp_path, &final_path, json.as_bytes());
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result?;

        // Best-effort: the rename already happened, so a failed directory
        // fsync leaves the post readable.
        if let Ok(dir) = File::open(&self.root) {
            let _ = dir.sync_all();
        }

        tracing::debug!("persisted post {}", post.id);
        Ok(post)
    }
}

fn write_and_rename(tmp_path: &Path, final_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, final_path)
}

impl PostStore for FileStore {
    fn put(&self, post: BlogPost) -> Result<BlogPost, StoreError> {
        self.with_lock(post.id, || self.write(post))
    }

    fn get(&self, id: PostId) -> Result<BlogPost, StoreError> {
        self.read(id)
    }

    fn ids(&self) -> Result<Vec<PostId>, StoreError> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            // Match pattern: <id>.json, written the way path_for writes it
            if let Some(stem) = name_str.strip_suffix(".json")
                && !stem.is_empty()
                && stem.bytes().all(|b| b.is_ascii_digit())
                && (stem == "0" || !stem.starts_with('0'))
                && let Ok(id) = stem.parse::<PostId>()
            {
                ids.push(id);
            }
        }

        Ok(ids)
    }

    fn record_view(&self, id: PostId) -> Result<ViewOutcome, StoreError> {
        self.with_lock(id, || {
            let mut post = self.read(id)?;
            post.view_count = post.view_count.saturating_add(1);

            match self.write(post.clone()) {
                Ok(saved) => Ok(ViewOutcome {
                    post: saved,
                    persisted: true,
                }),
                Err(e) => {
                    tracing::warn!("failed to update view count for post {}: {}", id, e);
                    Ok(ViewOutcome {
                        post,
                        persisted: false,
                    })
                }
            }
        })
    }
}
