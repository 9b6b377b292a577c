// ABOUTME: Defines the BlogPost struct, the single record type persisted by blogstore.
// ABOUTME: Optional fields (tags, view_count) are omitted from JSON when at their zero value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identifier of a stored post.
pub type PostId = u64;

/// Largest id the API accepts or allocates (the range of a signed 64-bit integer).
pub const MAX_POST_ID: PostId = i64::MAX as PostId;

/// A blog post as accepted over the API and persisted on disk.
///
/// Timestamps are `None` until the store saves the post for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default)]
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub view_count: u64,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

impl BlogPost {
    /// Create an unsaved post with the required fields. The id is 0 and every
    /// optional field is at its default.
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: 0,
            title,
            author_id: 0,
            content,
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
            is_published: false,
            view_count: 0,
        }
    }

    /// Builder-style setter for the identifier.
    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }
}
