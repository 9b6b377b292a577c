// ABOUTME: Core library for blogstore, containing the blog post record and its validation rules.
// ABOUTME: This crate defines the shared data model used by the store and the HTTP server.

pub mod model;
pub mod validation;

pub use model::{BlogPost, MAX_POST_ID, PostId};
pub use validation::ValidationError;
