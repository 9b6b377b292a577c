// ABOUTME: Input validation for blog posts submitted by API callers.
// ABOUTME: Rejects records missing a title or content before they reach the store.

use thiserror::Error;

use crate::model::BlogPost;

/// Errors raised when a submitted post is missing required input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Content is required")]
    MissingContent,
}

impl BlogPost {
    /// Check the required fields. Title is checked before content, so a post
    /// missing both reports `MissingTitle`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.content.is_empty() {
            return Err(ValidationError::MissingContent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_post_passes() {
        let post = BlogPost::new("Hello".to_string(), "World".to_string());
        assert!(post.validate().is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let post = BlogPost::new(String::new(), "body".to_string());
        assert_eq!(post.validate(), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn empty_content_rejected() {
        let post = BlogPost::new("title".to_string(), String::new());
        assert_eq!(post.validate(), Err(ValidationError::MissingContent));
    }

    #[test]
    fn whitespace_only_fields_accepted() {
        let post = BlogPost::new("   ".to_string(), " \n".to_string());
        assert!(post.validate().is_ok());
    }

    #[test]
    fn title_checked_before_content() {
        let post = BlogPost::new(String::new(), String::new());
        let err = post.validate().unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }
}
