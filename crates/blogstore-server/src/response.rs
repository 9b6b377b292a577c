// ABOUTME: The JSON envelope every API reply is wrapped in.
// ABOUTME: {success, message?, data?, error?} with absent fields left out of the body.

use serde::Serialize;

/// Uniform response body for the blog API.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_error() {
        let json = serde_json::to_value(ApiResponse::ok("done", 5)).unwrap();

        assert_eq!(json, serde_json::json!({ "success": true, "message": "done", "data": 5 }));
    }

    #[test]
    fn failure_omits_message_and_data() {
        let json = serde_json::to_value(ApiResponse::failure("Blog not found")).unwrap();

        assert_eq!(json, serde_json::json!({ "success": false, "error": "Blog not found" }));
    }
}
