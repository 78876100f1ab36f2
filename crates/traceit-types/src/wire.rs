//! Request/response payloads for the backend REST surface.
//!
//! These mirror the JSON bodies exactly; camelCase field names belong to
//! the wire, not to this codebase.

use serde::{Deserialize, Serialize};

use crate::domain::{AuthUser, Role};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Role the user claims at sign-in; the backend rejects a mismatch
    /// with a 401 rather than issuing a downgraded token.
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Always `student` from this client.
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    #[serde(rename = "reportId")]
    pub report_id: String,
    pub content: String,
    #[serde(rename = "parentCommentId")]
    pub parent_comment_id: Option<String>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_comment_serializes_wire_names() {
        let body = NewComment {
            report_id: "r1".into(),
            content: "hello".into(),
            parent_comment_id: Some("c1".into()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["reportId"], "r1");
        assert_eq!(json["parentCommentId"], "c1");
    }

    #[test]
    fn top_level_comment_sends_null_parent() {
        // The original client always includes the key, null for top-level.
        let body = NewComment {
            report_id: "r1".into(),
            content: "hello".into(),
            parent_comment_id: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"parentCommentId\":null"));
    }
}
