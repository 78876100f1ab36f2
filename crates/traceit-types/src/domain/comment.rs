use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::CommentAuthor;

/// One comment in a report's discussion thread, as fetched from the
/// backend's flat per-report list.
///
/// `parent_comment_id = None` marks a top-level comment; otherwise it
/// references another comment on the same report. Comments are never
/// edited or deleted through this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "reportId")]
    pub report_id: String,
    #[serde(rename = "parentCommentId", default)]
    pub parent_comment_id: Option<String>,
    pub content: String,
    #[serde(rename = "userId")]
    pub author: CommentAuthor,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_comment_id.is_none()
    }
}
