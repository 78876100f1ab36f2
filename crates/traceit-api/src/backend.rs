use std::path::PathBuf;

use traceit_types::{Comment, LoginResponse, NewComment, Report, Role};

use crate::error::Result;

/// A report submission before the server has seen it.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    /// Local path of an image to attach; uploaded as multipart.
    pub image: Option<PathBuf>,
}

/// The consumed REST surface of the lost & found backend.
///
/// Every method maps to exactly one HTTP call; callers own sequencing
/// (e.g. post-then-reload convergence lives in the stores, not here).
/// Implementations must be shareable across watcher threads.
pub trait Backend: Send + Sync {
    /// POST /api/auth/login; 401 on bad credentials or role mismatch.
    fn login(&self, email: &str, password: &str, role: Role) -> Result<LoginResponse>;

    /// POST /api/auth/register; this client always registers students.
    fn register(&self, name: &str, email: &str, password: &str) -> Result<()>;

    /// GET /api/items: every report regardless of status (moderation view).
    fn list_reports(&self, token: &str) -> Result<Vec<Report>>;

    /// GET /api/items/approved: the student browsing view.
    fn list_approved(&self, token: &str) -> Result<Vec<Report>>;

    /// POST /api/items (multipart); creates a pending report.
    fn submit_report(&self, token: &str, draft: &ReportDraft) -> Result<Report>;

    /// PUT /api/items/:id; pending -> approved; a no-op when already
    /// approved.
    fn approve_report(&self, token: &str, report_id: &str) -> Result<()>;

    /// DELETE /api/items/:id; irreversible.
    fn delete_report(&self, token: &str, report_id: &str) -> Result<()>;

    /// GET /api/comments/:reportId: the flat discussion list.
    fn comments(&self, token: &str, report_id: &str) -> Result<Vec<Comment>>;

    /// POST /api/comments; top-level or reply, per `parent_comment_id`.
    fn post_comment(&self, token: &str, new_comment: &NewComment) -> Result<Comment>;

    /// Absolute URL for an uploaded image filename.
    fn upload_url(&self, filename: &str) -> String;
}
