use std::sync::Arc;

use tracing::debug;

use traceit_api::Backend;
use traceit_engine::{build_thread, CommentThread};
use traceit_types::{Comment, NewComment, Report, ReportStatus};

use crate::Result;

/// What a successful post reports back to the owning view, so it can
/// refresh its aggregates (comment counts) without another fetch.
#[derive(Debug, Clone)]
pub struct PostOutcome {
    pub posted_id: String,
    pub total: usize,
}

/// Owns the flat comment list for one report.
///
/// `load` replaces the list wholesale from the backend; `post` creates the
/// comment server-side and then reloads to converge on server state; it
/// never splices the result in locally. On failure the previous list is
/// left untouched so the view keeps rendering what it had.
pub struct ThreadStore {
    backend: Arc<dyn Backend>,
    token: String,
    report_id: String,
    comments: Vec<Comment>,
}

impl ThreadStore {
    pub fn new(backend: Arc<dyn Backend>, token: impl Into<String>, report_id: impl Into<String>) -> Self {
        Self {
            backend,
            token: token.into(),
            report_id: report_id.into(),
            comments: Vec::new(),
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Refetch the flat list, replacing prior state.
    pub fn load(&mut self) -> Result<&[Comment]> {
        let fetched = self.backend.comments(&self.token, &self.report_id)?;
        debug!(report_id = %self.report_id, count = fetched.len(), "thread loaded");
        self.comments = fetched;
        Ok(&self.comments)
    }

    /// Derive the discussion forest from the current flat list.
    ///
    /// Transient and read-only: recompute after every `load`.
    pub fn thread(&self) -> CommentThread {
        build_thread(&self.comments)
    }

    /// Create a comment (top-level, or a reply when `parent_comment_id`
    /// is set) and reload.
    pub fn post(
        &mut self,
        content: impl Into<String>,
        parent_comment_id: Option<String>,
    ) -> Result<PostOutcome> {
        let body = NewComment {
            report_id: self.report_id.clone(),
            content: content.into(),
            parent_comment_id,
        };
        let posted = self.backend.post_comment(&self.token, &body)?;
        self.load()?;
        Ok(PostOutcome {
            posted_id: posted.id,
            total: self.comments.len(),
        })
    }
}

/// Which listing endpoint a feed is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// GET /api/items/approved: the student browsing view.
    Approved,
    /// GET /api/items: the admin moderation view.
    All,
}

/// Owns the fetched report list for a browsing or moderation view.
pub struct FeedStore {
    backend: Arc<dyn Backend>,
    token: String,
    scope: FeedScope,
    reports: Vec<Report>,
}

impl FeedStore {
    pub fn new(backend: Arc<dyn Backend>, token: impl Into<String>, scope: FeedScope) -> Self {
        Self {
            backend,
            token: token.into(),
            scope,
            reports: Vec::new(),
        }
    }

    pub fn scope(&self) -> FeedScope {
        self.scope
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn load(&mut self) -> Result<&[Report]> {
        let fetched = match self.scope {
            FeedScope::Approved => self.backend.list_approved(&self.token)?,
            FeedScope::All => self.backend.list_reports(&self.token)?,
        };
        debug!(scope = ?self.scope, count = fetched.len(), "feed loaded");
        self.reports = fetched;
        Ok(&self.reports)
    }

    /// Client-side status predicate over the already-fetched list; the
    /// moderation view filters locally, not via a server query.
    pub fn with_status(&self, status: ReportStatus) -> Vec<&Report> {
        self.reports.iter().filter(|r| r.status == status).collect()
    }
}
