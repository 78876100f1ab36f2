pub mod auth;
pub mod comment;
pub mod init;
pub mod report;
pub mod watch;

use crate::context::ExecutionContext;
use anyhow::anyhow;
use traceit_runtime::Session;
use traceit_types::{Report, Role};

/// Convert an API failure into the user-facing error. A rejected token
/// also clears the stored session, so the next command prompts a fresh
/// sign-in instead of failing the same way.
pub(crate) fn map_api_error(ctx: &ExecutionContext, err: traceit_api::Error) -> anyhow::Error {
    if err.is_unauthorized() {
        let _ = ctx.session_store().clear();
        return anyhow!("Session expired or rejected. Run 'traceit auth login' again.");
    }
    err.into()
}

/// Same contract as `map_api_error`, for errors surfaced through the
/// runtime stores and watchers.
pub(crate) fn map_runtime_error(ctx: &ExecutionContext, err: traceit_runtime::Error) -> anyhow::Error {
    if err.is_unauthorized() {
        let _ = ctx.session_store().clear();
        return anyhow!("Session expired or rejected. Run 'traceit auth login' again.");
    }
    err.into()
}

/// Fetch the listing the session's role can see and pick one report out
/// of it. The backend has no single-report endpoint, so detail views go
/// through the list.
pub(crate) fn find_report(
    ctx: &ExecutionContext,
    session: &Session,
    report_id: &str,
) -> anyhow::Result<Report> {
    let backend = ctx.backend()?;
    let reports = match session.role {
        Role::Admin => backend.list_reports(&session.token),
        Role::Student => backend.list_approved(&session.token),
    }
    .map_err(|e| map_api_error(ctx, e))?;

    reports
        .into_iter()
        .find(|r| r.id == report_id)
        .ok_or_else(|| anyhow!("Report '{}' not found", report_id))
}
