use crate::args::OutputFormat;
use crate::context::ExecutionContext;
use crate::handlers::{find_report, map_api_error, map_runtime_error};
use crate::views;
use anyhow::Result;
use traceit_engine::{build_thread, ThreadStats};
use traceit_runtime::ThreadStore;

pub fn list(ctx: &ExecutionContext, report_id: &str) -> Result<()> {
    let session = ctx.require_session()?;
    let report = find_report(ctx, &session, report_id)?;

    let comments = ctx
        .backend()?
        .comments(&session.token, report_id)
        .map_err(|e| map_api_error(ctx, e))?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comments)?),
        OutputFormat::Plain => {
            let stats = ThreadStats::from_comments(&comments, &build_thread(&comments));
            println!(
                "Discussion on '{}' ({} comments, {} participants)",
                report.title, stats.total, stats.participants
            );
            println!();
            print!(
                "{}",
                views::thread::render_thread(&comments, report.created_by.id(), None)
            );
        }
    }
    Ok(())
}

pub fn post(
    ctx: &ExecutionContext,
    report_id: &str,
    content: String,
    reply_to: Option<String>,
) -> Result<()> {
    let session = ctx.require_session()?;
    let report = find_report(ctx, &session, report_id)?;

    let mut store = ThreadStore::new(ctx.backend()?.clone(), &session.token, report_id);
    let outcome = store
        .post(content, reply_to)
        .map_err(|e| map_runtime_error(ctx, e))?;

    match ctx.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "postedId": outcome.posted_id,
                    "total": outcome.total,
                })
            );
        }
        OutputFormat::Plain => {
            println!("Posted ({} comments now).", outcome.total);
            println!();
            // Re-render with the fresh comment highlighted in place.
            print!(
                "{}",
                views::thread::render_thread(
                    store.comments(),
                    report.created_by.id(),
                    Some(&outcome.posted_id),
                )
            );
        }
    }
    Ok(())
}
