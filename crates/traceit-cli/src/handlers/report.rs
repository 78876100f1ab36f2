use crate::args::OutputFormat;
use crate::context::ExecutionContext;
use crate::handlers::{find_report, map_api_error, map_runtime_error};
use crate::views;
use anyhow::{anyhow, bail, Result};
use is_terminal::IsTerminal;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use traceit_api::ReportDraft;
use traceit_runtime::{FeedScope, FeedStore};
use traceit_types::{ReportStatus, Role};

pub fn list(ctx: &ExecutionContext, all: bool, status: Option<ReportStatus>) -> Result<()> {
    let session = ctx.require_session()?;

    if all && session.role != Role::Admin {
        bail!("The unfiltered listing requires an admin session.");
    }

    let scope = if all { FeedScope::All } else { FeedScope::Approved };
    let mut feed = FeedStore::new(ctx.backend()?.clone(), &session.token, scope);
    feed.load().map_err(|e| map_runtime_error(ctx, e))?;

    match ctx.format {
        OutputFormat::Json => {
            let reports: Vec<_> = match status {
                Some(wanted) => feed.with_status(wanted).into_iter().cloned().collect(),
                None => feed.reports().to_vec(),
            };
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Plain => {
            let reports: Vec<_> = match status {
                Some(wanted) => feed.with_status(wanted),
                None => feed.reports().iter().collect(),
            };
            print!("{}", views::report::render_report_list(&reports));
        }
    }
    Ok(())
}

pub fn submit(
    ctx: &ExecutionContext,
    title: String,
    description: String,
    image: Option<PathBuf>,
) -> Result<()> {
    let session = ctx.require_session()?;

    if let Some(path) = &image {
        if !path.exists() {
            bail!("Image file not found: {}", path.display());
        }
    }

    let draft = ReportDraft {
        title,
        description,
        image,
    };
    let report = ctx
        .backend()?
        .submit_report(&session.token, &draft)
        .map_err(|e| map_api_error(ctx, e))?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => {
            println!("Submitted '{}' ({})", report.title, report.id);
            println!("It will appear in the listing once an admin approves it.");
        }
    }
    Ok(())
}

pub fn show(ctx: &ExecutionContext, report_id: &str, with_comments: bool) -> Result<()> {
    let session = ctx.require_session()?;
    let backend = ctx.backend()?;
    let report = find_report(ctx, &session, report_id)?;

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let image_url = report.image.as_deref().map(|f| backend.upload_url(f));
    print!(
        "{}",
        views::report::render_report_detail(&report, image_url.as_deref())
    );

    if with_comments {
        let comments = backend
            .comments(&session.token, report_id)
            .map_err(|e| map_api_error(ctx, e))?;
        println!();
        print!(
            "{}",
            views::thread::render_thread(&comments, report.created_by.id(), None)
        );
    }
    Ok(())
}

pub fn approve(ctx: &ExecutionContext, report_id: &str) -> Result<()> {
    let session = ctx.require_session()?;
    if session.role != Role::Admin {
        bail!("Approving requires an admin session.");
    }

    ctx.backend()?
        .approve_report(&session.token, report_id)
        .map_err(|e| map_api_error(ctx, e))?;

    println!("Approved {}", report_id);
    Ok(())
}

pub fn delete(ctx: &ExecutionContext, report_id: &str, yes: bool) -> Result<()> {
    let session = ctx.require_session()?;
    if session.role != Role::Admin {
        bail!("Deleting requires an admin session.");
    }

    if !yes && !confirm_delete(report_id)? {
        println!("Aborted.");
        return Ok(());
    }

    ctx.backend()?
        .delete_report(&session.token, report_id)
        .map_err(|e| map_api_error(ctx, e))?;

    println!("Deleted {}", report_id);
    Ok(())
}

/// Interactive confirmation. Refuses rather than guesses when stdin is
/// not a terminal, so scripts must pass --yes explicitly.
fn confirm_delete(report_id: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow!(
            "Deletion is irreversible; pass --yes to delete without a prompt."
        ));
    }

    print!("Delete report {} permanently? [y/N] ", report_id);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
