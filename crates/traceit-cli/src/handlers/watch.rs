use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::context::ExecutionContext;
use crate::handlers::find_report;
use crate::ui::{ConsoleWriter, LiveScreen, TerminalWriter};
use crate::views;
use traceit_runtime::{FeedEvent, FeedScope, FeedWatcher, ThreadEvent, ThreadWatcher};
use traceit_types::Role;

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

pub fn handle(
    ctx: &ExecutionContext,
    report_id: Option<String>,
    feed: bool,
    interval: Option<u64>,
) -> Result<()> {
    let session = ctx.require_session()?;
    let stop = install_interrupt_flag()?;

    if feed {
        let scope = match session.role {
            Role::Admin => FeedScope::All,
            Role::Student => FeedScope::Approved,
        };
        let interval =
            interval.map(Duration::from_secs).unwrap_or(FeedWatcher::DEFAULT_INTERVAL);
        return watch_feed(ctx, &session.token, scope, interval, stop);
    }

    let Some(report_id) = report_id else {
        bail!("Pass a report id to watch, or --feed for the item listing.");
    };
    let interval =
        interval.map(Duration::from_secs).unwrap_or(ThreadWatcher::DEFAULT_INTERVAL);

    // Resolve up front so badges have the owner and a bad id fails fast.
    let report = find_report(ctx, &session, &report_id)?;

    watch_thread(ctx, &session.token, report, interval, stop)
}

fn install_interrupt_flag() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        handler_stop.store(true, Ordering::Relaxed);
    })?;
    Ok(stop)
}

fn watch_thread(
    ctx: &ExecutionContext,
    token: &str,
    report: traceit_types::Report,
    interval: Duration,
    stop: Arc<AtomicBool>,
) -> Result<()> {
    let live = std::io::stdout().is_terminal();
    let mut writer: Box<dyn TerminalWriter> = if live {
        Box::new(LiveScreen::enter()?)
    } else {
        Box::new(ConsoleWriter::new())
    };

    let header = format!(
        "Watching '{}' every {}s. Ctrl-C to stop.",
        report.title,
        interval.as_secs()
    );
    writer.write_line(&header);
    writer.flush();

    let owner_id = report.created_by.id().to_string();
    let mut watcher =
        ThreadWatcher::start(ctx.backend()?.clone(), token, &report.id, interval)?;

    loop {
        if stop.load(Ordering::Relaxed) {
            watcher.stop();
            break;
        }

        match watcher.receiver().recv_timeout(POLL_TIMEOUT) {
            Ok(ThreadEvent::Attached { .. }) => {}
            Ok(ThreadEvent::Update { all, new }) => {
                if live {
                    writer.clear_screen();
                    writer.write_line(&header);
                    writer.write_line("");
                    for line in views::thread::render_thread(&all, &owner_id, None).lines() {
                        writer.write_line(line);
                    }
                } else {
                    // Append-only stream: only what changed.
                    for comment in &new {
                        writer.write_line(&format!(
                            "{} {}: {}",
                            views::format_relative_time(comment.created_at).bright_black(),
                            comment.author.email,
                            comment.content
                        ));
                    }
                }
                writer.flush();
            }
            Ok(ThreadEvent::Error(message)) => {
                writer.write_line(&format!("{} {} (still polling)", "error:".red(), message));
                writer.flush();
            }
            Ok(ThreadEvent::Unauthorized) => {
                watcher.stop();
                drop(writer);
                let _ = ctx.session_store().clear();
                return Err(anyhow!(
                    "Session expired or rejected. Run 'traceit auth login' again."
                ));
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(writer);
    println!("Stopped.");
    Ok(())
}

fn watch_feed(
    ctx: &ExecutionContext,
    token: &str,
    scope: FeedScope,
    interval: Duration,
    stop: Arc<AtomicBool>,
) -> Result<()> {
    let live = std::io::stdout().is_terminal();
    let mut writer: Box<dyn TerminalWriter> = if live {
        Box::new(LiveScreen::enter()?)
    } else {
        Box::new(ConsoleWriter::new())
    };

    let what = match scope {
        FeedScope::Approved => "approved items",
        FeedScope::All => "all items",
    };
    let header = format!("Watching {} every {}s. Ctrl-C to stop.", what, interval.as_secs());
    writer.write_line(&header);
    writer.flush();

    let mut watcher = FeedWatcher::start(ctx.backend()?.clone(), token, scope, interval)?;

    loop {
        if stop.load(Ordering::Relaxed) {
            watcher.stop();
            break;
        }

        match watcher.receiver().recv_timeout(POLL_TIMEOUT) {
            Ok(FeedEvent::Update { all, new }) => {
                if live {
                    writer.clear_screen();
                    writer.write_line(&header);
                    writer.write_line("");
                    let refs: Vec<_> = all.iter().collect();
                    for line in views::report::render_report_list(&refs).lines() {
                        writer.write_line(line);
                    }
                } else {
                    for report in &new {
                        writer.write_line(&format!(
                            "new: {} by {}",
                            report.title,
                            report.reporter_label()
                        ));
                    }
                }
                writer.flush();
            }
            Ok(FeedEvent::Error(message)) => {
                writer.write_line(&format!("{} {} (still polling)", "error:".red(), message));
                writer.flush();
            }
            Ok(FeedEvent::Unauthorized) => {
                watcher.stop();
                drop(writer);
                let _ = ctx.session_store().clear();
                return Err(anyhow!(
                    "Session expired or rejected. Run 'traceit auth login' again."
                ));
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(writer);
    println!("Stopped.");
    Ok(())
}
