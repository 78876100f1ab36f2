use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use traceit_api::Backend;
use traceit_types::Report;

use super::sleep_unless_stopped;
use crate::store::FeedScope;
use crate::Result;

#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A fetch completed; `new` holds report ids not seen before.
    Update { all: Vec<Report>, new: Vec<Report> },
    /// Transient failure; the poll cadence continues unchanged.
    Error(String),
    /// The token was rejected. Terminal.
    Unauthorized,
}

/// Polls a report listing (approved-only or the full moderation feed) on
/// a fixed interval. Same lifecycle rules as `ThreadWatcher`.
pub struct FeedWatcher {
    rx: Receiver<FeedEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FeedWatcher {
    /// The item list refresh period observed in the original UI.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    pub fn start(
        backend: Arc<dyn Backend>,
        token: impl Into<String>,
        scope: FeedScope,
        interval: Duration,
    ) -> Result<Self> {
        let token = token.into();
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = channel();

        let worker_stop = stop.clone();
        let handle = std::thread::Builder::new()
            .name("feed-watcher".to_string())
            .spawn(move || poll_feed(backend, token, scope, interval, worker_stop, tx))?;

        Ok(Self {
            rx,
            stop,
            handle: Some(handle),
        })
    }

    pub fn receiver(&self) -> &Receiver<FeedEvent> {
        &self.rx
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FeedWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll_feed(
    backend: Arc<dyn Backend>,
    token: String,
    scope: FeedScope,
    interval: Duration,
    stop: Arc<AtomicBool>,
    tx: Sender<FeedEvent>,
) {
    let mut seen: HashSet<String> = HashSet::new();

    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }

        let fetched = match scope {
            FeedScope::Approved => backend.list_approved(&token),
            FeedScope::All => backend.list_reports(&token),
        };

        match fetched {
            Ok(all) => {
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                let new: Vec<Report> = all
                    .iter()
                    .filter(|r| !seen.contains(&r.id))
                    .cloned()
                    .collect();
                seen.extend(all.iter().map(|r| r.id.clone()));
                if tx.send(FeedEvent::Update { all, new }).is_err() {
                    return;
                }
            }
            Err(err) if err.is_unauthorized() => {
                let _ = tx.send(FeedEvent::Unauthorized);
                return;
            }
            Err(err) => {
                warn!(scope = ?scope, error = %err, "feed poll failed");
                if tx.send(FeedEvent::Error(err.to_string())).is_err() {
                    return;
                }
            }
        }

        sleep_unless_stopped(&stop, interval);
    }
}
