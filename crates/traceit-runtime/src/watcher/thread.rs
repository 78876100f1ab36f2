use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use traceit_api::Backend;
use traceit_types::Comment;

use super::sleep_unless_stopped;
use crate::Result;

/// Events a thread watcher emits over its channel.
#[derive(Debug, Clone)]
pub enum ThreadEvent {
    /// Sent once, before the first fetch.
    Attached { report_id: String },
    /// A fetch completed; `new` holds comments not seen in any earlier
    /// fetch of this watcher, `all` the full replacement list.
    Update { all: Vec<Comment>, new: Vec<Comment> },
    /// Transient failure; the poll cadence continues unchanged.
    Error(String),
    /// The token was rejected. Terminal: the loop ends after this.
    Unauthorized,
}

/// Polls one report's comment list on a fixed interval.
///
/// Approximates push updates the way the original UI did: immediate fetch
/// on start, then an unconditional refetch every `interval`; no backoff,
/// no jitter, no pause on failure. Teardown is deterministic: `stop` (or
/// drop) flags the worker, joins it, and any response still in flight is
/// discarded rather than emitted.
pub struct ThreadWatcher {
    rx: Receiver<ThreadEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadWatcher {
    /// The per-item comment refresh period observed in the original UI.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    pub fn start(
        backend: Arc<dyn Backend>,
        token: impl Into<String>,
        report_id: impl Into<String>,
        interval: Duration,
    ) -> Result<Self> {
        let token = token.into();
        let report_id = report_id.into();
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = channel();

        let worker_stop = stop.clone();
        let handle = std::thread::Builder::new()
            .name("thread-watcher".to_string())
            .spawn(move || {
                poll_comments(backend, token, report_id, interval, worker_stop, tx)
            })?;

        Ok(Self {
            rx,
            stop,
            handle: Some(handle),
        })
    }

    pub fn receiver(&self) -> &Receiver<ThreadEvent> {
        &self.rx
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ThreadWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll_comments(
    backend: Arc<dyn Backend>,
    token: String,
    report_id: String,
    interval: Duration,
    stop: Arc<AtomicBool>,
    tx: Sender<ThreadEvent>,
) {
    let _ = tx.send(ThreadEvent::Attached {
        report_id: report_id.clone(),
    });

    let mut seen: HashSet<String> = HashSet::new();

    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }

        match backend.comments(&token, &report_id) {
            Ok(all) => {
                // A response that lands after teardown must not be applied.
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                let new: Vec<Comment> = all
                    .iter()
                    .filter(|c| !seen.contains(&c.id))
                    .cloned()
                    .collect();
                seen.extend(all.iter().map(|c| c.id.clone()));
                if tx.send(ThreadEvent::Update { all, new }).is_err() {
                    return;
                }
            }
            Err(err) if err.is_unauthorized() => {
                let _ = tx.send(ThreadEvent::Unauthorized);
                return;
            }
            Err(err) => {
                warn!(report_id = %report_id, error = %err, "comment poll failed");
                if tx.send(ThreadEvent::Error(err.to_string())).is_err() {
                    return;
                }
            }
        }

        sleep_unless_stopped(&stop, interval);
    }
}
