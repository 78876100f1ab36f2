pub mod feed;
pub mod thread;

pub use feed::{FeedEvent, FeedWatcher};
pub use thread::{ThreadEvent, ThreadWatcher};

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Sleep in small chunks so a stop request tears the worker down promptly
/// instead of waiting out the full poll interval.
pub(crate) fn sleep_unless_stopped(stop: &AtomicBool, interval: Duration) {
    const CHUNK: Duration = Duration::from_millis(250);

    let mut remaining = interval;
    while !remaining.is_zero() {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let step = remaining.min(CHUNK);
        std::thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}
