pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod watcher;

pub use config::{resolve_workspace_path, Config};
pub use error::{Error, Result};
pub use session::{Session, SessionStore};
pub use store::{FeedScope, FeedStore, PostOutcome, ThreadStore};
pub use watcher::{FeedEvent, FeedWatcher, ThreadEvent, ThreadWatcher};
