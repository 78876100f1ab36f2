pub mod thread;

pub use thread::{
    build_thread, AuthorBadge, CommentNode, CommentThread, ThreadStats,
};
