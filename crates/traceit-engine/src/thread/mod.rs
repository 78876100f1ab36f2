pub mod assembler;
pub mod badge;
pub mod stats;

pub use assembler::{build_thread, CommentNode, CommentThread};
pub use badge::AuthorBadge;
pub use stats::ThreadStats;
