pub mod comment;
pub mod report;
pub mod user;

pub use comment::*;
pub use report::*;
pub use user::*;
