pub mod backend;
pub mod error;
pub mod http;

pub use backend::{Backend, ReportDraft};
pub use error::{Error, Result};
pub use http::HttpBackend;
