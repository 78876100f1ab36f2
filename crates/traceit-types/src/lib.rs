pub mod domain;
pub mod error;
pub mod wire;

pub use domain::*;
pub use error::{Error, Result};
pub use wire::*;
