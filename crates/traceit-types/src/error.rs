use std::fmt;

/// Result type for traceit-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A role string on the wire was neither "student" nor "admin"
    InvalidRole(String),
    /// A status string on the wire was neither "pending" nor "approved"
    InvalidStatus(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRole(role) => write!(f, "Invalid role: {}", role),
            Error::InvalidStatus(status) => write!(f, "Invalid status: {}", status),
        }
    }
}

impl std::error::Error for Error {}
