use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for backend calls.
///
/// `Unauthorized` is the only variant callers react to structurally (it
/// forces a logout); everything else becomes inline error text near the
/// triggering command. No variant is retried automatically.
#[derive(Debug)]
pub enum Error {
    /// 401: bad credentials, role mismatch, or an expired token.
    Unauthorized,
    /// 403: authenticated but not allowed (e.g. student hitting the
    /// admin listing).
    Forbidden(String),
    /// Any other non-2xx with whatever `{message}` the server attached.
    Api { status: u16, message: String },
    /// Transport-level failure; the server was never reached or the body
    /// could not be read.
    Network(reqwest::Error),
    /// Local I/O failure, e.g. reading an image file for submission.
    Io(std::io::Error),
}

impl Error {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unauthorized => write!(f, "Unauthorized (401)"),
            Error::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Error::Api { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            Error::Network(err) => write!(f, "Network error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Network(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
