use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Workspace path or configuration could not be resolved
    Config(String),
    /// IO operation failed
    Io(std::io::Error),
    /// Config file could not be parsed
    TomlDe(toml::de::Error),
    /// Config could not be serialized
    TomlSer(toml::ser::Error),
    /// A backend call failed
    Api(traceit_api::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::TomlDe(err) => write!(f, "Invalid config file: {}", err),
            Error::TomlSer(err) => write!(f, "Could not write config: {}", err),
            Error::Api(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::TomlDe(err) => Some(err),
            Error::TomlSer(err) => Some(err),
            Error::Api(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::TomlDe(err)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::TomlSer(err)
    }
}

impl From<traceit_api::Error> for Error {
    fn from(err: traceit_api::Error) -> Self {
        Error::Api(err)
    }
}

impl Error {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(err) if err.is_unauthorized())
    }
}
