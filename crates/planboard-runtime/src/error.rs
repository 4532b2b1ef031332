use planboard_client::RemoteError;
use planboard_engine::{CacheError, EditError};
use std::fmt;

/// Result type for planboard-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Remote boundary failure
    Remote(RemoteError),

    /// Cache state violation
    Cache(CacheError),

    /// A submit raced an in-flight mutation on the same key
    Busy { key: String },

    /// Edit-session transition refused
    Edit(EditError),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Remote(err) => write!(f, "Remote error: {}", err),
            Error::Cache(err) => write!(f, "Cache error: {}", err),
            Error::Busy { key } => write!(f, "Mutation already in flight for {}", key),
            Error::Edit(err) => write!(f, "Edit error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Remote(err) => Some(err),
            Error::Cache(err) => Some(err),
            Error::Edit(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Busy { .. } | Error::Config(_) => None,
        }
    }
}

impl From<RemoteError> for Error {
    fn from(err: RemoteError) -> Self {
        Error::Remote(err)
    }
}

impl From<CacheError> for Error {
    fn from(err: CacheError) -> Self {
        Error::Cache(err)
    }
}

impl From<EditError> for Error {
    fn from(err: EditError) -> Self {
        Error::Edit(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
