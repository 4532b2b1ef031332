use std::fmt;

/// Result type for planboard-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A project selector string was neither empty nor a numeric id
    Selection(String),
    /// A timestamp string did not parse at the expected precision
    Timestamp(chrono::ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Selection(raw) => write!(f, "invalid project selection: {:?}", raw),
            Error::Timestamp(err) => write!(f, "timestamp parse error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Selection(_) => None,
            Error::Timestamp(err) => Some(err),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Timestamp(err)
    }
}
