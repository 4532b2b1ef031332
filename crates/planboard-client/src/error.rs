use planboard_types::ValidationErrors;
use std::fmt;

/// Result type for remote store operations
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Error types for the remote record boundary
#[derive(Debug)]
pub enum RemoteError {
    /// The request never produced a usable HTTP response
    Transport(reqwest::Error),
    /// The store rejected the write with field-level messages
    Validation(ValidationErrors),
    /// The addressed record does not exist
    NotFound { entity: &'static str, id: String },
    /// Any other unsuccessful response
    Remote { status: u16, message: String },
    /// A successful response carried an undecodable body
    Decode {
        entity: &'static str,
        source: serde_json::Error,
    },
}

impl RemoteError {
    /// Whether this failure says the addressed record is gone.
    /// Deletes treat this as already-done; updates treat it as fatal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound { .. })
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Transport(err) => write!(f, "transport error: {}", err),
            RemoteError::Validation(_) => {
                write!(f, "store rejected the write with validation errors")
            }
            RemoteError::NotFound { entity, id } => write!(f, "{} {} not found", entity, id),
            RemoteError::Remote { status, message } => {
                write!(f, "remote failure (HTTP {}): {}", status, message)
            }
            RemoteError::Decode { entity, source } => {
                write!(f, "undecodable {} response: {}", entity, source)
            }
        }
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RemoteError::Transport(err) => Some(err),
            RemoteError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(err)
    }
}
