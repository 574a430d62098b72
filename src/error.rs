//! Error types for cabs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid cab id: {0}")]
    InvalidId(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Registration number already in use: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of an [`Error`].
///
/// The HTTP layer reports every kind the same way; the kind only shows up in
/// logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something the store refuses to accept.
    Validation,
    /// A uniqueness constraint was violated.
    Conflict,
    /// The backing store could not be reached or failed to answer.
    Unavailable,
    Internal,
}

impl Error {
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidId(_) | Error::Validation(_) | Error::InvalidRequest(_) => {
                ErrorKind::Validation
            }
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::Storage(_) | Error::Io(_) => ErrorKind::Unavailable,
            Error::Serialization(_) | Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::InvalidId("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(Error::validation("empty").kind(), ErrorKind::Validation);
        assert_eq!(Error::Conflict("KA01".into()).kind(), ErrorKind::Conflict);
        assert_eq!(Error::storage("down").kind(), ErrorKind::Unavailable);
        assert_eq!(
            Error::Io(std::io::Error::other("disk")).kind(),
            ErrorKind::Unavailable
        );
        assert_eq!(Error::internal("bug").kind(), ErrorKind::Internal);
    }
}
