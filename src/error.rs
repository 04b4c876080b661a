use thiserror::Error;

/// Classifies rule-list loading errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// No rule source configured
    NotConfigured,
    /// File open/read failure
    FileError,
    /// Data format or decoding error (not UTF-8, etc.)
    InvalidData,
}

/// Public suffix engine error types
#[derive(Error, Debug)]
pub enum PslError {
    #[error("Load error: {message}")]
    LoadError {
        kind: LoadErrorKind,
        message: String,
    },

    #[error("Insert error: {0}")]
    InsertError(String),

    #[error("Global suffix manager already initialized")]
    AlreadyInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PslError {
    pub(crate) fn load(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        PslError::LoadError {
            kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PslError>;
