use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Failure taxonomy of the diagnostics core.
///
/// Only `InvalidArgument` and `ResolutionFailed` ever reach a caller of the
/// public engines; `Timeout` and `Transport` are folded into negative outcomes
/// at component boundaries.
#[derive(Debug, Error)]
pub enum DiagError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("could not resolve '{input}': {source}")]
    ResolutionFailed {
        input: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

/// Field-less discriminant of [`DiagError`], kept inside result values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Timeout,
    ResolutionFailed,
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: &str = match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Timeout => "timed out",
            ErrorKind::ResolutionFailed => "name resolution failed",
            ErrorKind::Transport => "transport error",
        };
        f.write_str(text)
    }
}

impl DiagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiagError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DiagError::Timeout(_) => ErrorKind::Timeout,
            DiagError::ResolutionFailed { .. } => ErrorKind::ResolutionFailed,
            DiagError::Transport(_) => ErrorKind::Transport,
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        DiagError::InvalidArgument(msg.into())
    }
}

pub type DiagResult<T> = Result<T, DiagError>;
