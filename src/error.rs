use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaedalusError {
    /// Missing maze, file, or recorded path.
    #[error("not found: {0}")]
    NotFound(String),

    /// Corrupt or truncated codec stream, or invalid embedded dimensions.
    #[error("format error: {0}")]
    Format(String),

    /// Socket connect or transmit failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Malformed or truncated response payload.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Bad axis, index, or numeric parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch all for unexpected internal problems.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DaedalusError>;
