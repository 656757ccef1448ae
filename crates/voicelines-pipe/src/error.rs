use std::path::PathBuf;

/// Errors produced by pipe transport operations.
#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    /// Failed to bind the endpoint at the given path.
    #[error("failed to bind pipe at {path}: {source}")]
    Bind {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to connect to a listening endpoint.
    #[error("failed to connect to pipe at {path}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to accept an incoming connection.
    #[error("failed to accept pipe connection: {0}")]
    Accept(std::io::Error),

    /// An I/O error on an established stream.
    #[error("pipe I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The socket path exceeds the platform `sun_path` limit.
    #[error("pipe path too long ({len} bytes, max {max}): {path}")]
    PathTooLong {
        path: PathBuf,
        len: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, PipeError>;
