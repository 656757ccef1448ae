/// Errors that can occur while establishing or running a player session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Transport-level error.
    #[error("pipe error: {0}")]
    Pipe(#[from] voicelines_pipe::PipeError),

    /// Framing-level error.
    #[error("wire error: {0}")]
    Wire(#[from] voicelines_wire::WireError),

    /// The outbound connect-retry budget ran out before the player listened.
    #[error("player pipe never accepted a connection ({attempts} attempts)")]
    ConnectionExhausted { attempts: u32 },

    /// An I/O error outside the pipe layer (catalog file, worker spawn).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
