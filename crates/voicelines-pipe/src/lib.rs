//! Local duplex byte-stream transport between the voicelines host and its
//! audio player worker.
//!
//! Both processes address each other by a well-known pipe *name*
//! ([`pipe_path`] maps a name to a socket path under the user runtime
//! directory). On Unix the name is realized as a filesystem-path Unix domain
//! socket; the [`PipeStream`] returned by [`connect`] and
//! [`PipeEndpoint::accept`] is a plain `Read + Write` stream, so everything
//! above this layer is transport-agnostic.

pub mod endpoint;
pub mod error;
pub mod stream;

pub use endpoint::{connect, pipe_path, PipeEndpoint};
pub use error::{PipeError, Result};
pub use stream::PipeStream;
