//! Voice-line playback host.
//!
//! Hands audio-playback requests off to a separate player process over a
//! pair of named duplex pipes and receives completion notifications back.
//!
//! # Crate Structure
//!
//! - [`pipe`] — local duplex byte-stream transport (Unix domain sockets
//!   addressed by well-known pipe names)
//! - [`wire`] — binary message framing (kind tag + length + payload)
//! - [`session`] — connection lifecycle, dispatch loop and request API

/// Re-export transport types.
pub mod pipe {
    pub use voicelines_pipe::*;
}

/// Re-export framing types.
pub mod wire {
    pub use voicelines_wire::*;
}

/// Re-export session types.
pub mod session {
    pub use voicelines_session::*;
}
