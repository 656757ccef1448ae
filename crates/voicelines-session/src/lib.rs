//! Host-side session management for the out-of-process audio player.
//!
//! One worker session at a time. The host opens an outbound command pipe to
//! the player (with a bounded connect-retry budget), then listens on its own
//! well-known pipe for the player's notification connection. From there a
//! single dispatch loop ([`PlayerSession::run`]) reads one frame at a time
//! and resolves completions; the rest of the host talks to the player only
//! through the cloneable [`PlayerHandle`].
//!
//! Losing the player is never fatal to the host: setup failure or a
//! worker-initiated shutdown just degrades every send into a logged no-op.

pub mod catalog;
pub mod config;
pub mod connector;
pub mod context;
pub mod error;
pub mod session;
pub mod worker;

pub use catalog::VoiceCatalog;
pub use config::{RetryPolicy, SessionConfig, HOST_PIPE_NAME, PLAYER_PIPE_NAME};
pub use connector::connect_with_retry;
pub use context::{ContextSource, FixedContext, RequestContext};
pub use error::{Result, SessionError};
pub use session::{Completion, PlayerHandle, PlayerSession};
pub use worker::WorkerProcess;
