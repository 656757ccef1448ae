use std::path::PathBuf;
use std::time::Duration;

use voicelines_pipe::pipe_path;

/// Well-known name the player listens on; the host connects here to send
/// playback commands.
pub const PLAYER_PIPE_NAME: &str = "MoreVoiceLinesPlayer";

/// Well-known name the host listens on; the player connects here to deliver
/// completion and control notifications.
pub const HOST_PIPE_NAME: &str = "MoreVoiceLines";

/// Retry budget for the outbound connect.
///
/// The player process needs a moment after spawn before it listens, so each
/// attempt is preceded by the delay. Exhausting the budget is fatal to IPC
/// setup but never to the host process.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum connect attempts.
    pub attempts: u32,
    /// Delay before each attempt.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_millis(100),
        }
    }
}

/// Where and how to reach the player worker.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path of the player's listening pipe (outbound commands).
    pub player_pipe: PathBuf,
    /// Path the host listens on (inbound notifications).
    pub host_pipe: PathBuf,
    /// Outbound connect retry budget.
    pub retry: RetryPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_pipe: pipe_path(PLAYER_PIPE_NAME),
            host_pipe: pipe_path(HOST_PIPE_NAME),
            retry: RetryPolicy::default(),
        }
    }
}
