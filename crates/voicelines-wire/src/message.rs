//! Message kinds exchanged between host and player.
//!
//! The tag is carried on the wire as a signed 32-bit integer. The enum is
//! closed; tags outside it are preserved by the codec and handled by the
//! dispatch loop as a logged no-op, so a newer worker never kills an older
//! host.

/// The kind tag of a framed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MessageKind {
    /// Keep-alive / padding; ignored by both sides.
    None = 0,
    /// The peer is disconnecting.
    Disconnected = 1,
    /// The peer is exiting.
    Exit = 2,
    /// Raw audio playback finished.
    FinishedAudio = 3,
    /// Recipe playback finished.
    FinishedRecipe = 4,
    /// Diagnostic loopback reply.
    EchoResponse = 5,
    /// Diagnostic loopback request.
    EchoRequest = 6,
    /// Play a raw audio file (payload: path string).
    PlayAudio = 7,
    /// Play a voice-line recipe (payload: identifier string + context flags).
    PlayRecipe = 8,
    /// Stop all playback.
    StopAudio = 9,
}

impl MessageKind {
    /// Decode a raw wire tag. Returns `None` for unknown tags.
    pub fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            0 => Self::None,
            1 => Self::Disconnected,
            2 => Self::Exit,
            3 => Self::FinishedAudio,
            4 => Self::FinishedRecipe,
            5 => Self::EchoResponse,
            6 => Self::EchoRequest,
            7 => Self::PlayAudio,
            8 => Self::PlayRecipe,
            9 => Self::StopAudio,
            _ => return None,
        })
    }

    /// The raw wire tag.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Disconnected => "Disconnected",
            Self::Exit => "Exit",
            Self::FinishedAudio => "FinishedAudio",
            Self::FinishedRecipe => "FinishedRecipe",
            Self::EchoResponse => "EchoResponse",
            Self::EchoRequest => "EchoRequest",
            Self::PlayAudio => "PlayAudio",
            Self::PlayRecipe => "PlayRecipe",
            Self::StopAudio => "StopAudio",
        }
    }
}
