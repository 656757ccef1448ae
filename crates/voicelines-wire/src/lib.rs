//! Binary message framing for the voicelines host/player protocol.
//!
//! Every message on the wire is one frame:
//! - 4-byte little-endian signed message-kind tag
//! - 2-byte little-endian unsigned payload length
//! - exactly that many payload bytes
//!
//! The payload length is a hard 65535-byte cap, enforced at encode time.
//! String fields inside payloads carry their own 2-byte length prefix
//! followed by UTF-8 bytes ([`PayloadReader`]/[`PayloadWriter`]).
//!
//! [`FrameReader`] reassembles frames from arbitrarily chunked reads; user
//! code never sees partial frames.

pub mod codec;
pub mod error;
pub mod message;
pub mod payload;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, Frame, HEADER_SIZE, MAX_PAYLOAD};
pub use error::{Result, WireError};
pub use message::MessageKind;
pub use payload::{PayloadReader, PayloadWriter};
pub use reader::FrameReader;
pub use writer::FrameWriter;
