use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};
use crate::message::MessageKind;

/// Frame header: kind tag (4) + payload length (2) = 6 bytes.
pub const HEADER_SIZE: usize = 6;

/// Maximum payload size — the length field is 16 bits.
pub const MAX_PAYLOAD: usize = u16::MAX as usize;

/// One framed message.
///
/// The kind is kept as the raw wire tag so unknown tags survive decoding;
/// [`Frame::kind`] resolves it to a [`MessageKind`] where possible.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw message-kind tag as carried on the wire.
    pub raw_kind: i32,
    /// The message payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame for a known message kind.
    pub fn new(kind: MessageKind, payload: impl Into<Bytes>) -> Self {
        Self {
            raw_kind: kind.as_raw(),
            payload: payload.into(),
        }
    }

    /// Create a frame with no payload.
    pub fn empty(kind: MessageKind) -> Self {
        Self::new(kind, Bytes::new())
    }

    /// The message kind, or `None` if the tag is unknown.
    pub fn kind(&self) -> Option<MessageKind> {
        MessageKind::from_raw(self.raw_kind)
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a frame into the wire format.
///
/// Wire format (all little-endian):
/// ```text
/// ┌────────────────┬───────────────┬──────────────────┐
/// │ Kind (4B, i32) │ Length (2B)   │ Payload          │
/// │                │ (u16)         │ (Length bytes)   │
/// └────────────────┴───────────────┴──────────────────┘
/// ```
pub fn encode_frame(kind: i32, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(WireError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_i32_le(kind);
    dst.put_u16_le(payload.len() as u16);
    dst.put_slice(payload);
    Ok(())
}

/// Decode one frame from a buffer.
///
/// Returns `Ok(None)` if the buffer does not yet hold a complete frame.
/// On success, consumes the frame bytes from the buffer. The declared
/// payload length is bounded by the 16-bit field, so no size check is
/// needed on the decode side.
pub fn decode_frame(src: &mut BytesMut) -> Option<Frame> {
    if src.len() < HEADER_SIZE {
        return None; // Need more data
    }

    let raw_kind = i32::from_le_bytes(src[0..4].try_into().expect("slice is 4 bytes"));
    let payload_len = u16::from_le_bytes(src[4..6].try_into().expect("slice is 2 bytes")) as usize;

    if src.len() < HEADER_SIZE + payload_len {
        return None; // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Some(Frame { raw_kind, payload })
}
