//! Typed accessors for payload fields.
//!
//! Payloads are flat byte sequences; fields are read and written in a fixed
//! order agreed by both processes. Strings carry a 2-byte little-endian
//! length prefix followed by UTF-8 bytes; bools are one byte.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Sequential reader over a frame payload.
pub struct PayloadReader {
    buf: Bytes,
}

impl PayloadReader {
    pub fn new(payload: Bytes) -> Self {
        Self { buf: payload }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn check(&self, wanted: usize) -> Result<()> {
        if self.buf.remaining() < wanted {
            return Err(WireError::TruncatedPayload {
                wanted,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    /// Read a little-endian unsigned 16-bit integer.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.check(2)?;
        Ok(self.buf.get_u16_le())
    }

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.check(n)?;
        Ok(self.buf.split_to(n))
    }

    /// Read a one-byte bool (zero is false, anything else true).
    pub fn read_bool(&mut self) -> Result<bool> {
        self.check(1)?;
        Ok(self.buf.get_u8() != 0)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        let text = std::str::from_utf8(bytes.as_ref())?;
        Ok(text.to_string())
    }
}

/// Sequential writer building a frame payload.
#[derive(Debug, Default)]
pub struct PayloadWriter {
    buf: BytesMut,
}

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a little-endian unsigned 16-bit integer.
    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.buf.put_u16_le(value);
        self
    }

    /// Write raw bytes with no prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.put_slice(bytes);
        self
    }

    /// Write a one-byte bool.
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.buf.put_u8(u8::from(value));
        self
    }

    /// Write a length-prefixed UTF-8 string.
    ///
    /// Fails if the encoded string exceeds the 16-bit length prefix.
    pub fn write_string(&mut self, text: &str) -> Result<&mut Self> {
        if text.len() > u16::MAX as usize {
            return Err(WireError::PayloadTooLarge {
                size: text.len(),
                max: u16::MAX as usize,
            });
        }
        self.buf.put_u16_le(text.len() as u16);
        self.buf.put_slice(text.as_bytes());
        Ok(self)
    }

    /// Finish and take the payload bytes.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Current payload length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_flags_roundtrip() {
        let mut writer = PayloadWriter::new();
        writer
            .write_string("8cbf1234-aaaa-bbbb-cccc-0123456789ab")
            .unwrap();
        writer.write_bool(true).write_bool(false);

        let mut reader = PayloadReader::new(writer.into_bytes());
        assert_eq!(
            reader.read_string().unwrap(),
            "8cbf1234-aaaa-bbbb-cccc-0123456789ab"
        );
        assert!(reader.read_bool().unwrap());
        assert!(!reader.read_bool().unwrap());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn non_ascii_string_roundtrip() {
        let mut writer = PayloadWriter::new();
        writer.write_string("żółć — vōx").unwrap();

        let mut reader = PayloadReader::new(writer.into_bytes());
        assert_eq!(reader.read_string().unwrap(), "żółć — vōx");
    }

    #[test]
    fn u16_and_raw_bytes_roundtrip() {
        let mut writer = PayloadWriter::new();
        writer.write_u16(2).write_bytes(&[0x01, 0x02]);

        let mut reader = PayloadReader::new(writer.into_bytes());
        let len = reader.read_u16().unwrap();
        let bytes = reader.read_bytes(len as usize).unwrap();
        assert_eq!(bytes.as_ref(), &[0x01, 0x02]);
    }

    #[test]
    fn truncated_string_fails() {
        let mut writer = PayloadWriter::new();
        // Claim 10 bytes but provide 3.
        writer.write_u16(10).write_bytes(b"abc");

        let mut reader = PayloadReader::new(writer.into_bytes());
        let err = reader.read_string().unwrap_err();
        assert!(matches!(err, WireError::TruncatedPayload { .. }));
    }

    #[test]
    fn truncated_bool_fails() {
        let mut reader = PayloadReader::new(Bytes::new());
        let err = reader.read_bool().unwrap_err();
        assert!(matches!(
            err,
            WireError::TruncatedPayload {
                wanted: 1,
                remaining: 0
            }
        ));
    }

    #[test]
    fn invalid_utf8_fails() {
        let mut writer = PayloadWriter::new();
        writer.write_u16(2).write_bytes(&[0xFF, 0xFE]);

        let mut reader = PayloadReader::new(writer.into_bytes());
        let err = reader.read_string().unwrap_err();
        assert!(matches!(err, WireError::InvalidString(_)));
    }

    #[test]
    fn oversized_string_rejected() {
        let text = "x".repeat(u16::MAX as usize + 1);
        let mut writer = PayloadWriter::new();
        let err = writer.write_string(&text).unwrap_err();
        assert!(matches!(err, WireError::PayloadTooLarge { .. }));
    }
}
