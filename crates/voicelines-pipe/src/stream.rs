use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;

use crate::error::Result;

/// A connected duplex pipe stream.
///
/// Wraps the platform stream so the framing layer only ever sees
/// `Read + Write`. Cloning duplicates the descriptor, which lets one side of
/// a connection be read by the dispatch loop while another handle writes
/// loopback replies.
pub struct PipeStream {
    inner: UnixStream,
}

impl PipeStream {
    pub(crate) fn from_unix(inner: UnixStream) -> Self {
        Self { inner }
    }

    /// Duplicate the stream (new file descriptor over the same connection).
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self::from_unix(self.inner.try_clone()?))
    }

    /// Set the read timeout; `None` blocks indefinitely.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.inner.set_read_timeout(timeout).map_err(Into::into)
    }

    /// Set the write timeout; `None` blocks indefinitely.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.inner.set_write_timeout(timeout).map_err(Into::into)
    }

    /// Shut down both directions of the connection.
    pub fn shutdown(&self) -> Result<()> {
        self.inner
            .shutdown(std::net::Shutdown::Both)
            .map_err(Into::into)
    }
}

impl Read for PipeStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for PipeStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for PipeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipeStream").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_connection() {
        let (a, b) = UnixStream::pair().unwrap();
        let mut left = PipeStream::from_unix(a);
        let mut right = PipeStream::from_unix(b);

        let mut left_clone = left.try_clone().unwrap();
        left_clone.write_all(b"via clone").unwrap();
        left.flush().unwrap();

        let mut buf = [0u8; 9];
        right.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"via clone");
    }

    #[test]
    fn read_timeout_applies() {
        let (a, _b) = UnixStream::pair().unwrap();
        let mut stream = PipeStream::from_unix(a);
        stream
            .set_read_timeout(Some(Duration::from_millis(20)))
            .unwrap();

        let mut buf = [0u8; 1];
        let err = stream.read(&mut buf).unwrap_err();
        assert!(matches!(
            err.kind(),
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
        ));
    }
}
