use std::os::unix::fs::{FileTypeExt, PermissionsExt};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PipeError, Result};
use crate::stream::PipeStream;

/// Permission mode applied to created socket paths. The pipe pair is a
/// single-user channel; nothing else on the machine should reach it.
const SOCKET_MODE: u32 = 0o600;

/// Maximum socket path length (`sockaddr_un.sun_path`).
#[cfg(target_os = "linux")]
const MAX_PATH_LEN: usize = 108;
#[cfg(not(target_os = "linux"))]
const MAX_PATH_LEN: usize = 104;

/// Map a well-known pipe name to a socket path.
///
/// Uses `$XDG_RUNTIME_DIR` when set, falling back to the temp directory, so
/// both processes resolve the same path without any configuration exchange.
pub fn pipe_path(name: &str) -> PathBuf {
    let dir = std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    dir.join(format!("{name}.sock"))
}

/// Connect to a listening endpoint (single blocking attempt).
///
/// On Unix this fails immediately when nothing is listening; retry pacing is
/// the caller's concern.
pub fn connect(path: impl AsRef<Path>) -> Result<PipeStream> {
    let path = path.as_ref();
    let stream = UnixStream::connect(path).map_err(|e| PipeError::Connect {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(?path, "pipe connected");
    Ok(PipeStream::from_unix(stream))
}

/// A listening pipe endpoint.
///
/// Binds a socket at a fixed path, accepts connections, and removes the
/// socket file again on drop.
pub struct PipeEndpoint {
    listener: UnixListener,
    path: PathBuf,
}

impl PipeEndpoint {
    /// Bind and listen at `path`.
    ///
    /// A stale socket left by a previous run is removed first; any other
    /// kind of file at the path is an error, never clobbered.
    pub fn bind(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let len = path.as_os_str().len();
        if len >= MAX_PATH_LEN {
            return Err(PipeError::PathTooLong {
                path,
                len,
                max: MAX_PATH_LEN,
            });
        }

        if path.exists() {
            let metadata = std::fs::symlink_metadata(&path).map_err(|e| PipeError::Bind {
                path: path.clone(),
                source: e,
            })?;
            if !metadata.file_type().is_socket() {
                return Err(PipeError::Bind {
                    path,
                    source: std::io::Error::new(
                        std::io::ErrorKind::AlreadyExists,
                        "existing path is not a socket",
                    ),
                });
            }
            debug!(?path, "removing stale socket");
            std::fs::remove_file(&path).map_err(|e| PipeError::Bind {
                path: path.clone(),
                source: e,
            })?;
        }

        let listener = UnixListener::bind(&path).map_err(|e| PipeError::Bind {
            path: path.clone(),
            source: e,
        })?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(SOCKET_MODE)).map_err(
            |e| PipeError::Bind {
                path: path.clone(),
                source: e,
            },
        )?;

        info!(?path, "pipe endpoint listening");
        Ok(Self { listener, path })
    }

    /// Accept one incoming connection (blocking, no timeout).
    pub fn accept(&self) -> Result<PipeStream> {
        let (stream, _addr) = self.listener.accept().map_err(PipeError::Accept)?;
        debug!(path = ?self.path, "pipe connection accepted");
        Ok(PipeStream::from_unix(stream))
    }

    /// The path this endpoint is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PipeEndpoint {
    fn drop(&mut self) {
        if let Ok(metadata) = std::fs::symlink_metadata(&self.path) {
            if metadata.file_type().is_socket() {
                debug!(path = ?self.path, "removing socket file");
                let _ = std::fs::remove_file(&self.path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    fn temp_sock(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vl-pipe-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir.join("pipe.sock")
    }

    #[test]
    fn bind_accept_connect_roundtrip() {
        let path = temp_sock("roundtrip");
        let endpoint = PipeEndpoint::bind(&path).unwrap();
        assert!(path.exists());

        let path_clone = path.clone();
        let client = std::thread::spawn(move || {
            let mut stream = connect(&path_clone).unwrap();
            stream.write_all(b"hello").unwrap();
        });

        let mut server = endpoint.accept().unwrap();
        let mut buf = [0u8; 5];
        server.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
        client.join().unwrap();

        drop(endpoint);
        assert!(!path.exists(), "socket file should be removed on drop");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn bind_removes_stale_socket() {
        let path = temp_sock("stale");
        let first = PipeEndpoint::bind(&path).unwrap();
        // Leak the listener but keep the file around.
        std::mem::forget(first);

        let second = PipeEndpoint::bind(&path);
        assert!(second.is_ok());
        drop(second);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn bind_refuses_non_socket_file() {
        let path = temp_sock("regular");
        std::fs::write(&path, b"not a socket").unwrap();

        let result = PipeEndpoint::bind(&path);
        assert!(matches!(result, Err(PipeError::Bind { .. })));
        assert!(path.exists(), "regular file must not be clobbered");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn bind_hardens_permissions() {
        let path = temp_sock("perms");
        let endpoint = PipeEndpoint::bind(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        drop(endpoint);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn bind_rejects_overlong_path() {
        let long = std::env::temp_dir().join("a".repeat(200)).join("p.sock");
        let result = PipeEndpoint::bind(&long);
        assert!(matches!(result, Err(PipeError::PathTooLong { .. })));
    }

    #[test]
    fn connect_fails_fast_without_listener() {
        let path = temp_sock("nobody");
        let result = connect(&path);
        assert!(matches!(result, Err(PipeError::Connect { .. })));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn pipe_path_uses_runtime_dir_name() {
        let path = pipe_path("MoreVoiceLines");
        assert!(path.to_string_lossy().ends_with("MoreVoiceLines.sock"));
    }
}
