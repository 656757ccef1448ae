use std::path::Path;
use std::process::{Child, Command};

use tracing::{debug, info, warn};

/// The spawned audio player process.
///
/// The session can also attach to an already-running player; this type only
/// exists for the case where the host owns the worker's lifetime. The child
/// is killed when this handle is dropped so a host shutdown never leaves an
/// orphaned player behind.
pub struct WorkerProcess {
    child: Child,
}

impl WorkerProcess {
    /// Start the player executable.
    pub fn spawn(exe: impl AsRef<Path>) -> std::io::Result<Self> {
        let exe = exe.as_ref();
        let child = Command::new(exe).spawn()?;
        info!(pid = child.id(), ?exe, "started player process");
        Ok(Self { child })
    }

    /// OS process id of the player.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// True if the player has already exited on its own.
    pub fn has_exited(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(status) => status.is_some(),
            Err(err) => {
                warn!(error = %err, "could not poll player process");
                false
            }
        }
    }
}

impl Drop for WorkerProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            debug!(pid = self.child.id(), "killing player process");
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
