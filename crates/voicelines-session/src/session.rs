use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, warn};
use voicelines_pipe::{PipeEndpoint, PipeStream};
use voicelines_wire::{Frame, FrameReader, FrameWriter, MessageKind, PayloadReader, PayloadWriter};

use crate::catalog::VoiceCatalog;
use crate::config::SessionConfig;
use crate::connector::connect_with_retry;
use crate::context::ContextSource;
use crate::error::{Result, SessionError};

/// Completion notification for the current recipe.
///
/// At most one is outstanding; a new request silently supersedes it, and
/// `Option::take` in the shared slot guarantees it fires at most once no
/// matter whether the dispatch loop or a local `stop()` resolves it.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// State shared between the dispatch loop and request handles.
///
/// The dispatch loop runs on its own thread while the host calls in from
/// wherever it likes, so both the outbound writer and the pending slot sit
/// behind mutexes.
struct SessionShared {
    writer: Mutex<Option<FrameWriter<PipeStream>>>,
    pending: Mutex<Option<Completion>>,
}

impl SessionShared {
    fn unconnected() -> Self {
        Self {
            writer: Mutex::new(None),
            pending: Mutex::new(None),
        }
    }

    fn send(&self, kind: MessageKind, payload: &[u8]) -> bool {
        let mut guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(writer) = guard.as_mut() else {
            warn!(kind = kind.name(), "player pipe not connected, dropping message");
            return false;
        };
        match writer.send(kind, payload) {
            Ok(()) => true,
            Err(err) => {
                warn!(kind = kind.name(), error = %err, "failed to send message to player");
                false
            }
        }
    }

    fn set_pending(&self, completion: Completion) {
        let mut slot = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.replace(completion).is_some() {
            debug!("superseding pending recipe completion");
        }
    }

    fn take_pending(&self) -> Option<Completion> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn disconnect(&self) {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn is_connected(&self) -> bool {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// The host's request surface toward the player.
///
/// Cheap to clone; every clone talks to the same session. When the session
/// was never established (or the player went away) all sends degrade into
/// logged no-ops that return `false`.
#[derive(Clone)]
pub struct PlayerHandle {
    shared: Arc<SessionShared>,
    catalog: Arc<VoiceCatalog>,
    context: Arc<dyn ContextSource>,
}

impl PlayerHandle {
    /// A handle with no live session behind it.
    ///
    /// Used when IPC setup failed: the host keeps running and playback
    /// requests become logged warnings.
    pub fn unconnected(catalog: Arc<VoiceCatalog>, context: Arc<dyn ContextSource>) -> Self {
        Self {
            shared: Arc::new(SessionShared::unconnected()),
            catalog,
            context,
        }
    }

    /// True while the outbound command pipe is writable.
    pub fn is_connected(&self) -> bool {
        self.shared.is_connected()
    }

    /// Request playback of a voice-line recipe.
    ///
    /// Returns `false` without sending anything when the identifier is not
    /// in the catalog. Otherwise the completion is registered (superseding
    /// any earlier one) and a `PlayRecipe` frame carrying the identifier and
    /// the request-time context flags goes out. `true` means the frame was
    /// dispatched, not that playback finished; completion arrives later via
    /// `FinishedRecipe` or a local [`stop`](Self::stop).
    pub fn try_play(&self, id: &str, on_complete: Completion) -> bool {
        if !self.catalog.contains(id) {
            debug!(id, "identifier not in catalog, ignoring play request");
            return false;
        }

        self.shared.set_pending(on_complete);

        let ctx = self.context.request_context();
        let mut payload = PayloadWriter::new();
        if let Err(err) = payload.write_string(id) {
            warn!(id, error = %err, "could not encode recipe request");
            return false;
        }
        payload.write_bool(ctx.elevated).write_bool(ctx.secondary_voice);

        debug!(id, ?ctx, "requesting recipe playback");
        self.shared
            .send(MessageKind::PlayRecipe, &payload.into_bytes())
    }

    /// Request playback of a raw audio file. Leaves the pending completion
    /// slot untouched.
    pub fn play_audio(&self, path: &str) -> bool {
        let mut payload = PayloadWriter::new();
        if let Err(err) = payload.write_string(path) {
            warn!(path, error = %err, "could not encode audio request");
            return false;
        }

        debug!(path, "requesting raw audio playback");
        self.shared
            .send(MessageKind::PlayAudio, &payload.into_bytes())
    }

    /// Stop playback.
    ///
    /// Any pending completion fires immediately on the caller's thread,
    /// without waiting for the player's acknowledgment. A late
    /// `FinishedRecipe` then finds the slot empty and is a no-op.
    pub fn stop(&self) {
        debug!("stopping audio and recipe playback");
        self.shared.send(MessageKind::StopAudio, &[]);

        if let Some(done) = self.shared.take_pending() {
            done();
        }
    }
}

/// An established session with one player worker.
///
/// Owns the inbound notification connection; [`run`](Self::run) is the
/// dispatch loop and consumes the session.
pub struct PlayerSession {
    reader: FrameReader<PipeStream>,
    loopback: FrameWriter<PipeStream>,
    shared: Arc<SessionShared>,
}

impl PlayerSession {
    /// Establish both halves of the duplex channel.
    ///
    /// Connects out to the player (bounded retry), then listens on the host
    /// pipe and blocks without a timeout until the player connects back. A
    /// successful accept is the connected state; there is no separate probe.
    pub fn establish(
        config: &SessionConfig,
        catalog: Arc<VoiceCatalog>,
        context: Arc<dyn ContextSource>,
    ) -> Result<(PlayerSession, PlayerHandle)> {
        let outbound = connect_with_retry(&config.player_pipe, &config.retry)?;
        info!(path = ?config.player_pipe, "player pipe connected");

        let endpoint = PipeEndpoint::bind(&config.host_pipe)?;
        info!(path = ?config.host_pipe, "host endpoint listening, waiting for player");
        let inbound = endpoint.accept()?;
        info!("player connected to host endpoint");

        let shared = Arc::new(SessionShared {
            writer: Mutex::new(Some(FrameWriter::new(outbound))),
            pending: Mutex::new(None),
        });
        let loopback = FrameWriter::new(inbound.try_clone()?);
        let handle = PlayerHandle {
            shared: Arc::clone(&shared),
            catalog,
            context,
        };

        Ok((
            Self {
                reader: FrameReader::new(inbound),
                loopback,
                shared,
            },
            handle,
        ))
    }

    /// Receive-dispatch loop: one frame per iteration, strictly in arrival
    /// order, until the player disconnects or the stream fails.
    pub fn run(mut self) -> Result<()> {
        loop {
            let frame = match self.reader.read_frame() {
                Ok(frame) => frame,
                Err(voicelines_wire::WireError::Closed) => {
                    info!("notification pipe closed by player");
                    self.shared.disconnect();
                    return Ok(());
                }
                Err(err) => {
                    self.shared.disconnect();
                    return Err(SessionError::Wire(err));
                }
            };

            debug!(
                tag = frame.raw_kind,
                len = frame.payload.len(),
                "handling message"
            );

            match frame.kind() {
                Some(MessageKind::None) => {}
                Some(kind @ (MessageKind::Disconnected | MessageKind::Exit)) => {
                    info!(kind = kind.name(), "player requested shutdown");
                    self.shared.disconnect();
                    return Ok(());
                }
                Some(MessageKind::FinishedAudio) => {}
                Some(MessageKind::FinishedRecipe) => {
                    if let Some(done) = self.shared.take_pending() {
                        done();
                    }
                }
                Some(MessageKind::EchoResponse) => {
                    let mut reader = PayloadReader::new(frame.payload.clone());
                    match reader
                        .read_u16()
                        .and_then(|len| reader.read_bytes(len as usize))
                    {
                        Ok(bytes) => debug!(len = bytes.len(), "echo response received"),
                        Err(err) => warn!(error = %err, "malformed echo response"),
                    }
                }
                Some(MessageKind::EchoRequest) => {
                    let reply = Frame::new(MessageKind::EchoResponse, frame.payload.clone());
                    if let Err(err) = self.loopback.write_frame(&reply) {
                        warn!(error = %err, "failed to answer echo request");
                    }
                }
                Some(kind @ (MessageKind::PlayAudio
                | MessageKind::PlayRecipe
                | MessageKind::StopAudio)) => {
                    // Host-bound commands have no business on the
                    // notification pipe.
                    warn!(kind = kind.name(), "unexpected command from player");
                }
                None => {
                    warn!(tag = frame.raw_kind, "unknown message from player");
                }
            }
        }
    }

    /// Run the dispatch loop, absorbing errors at the IPC boundary.
    ///
    /// Stream failures are logged and turn into a clean shutdown of the IPC
    /// flow; they must never reach the host's main control flow.
    pub fn run_logged(self) {
        if let Err(err) = self.run() {
            error!(error = %err, "player session ended with error");
        }
    }
}
