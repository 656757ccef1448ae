use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use voicelines_session::{
    ContextSource, FixedContext, PlayerHandle, PlayerSession, RequestContext, RetryPolicy,
    SessionConfig, VoiceCatalog, WorkerProcess,
};

use crate::cmd::RunArgs;
use crate::exit::{io_error, CliError, CliResult, FAILURE, SUCCESS, TIMEOUT, USAGE};

pub fn run(args: RunArgs) -> CliResult<i32> {
    let catalog = Arc::new(
        VoiceCatalog::load(&args.metadata)
            .map_err(|err| io_error("failed loading metadata", err))?,
    );
    let context: Arc<dyn ContextSource> = Arc::new(FixedContext(RequestContext {
        elevated: args.elevated,
        secondary_voice: args.secondary_voice,
    }));

    // The worker handle must outlive the session; dropping it kills the
    // player process.
    let _worker = match &args.worker {
        Some(exe) => Some(
            WorkerProcess::spawn(exe).map_err(|err| io_error("failed starting player", err))?,
        ),
        None => None,
    };

    let mut config = SessionConfig {
        retry: RetryPolicy {
            attempts: args.connect_attempts,
            delay: Duration::from_millis(args.connect_delay_ms),
        },
        ..SessionConfig::default()
    };
    if let Some(path) = &args.player_pipe {
        config.player_pipe = path.clone();
    }
    if let Some(path) = &args.host_pipe {
        config.host_pipe = path.clone();
    }

    // IPC setup failure degrades playback to logged no-ops; it never takes
    // the host down.
    let (handle, dispatch) =
        match PlayerSession::establish(&config, Arc::clone(&catalog), Arc::clone(&context)) {
            Ok((session, handle)) => {
                let dispatch = std::thread::spawn(move || session.run_logged());
                (handle, Some(dispatch))
            }
            Err(err) => {
                error!(error = %err, "IPC setup failed, playback disabled");
                (PlayerHandle::unconnected(catalog, context), None)
            }
        };

    if let Some(uuid) = &args.play {
        return play_and_wait(&handle, uuid, Duration::from_secs(args.play_timeout));
    }

    if let Some(path) = &args.raw {
        if !handle.play_audio(&path.display().to_string()) {
            return Err(CliError::new(FAILURE, "raw audio request was not sent"));
        }
    }

    idle_until_interrupted(&handle, dispatch)
}

fn play_and_wait(handle: &PlayerHandle, uuid: &str, timeout: Duration) -> CliResult<i32> {
    let (tx, rx) = std::sync::mpsc::channel();
    let accepted = handle.try_play(
        uuid,
        Box::new(move || {
            let _ = tx.send(());
        }),
    );
    if !accepted {
        return Err(CliError::new(
            USAGE,
            format!("identifier not in catalog or player unreachable: {uuid}"),
        ));
    }

    match rx.recv_timeout(timeout) {
        Ok(()) => {
            info!(uuid, "recipe playback finished");
            Ok(SUCCESS)
        }
        Err(RecvTimeoutError::Timeout) => Err(CliError::new(
            TIMEOUT,
            format!("no completion within {timeout:?} for {uuid}"),
        )),
        Err(RecvTimeoutError::Disconnected) => {
            // Completion superseded or dropped with the session.
            warn!(uuid, "completion was dropped before firing");
            Ok(FAILURE)
        }
    }
}

fn idle_until_interrupted(
    handle: &PlayerHandle,
    dispatch: Option<std::thread::JoinHandle<()>>,
) -> CliResult<i32> {
    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    info!("session running, Ctrl-C to stop");
    while running.load(Ordering::SeqCst) {
        if let Some(thread) = &dispatch {
            if thread.is_finished() {
                info!("player session ended");
                break;
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    handle.stop();
    if let Some(thread) = dispatch {
        if thread.is_finished() {
            let _ = thread.join();
        }
    }
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
