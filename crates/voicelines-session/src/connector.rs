use std::path::Path;

use tracing::debug;
use voicelines_pipe::PipeStream;

use crate::config::RetryPolicy;
use crate::error::{Result, SessionError};

/// Connect to the player's listening pipe with a bounded retry budget.
///
/// Each attempt is preceded by the policy delay so a freshly spawned player
/// has time to start listening. On Unix a connect to a non-listening path
/// fails immediately, so the delay is also the effective per-attempt pacing.
pub fn connect_with_retry(path: impl AsRef<Path>, retry: &RetryPolicy) -> Result<PipeStream> {
    let path = path.as_ref();
    for attempt in 1..=retry.attempts {
        std::thread::sleep(retry.delay);
        match voicelines_pipe::connect(path) {
            Ok(stream) => {
                debug!(attempt, ?path, "player pipe connected");
                return Ok(stream);
            }
            Err(err) => {
                debug!(
                    attempt,
                    max = retry.attempts,
                    error = %err,
                    "player pipe connect failed"
                );
            }
        }
    }
    Err(SessionError::ConnectionExhausted {
        attempts: retry.attempts,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use voicelines_pipe::PipeEndpoint;

    use super::*;

    fn temp_sock(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vl-conn-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir.join("player.sock")
    }

    #[test]
    fn exhausts_default_budget_against_absent_listener() {
        let path = temp_sock("absent");
        let retry = RetryPolicy::default();

        let start = Instant::now();
        let err = connect_with_retry(&path, &retry).unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(
            err,
            SessionError::ConnectionExhausted { attempts: 10 }
        ));
        // 10 attempts, each preceded by a 100ms delay.
        assert!(
            elapsed >= Duration::from_millis(900),
            "elapsed {elapsed:?} too short for 10 paced attempts"
        );
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn succeeds_when_listener_appears_mid_budget() {
        let path = temp_sock("late");
        let retry = RetryPolicy {
            attempts: 20,
            delay: Duration::from_millis(20),
        };

        let bind_path = path.clone();
        let listener = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            let endpoint = PipeEndpoint::bind(&bind_path).unwrap();
            endpoint.accept().unwrap()
        });

        let stream = connect_with_retry(&path, &retry);
        assert!(stream.is_ok());
        listener.join().unwrap();
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn connects_on_first_attempt_when_listening() {
        let path = temp_sock("ready");
        let endpoint = PipeEndpoint::bind(&path).unwrap();
        let retry = RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(10),
        };

        let stream = connect_with_retry(&path, &retry);
        assert!(stream.is_ok());
        drop(endpoint);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
