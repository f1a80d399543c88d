//! # Cancellable Subprocesses
//!
//! Discovery sometimes has to ask the platform for data (`say -v ?` on macOS).
//! Instead of stashing the running child in a global so a signal handler can
//! find it, every subprocess helper takes a [`CancelToken`]. When the token
//! fires, the helper kills its own child and reports which signal asked for
//! shutdown, so the CLI can exit with the conventional `128 + signo` status.
//!
//! ```ignore
//! let cancellation = Cancellation::new();
//! let token = cancellation.token();
//! tokio::spawn(async move {
//!     let signal = shutdown_signal().await;
//!     cancellation.cancel(signal);
//! });
//! let stdout = run_command("say", &["-v", "?"], &token).await?;
//! ```

use std::fmt;
use std::io;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tokio::sync::watch;

/// The signal that requested shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Ctrl-C / SIGINT
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl ShutdownSignal {
    /// Process exit status for a shutdown triggered by this signal.
    pub fn exit_code(self) -> i32 {
        match self {
            ShutdownSignal::Interrupt => 130,
            ShutdownSignal::Terminate => 143,
        }
    }
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to collect output of `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` exited with status {}", describe_code(.code))]
    Failed { program: String, code: Option<i32> },
    #[error("`{program}` cancelled by {signal}")]
    Cancelled {
        program: String,
        signal: ShutdownSignal,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// Owner side of a cancellation: fires every token created from it.
#[derive(Debug)]
pub struct Cancellation {
    sender: watch::Sender<Option<ShutdownSignal>>,
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellation {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            receiver: self.sender.subscribe(),
        }
    }

    /// Cancel all tokens. The first signal wins.
    pub fn cancel(&self, signal: ShutdownSignal) {
        self.sender.send_if_modified(|state| {
            if state.is_some() {
                return false;
            }
            *state = Some(signal);
            true
        });
    }
}

/// Handle passed into anything that spawns a subprocess.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: watch::Receiver<Option<ShutdownSignal>>,
}

impl CancelToken {
    /// The signal that cancelled this token, if any.
    pub fn signal(&self) -> Option<ShutdownSignal> {
        *self.receiver.borrow()
    }

    /// Resolve once cancelled. Never resolves if the owning [`Cancellation`]
    /// is dropped without firing.
    pub async fn cancelled(&mut self) -> ShutdownSignal {
        loop {
            if let Some(signal) = *self.receiver.borrow_and_update() {
                return signal;
            }
            if self.receiver.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Wait for Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() -> ShutdownSignal {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => ShutdownSignal::Interrupt,
                    _ = terminate.recv() => ShutdownSignal::Terminate,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                ShutdownSignal::Interrupt
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        ShutdownSignal::Interrupt
    }
}

/// Run `program` to completion and return its stdout.
///
/// Stdin is closed and stderr captured. A non-zero exit is an error. If
/// `token` fires first the child is killed and [`CommandError::Cancelled`] is
/// returned.
pub async fn run_command(
    program: &str,
    args: &[&str],
    token: &CancelToken,
) -> Result<String, CommandError> {
    if let Some(signal) = token.signal() {
        return Err(CommandError::Cancelled {
            program: program.to_string(),
            signal,
        });
    }

    tracing::debug!(program, ?args, "spawning subprocess");
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let mut token = token.clone();
    tokio::select! {
        output = child.wait_with_output() => {
            let output = output.map_err(|source| CommandError::Io {
                program: program.to_string(),
                source,
            })?;
            if !output.status.success() {
                return Err(CommandError::Failed {
                    program: program.to_string(),
                    code: output.status.code(),
                });
            }
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        signal = token.cancelled() => {
            // Dropping the wait future drops the child, and kill_on_drop
            // delivers SIGKILL to it.
            tracing::warn!(program, %signal, "cancelling subprocess");
            Err(CommandError::Cancelled {
                program: program.to_string(),
                signal,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_exit_codes_follow_signal_numbers() {
        assert_eq!(ShutdownSignal::Interrupt.exit_code(), 128 + 2);
        assert_eq!(ShutdownSignal::Terminate.exit_code(), 128 + 15);
    }

    #[test]
    fn test_first_cancel_wins() {
        let cancellation = Cancellation::new();
        let token = cancellation.token();
        assert_eq!(token.signal(), None);

        cancellation.cancel(ShutdownSignal::Terminate);
        cancellation.cancel(ShutdownSignal::Interrupt);
        assert_eq!(token.signal(), Some(ShutdownSignal::Terminate));
    }

    #[tokio::test]
    async fn test_already_cancelled_token_skips_spawn() {
        let cancellation = Cancellation::new();
        cancellation.cancel(ShutdownSignal::Interrupt);
        let err = run_command("definitely-not-a-real-binary", &[], &cancellation.token())
            .await
            .expect_err("cancelled before spawn");
        assert!(matches!(
            err,
            CommandError::Cancelled {
                signal: ShutdownSignal::Interrupt,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let cancellation = Cancellation::new();
        let err = run_command("definitely-not-a-real-binary", &[], &cancellation.token())
            .await
            .expect_err("binary does not exist");
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_is_returned() {
        let cancellation = Cancellation::new();
        let out = run_command("sh", &["-c", "echo hello"], &cancellation.token())
            .await
            .expect("sh runs");
        assert_eq!(out, "hello\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let cancellation = Cancellation::new();
        let err = run_command("sh", &["-c", "exit 3"], &cancellation.token())
            .await
            .expect_err("non-zero exit");
        assert!(matches!(err, CommandError::Failed { code: Some(3), .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cancellation_kills_running_child() {
        let cancellation = Cancellation::new();
        let token = cancellation.token();

        let started = Instant::now();
        let run = tokio::spawn(async move { run_command("sleep", &["30"], &token).await });
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancellation.cancel(ShutdownSignal::Terminate);

        let err = run
            .await
            .expect("task joins")
            .expect_err("cancelled while running");
        assert!(matches!(
            err,
            CommandError::Cancelled {
                signal: ShutdownSignal::Terminate,
                ..
            }
        ));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
