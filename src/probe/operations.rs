use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use sysinfo::{ProcessesToUpdate, System};
use tracing::debug;

use crate::probe::errors::ProbeError;
use crate::probe::types::{CapturedOutput, ScanMatch};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A launched child process with its standard streams owned by background
/// reader threads. The readers buffer everything until pipe EOF, so output
/// becomes collectable once the child (and anything holding its pipes)
/// exits.
pub struct LaunchedApp {
    child: Child,
    stdout_rx: Receiver<String>,
    stderr_rx: Receiver<String>,
}

/// Spawn the target executable with stdout/stderr redirected to capturable
/// buffers.
pub fn launch(path: &Path, args: &[String]) -> Result<LaunchedApp, ProbeError> {
    let mut child = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ProbeError::LaunchFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let stdout_rx = spawn_reader(child.stdout.take());
    let stderr_rx = spawn_reader(child.stderr.take());

    debug!(event = "probe.child_spawned", pid = child.id());

    Ok(LaunchedApp {
        child,
        stdout_rx,
        stderr_rx,
    })
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    if let Some(mut pipe) = pipe {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            let _ = tx.send(buf);
        });
    }
    rx
}

impl LaunchedApp {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Non-blocking liveness poll: `Some(status)` if the child has exited.
    pub fn try_exited(&mut self) -> Result<Option<ExitStatus>, ProbeError> {
        self.child.try_wait().map_err(|e| ProbeError::WaitFailed {
            pid: self.child.id(),
            message: e.to_string(),
        })
    }

    /// Wait up to `timeout` for the child to exit. Expiry is a normal
    /// outcome (`Ok(None)`), not an error.
    pub fn wait_for_exit(&mut self, timeout: Duration) -> Result<Option<ExitStatus>, ProbeError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.try_exited()? {
                return Ok(Some(status));
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(None);
            }
            thread::sleep(remaining.min(EXIT_POLL_INTERVAL));
        }
    }

    /// Collect whatever the reader threads have buffered, waiting at most
    /// `grace` per stream. A stream that has not reached EOF yet yields an
    /// empty string.
    pub fn collect_output(&mut self, grace: Duration) -> CapturedOutput {
        let recv = |rx: &Receiver<String>| match rx.recv_timeout(grace) {
            Ok(buf) => buf,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => String::new(),
        };

        CapturedOutput {
            stdout: recv(&self.stdout_rx),
            stderr: recv(&self.stderr_rx),
        }
    }

    /// Terminate the child and block until it is reaped.
    ///
    /// The termination signal is only sent if a liveness poll says the
    /// child is still running; an already-exited child is just reaped.
    pub fn terminate(&mut self) -> Result<ExitStatus, ProbeError> {
        let pid = self.child.id();

        if self.try_exited()?.is_none() {
            send_terminate_signal(pid)?;
            debug!(event = "probe.terminate_signal_sent", pid);
        }

        self.child.wait().map_err(|e| ProbeError::WaitFailed {
            pid,
            message: e.to_string(),
        })
    }
}

#[cfg(unix)]
fn send_terminate_signal(pid: u32) -> Result<(), ProbeError> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(|e| ProbeError::TerminateFailed {
        pid,
        message: e.to_string(),
    })
}

#[cfg(not(unix))]
fn send_terminate_signal(_pid: u32) -> Result<(), ProbeError> {
    // No SIGTERM equivalent; the blocking reap in terminate() still runs.
    Ok(())
}

/// Scan the process table for processes whose name contains `pattern`,
/// excluding the scanner itself. Matches are ordered by PID.
pub fn find_processes_by_name(pattern: &str) -> Result<Vec<ScanMatch>, ProbeError> {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    let own_pid = std::process::id();
    let mut matches: Vec<ScanMatch> = system
        .processes()
        .iter()
        .filter(|(pid, _)| pid.as_u32() != own_pid)
        .filter_map(|(pid, process)| {
            let name = process.name().to_string_lossy();
            name.contains(pattern).then(|| ScanMatch {
                pid: pid.as_u32(),
                name: name.to_string(),
                status: process.status().to_string(),
            })
        })
        .collect();

    matches.sort_by_key(|m| m.pid);
    Ok(matches)
}
