use std::thread;
use std::time::Duration;

use tracing::info;

use crate::core::config::{TargetConfig, TimingConfig};
use crate::probe::errors::ProbeError;
use crate::probe::operations::{self, LaunchedApp};
use crate::probe::types::{ProbeOutcome, ScanMatch};

/// Extra time allowed for the reader threads to deliver buffered output
/// after the child has been observed to exit.
const OUTPUT_GRACE: Duration = Duration::from_millis(500);

/// Launch the target executable with captured output streams.
pub fn launch_app(target: &TargetConfig) -> Result<LaunchedApp, ProbeError> {
    info!(
        event = "probe.launch_started",
        executable = %target.executable.display()
    );

    let app = operations::launch(&target.executable, &target.args)?;

    info!(event = "probe.launch_completed", pid = app.pid());

    Ok(app)
}

/// Observe a launched child for a bounded period and bring it down.
///
/// Sleeps the initialization wait, then polls liveness: an already-exited
/// child is reported with its final output; a live child gets a bounded
/// output drain, a termination signal, and an unbounded blocking reap.
pub fn observe(mut app: LaunchedApp, timing: &TimingConfig) -> Result<ProbeOutcome, ProbeError> {
    let pid = app.pid();

    thread::sleep(timing.init_wait());

    match app.try_exited()? {
        Some(status) => {
            let output = app.collect_output(OUTPUT_GRACE);

            info!(
                event = "probe.exited_early",
                pid,
                exit_code = status.code()
            );

            Ok(ProbeOutcome::ExitedEarly {
                exit_code: status.code(),
                output,
            })
        }
        None => {
            // Bounded drain: output only becomes available if the child
            // ends inside the window; expiry means no immediate output.
            let drained = match app.wait_for_exit(timing.drain_timeout())? {
                Some(_) => Some(app.collect_output(OUTPUT_GRACE)),
                None => None,
            };

            app.terminate()?;

            info!(event = "probe.terminated", pid, drained = drained.is_some());

            Ok(ProbeOutcome::Terminated { drained })
        }
    }
}

/// Scan the process table for anything matching the target name.
pub fn scan(target: &TargetConfig) -> Result<Vec<ScanMatch>, ProbeError> {
    info!(event = "probe.scan_started", target = %target.name);

    let matches = operations::find_processes_by_name(&target.name)?;

    info!(event = "probe.scan_completed", matches = matches.len());

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fast_timing() -> TimingConfig {
        TimingConfig {
            init_wait_secs: 0,
            drain_timeout_secs: 1,
        }
    }

    fn target_for(executable: &str, args: &[&str]) -> TargetConfig {
        let name = std::path::Path::new(executable)
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        TargetConfig {
            name,
            marker: "T".to_string(),
            executable: PathBuf::from(executable),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_launch_app_missing_executable() {
        let target = target_for("/nonexistent/binary", &[]);
        assert!(matches!(
            launch_app(&target),
            Err(ProbeError::LaunchFailed { .. })
        ));
    }

    #[test]
    fn test_observe_short_lived_child_exits_early() {
        let target = target_for("/bin/echo", &["startup complete"]);
        let app = launch_app(&target).expect("Failed to launch");

        // Give echo time to finish before the liveness poll
        thread::sleep(Duration::from_millis(300));

        let outcome = observe(app, &fast_timing()).expect("Failed to observe");
        match outcome {
            ProbeOutcome::ExitedEarly { exit_code, output } => {
                assert_eq!(exit_code, Some(0));
                assert!(output.stdout.contains("startup complete"));
            }
            other => panic!("Expected ExitedEarly, got {:?}", other),
        }
    }

    #[test]
    fn test_observe_long_lived_child_is_terminated() {
        let target = target_for("/bin/sleep", &["30"]);
        let app = launch_app(&target).expect("Failed to launch");
        let pid = app.pid();

        let outcome = observe(app, &fast_timing()).expect("Failed to observe");
        assert_eq!(outcome, ProbeOutcome::Terminated { drained: None });

        // The child was reaped before observe returned
        let matches = scan(&target_for("/bin/sleep", &[])).expect("Failed to scan");
        assert!(matches.iter().all(|m| m.pid != pid));
    }

    #[test]
    fn test_observe_child_ending_inside_drain_window() {
        let target = target_for("/bin/sleep", &["1"]);
        let app = launch_app(&target).expect("Failed to launch");

        let timing = TimingConfig {
            init_wait_secs: 0,
            drain_timeout_secs: 5,
        };
        let outcome = observe(app, &timing).expect("Failed to observe");
        match outcome {
            ProbeOutcome::Terminated { drained: Some(output) } => {
                assert!(output.is_empty());
            }
            other => panic!("Expected Terminated with drained output, got {:?}", other),
        }
    }
}
