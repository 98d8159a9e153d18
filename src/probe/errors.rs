use std::path::PathBuf;

use crate::core::errors::WinprobeError;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to launch '{path}': {message}")]
    LaunchFailed { path: PathBuf, message: String },

    #[error("Failed to check process '{pid}': {message}")]
    WaitFailed { pid: u32, message: String },

    #[error("Failed to terminate process '{pid}': {message}")]
    TerminateFailed { pid: u32, message: String },
}

impl WinprobeError for ProbeError {
    fn error_code(&self) -> &'static str {
        match self {
            ProbeError::LaunchFailed { .. } => "PROBE_LAUNCH_FAILED",
            ProbeError::WaitFailed { .. } => "PROBE_WAIT_FAILED",
            ProbeError::TerminateFailed { .. } => "PROBE_TERMINATE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ProbeError::LaunchFailed { .. })
    }
}
