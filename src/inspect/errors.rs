use crate::core::errors::WinprobeError;

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("Failed to execute osascript: {message}")]
    ExecutionFailed { message: String },

    #[error("AppleScript failed: {stderr}")]
    ScriptError { stderr: String },
}

impl WinprobeError for InspectError {
    fn error_code(&self) -> &'static str {
        match self {
            InspectError::ExecutionFailed { .. } => "INSPECT_EXECUTION_FAILED",
            InspectError::ScriptError { .. } => "INSPECT_SCRIPT_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = InspectError::ScriptError {
            stderr: "execution error".to_string(),
        };
        assert_eq!(err.error_code(), "INSPECT_SCRIPT_ERROR");
        assert!(!err.is_user_error());
    }
}
