/// Output captured from a launched child's standard streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

/// Terminal state of one probe run. A launch failure is reported as the
/// error arm of the launch step rather than an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The child exited before the initialization wait elapsed.
    ExitedEarly {
        exit_code: Option<i32>,
        output: CapturedOutput,
    },
    /// The child survived the initialization wait and was terminated.
    /// `drained` holds output captured when the child ended inside the
    /// drain window; `None` means no immediate output was available.
    Terminated { drained: Option<CapturedOutput> },
}

/// One process-table match from the post-run scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    pub pid: u32,
    pub name: String,
    pub status: String,
}
