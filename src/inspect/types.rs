/// One matching process as reported by the window query: its name, the
/// window count it reported, and the window titles that could be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessWindows {
    pub name: String,
    pub window_count: usize,
    pub window_titles: Vec<String>,
    /// Original summary item, kept when it did not parse as
    /// `"Name: N windows"`.
    pub raw_summary: Option<String>,
}

impl ProcessWindows {
    /// Console summary line: parsed summaries are reformatted, unparseable
    /// ones are reproduced verbatim.
    pub fn summary_line(&self) -> String {
        match &self.raw_summary {
            Some(raw) => raw.clone(),
            None => format!("{}: {} windows", self.name, self.window_count),
        }
    }
}

/// A single status-bar entry, classified against the marker/target strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBarEntry {
    pub title: String,
    pub matched: bool,
}

/// Window-query result: the per-process reports plus any warning text the
/// automation layer emitted on an otherwise successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowReport {
    pub processes: Vec<ProcessWindows>,
    pub warning: Option<String>,
}

/// Menu-bar-query result, same shape as [`WindowReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBarReport {
    pub entries: Vec<MenuBarEntry>,
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_parsed() {
        let process = ProcessWindows {
            name: "WindowPreview".to_string(),
            window_count: 2,
            window_titles: vec!["Main".to_string(), "Settings".to_string()],
            raw_summary: None,
        };
        assert_eq!(process.summary_line(), "WindowPreview: 2 windows");
    }

    #[test]
    fn test_summary_line_unparseable_is_verbatim() {
        let process = ProcessWindows {
            name: "WindowPreview: some windows".to_string(),
            window_count: 1,
            window_titles: vec!["Main".to_string()],
            raw_summary: Some("WindowPreview: some windows".to_string()),
        };
        // No re-appended ": N windows" suffix
        assert_eq!(process.summary_line(), "WindowPreview: some windows");
    }
}
