use std::process::Command;
use tracing::debug;

use crate::inspect::errors::InspectError;
use crate::inspect::types::{MenuBarEntry, ProcessWindows};

/// Escape a string for use in AppleScript.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Build the System Events query listing, for every process whose name
/// contains `target`, a summary item plus one item per readable window
/// title. The inner `try` skips windows whose title cannot be read without
/// aborting the rest of the enumeration.
pub fn window_query_script(target: &str) -> String {
    format!(
        r#"tell application "System Events"
    set windowList to {{}}
    repeat with p in processes
        if name of p contains "{target}" then
            set end of windowList to (name of p & ": " & (count of windows of p) & " windows")
            repeat with w in windows of p
                try
                    set end of windowList to ("  Window: " & title of w)
                end try
            end repeat
        end if
    end repeat
    return windowList
end tell"#,
        target = applescript_escape(target)
    )
}

/// Build the System Events query listing the titles of every menu bar item
/// hosted by SystemUIServer, the status-bar host process.
pub fn menu_bar_query_script() -> String {
    r#"tell application "System Events"
    tell process "SystemUIServer"
        set menuItems to {}
        try
            repeat with menuExtra in menu bar items of menu bar 1
                set end of menuItems to title of menuExtra
            end repeat
        end try
        return menuItems
    end tell
end tell"#
        .to_string()
}

/// Result of one automation query: the trimmed stdout blob plus any
/// warning text the interpreter wrote to stderr on a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationResponse {
    pub stdout: String,
    pub warning: Option<String>,
}

/// Execute an automation query via `osascript -e`.
///
/// A spawn failure or non-success exit is an error. An empty stdout with a
/// clean exit is a valid "no results" response, and stderr text from a
/// successful run is kept as a warning rather than discarding the results.
pub fn run_automation_query(script: &str) -> Result<AutomationResponse, InspectError> {
    debug!(event = "inspect.automation_query_executing");

    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .map_err(|e| InspectError::ExecutionFailed {
            message: e.to_string(),
        })?;

    interpret_automation_output(&output)
}

fn interpret_automation_output(
    output: &std::process::Output,
) -> Result<AutomationResponse, InspectError> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();

    if !output.status.success() {
        return Err(InspectError::ScriptError {
            stderr: stderr.to_string(),
        });
    }

    Ok(AutomationResponse {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        warning: (!stderr.is_empty()).then(|| stderr.to_string()),
    })
}

/// Split an automation response blob into its items.
///
/// osascript renders a list result as a single line joined by `", "`, so
/// this is a textual heuristic, not a structured parse: any title that
/// itself contains `", "` will be misparsed into multiple items. Known
/// limitation of the automation interface's text output.
pub fn split_items(blob: &str) -> Vec<String> {
    let trimmed = blob.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(", ").map(|s| s.to_string()).collect()
}

/// Group the flattened window-query items back into per-process reports.
///
/// Summary items look like `"Name: N windows"`; each is followed by zero or
/// more `"  Window: <title>"` items for that process. Window items with no
/// preceding summary, or summaries whose count cannot be parsed, are
/// handled best-effort: orphans are dropped and an unparseable count falls
/// back to the number of titles actually read.
pub fn parse_window_report(items: &[String]) -> Vec<ProcessWindows> {
    struct Partial {
        name: String,
        reported_count: Option<usize>,
        window_titles: Vec<String>,
        raw_summary: Option<String>,
    }

    let mut partials: Vec<Partial> = Vec::new();

    for item in items {
        if let Some(title) = item.trim_start().strip_prefix("Window: ") {
            if let Some(current) = partials.last_mut() {
                current.window_titles.push(title.to_string());
            }
            continue;
        }

        let (name, reported_count, raw_summary) = match item
            .strip_suffix(" windows")
            .and_then(|rest| rest.rsplit_once(": "))
            .and_then(|(name, count)| count.parse::<usize>().ok().map(|c| (name, c)))
        {
            Some((name, count)) => (name.to_string(), Some(count), None),
            None => (item.clone(), None, Some(item.clone())),
        };

        partials.push(Partial {
            name,
            reported_count,
            window_titles: Vec::new(),
            raw_summary,
        });
    }

    partials
        .into_iter()
        .map(|p| {
            let window_count = p.reported_count.unwrap_or(p.window_titles.len());
            ProcessWindows {
                name: p.name,
                window_count,
                window_titles: p.window_titles,
                raw_summary: p.raw_summary,
            }
        })
        .collect()
}

/// Classify every menu-bar title exactly once, preserving order.
///
/// An entry matches if it contains the marker string (case-sensitive) or
/// the target name (case-insensitive).
pub fn classify_menu_entries(items: &[String], marker: &str, target: &str) -> Vec<MenuBarEntry> {
    let target_lower = target.to_lowercase();
    items
        .iter()
        .map(|title| MenuBarEntry {
            title: title.clone(),
            matched: title.contains(marker) || title.to_lowercase().contains(&target_lower),
        })
        .collect()
}
