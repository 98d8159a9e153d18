use tracing::{info, warn};

use crate::core::config::TargetConfig;
use crate::inspect::errors::InspectError;
use crate::inspect::operations;
use crate::inspect::types::{MenuBarReport, WindowReport};

/// Query the UI-automation layer for processes matching the target name and
/// the windows they own.
pub fn inspect_windows(target: &TargetConfig) -> Result<WindowReport, InspectError> {
    info!(event = "inspect.window_query_started", target = %target.name);

    let script = operations::window_query_script(&target.name);
    let response = operations::run_automation_query(&script)?;
    let items = operations::split_items(&response.stdout);
    let processes = operations::parse_window_report(&items);

    if let Some(warning) = &response.warning {
        warn!(event = "inspect.window_query_warning", stderr = %warning);
    }

    info!(
        event = "inspect.window_query_completed",
        processes = processes.len()
    );

    Ok(WindowReport {
        processes,
        warning: response.warning,
    })
}

/// Query the status-bar host process for all menu bar entry titles,
/// classified against the marker and target strings.
pub fn inspect_menu_bar(target: &TargetConfig) -> Result<MenuBarReport, InspectError> {
    info!(event = "inspect.menu_bar_query_started", marker = %target.marker);

    let script = operations::menu_bar_query_script();
    let response = operations::run_automation_query(&script)?;
    let items = operations::split_items(&response.stdout);
    let entries = operations::classify_menu_entries(&items, &target.marker, &target.name);

    if let Some(warning) = &response.warning {
        warn!(event = "inspect.menu_bar_query_warning", stderr = %warning);
    }

    info!(
        event = "inspect.menu_bar_query_completed",
        entries = entries.len(),
        matches = entries.iter().filter(|e| e.matched).count()
    );

    Ok(MenuBarReport {
        entries,
        warning: response.warning,
    })
}
