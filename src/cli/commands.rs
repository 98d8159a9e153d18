use clap::ArgMatches;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::core::config::WinprobeConfig;
use crate::core::events;
use crate::inspect::handler as inspect_handler;
use crate::probe::handler as probe_handler;
use crate::probe::types::{CapturedOutput, ProbeOutcome};

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let result = match matches.subcommand() {
        Some(("inspect", sub_matches)) => handle_inspect_command(sub_matches),
        Some(("launch", sub_matches)) => handle_launch_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown();

    result
}

fn load_config() -> WinprobeConfig {
    match WinprobeConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            warn!(event = "cli.config_load_failed", error = %e);
            println!("⚠️  Config error, using defaults: {}", e);
            WinprobeConfig::default()
        }
    }
}

fn apply_inspect_overrides(config: &mut WinprobeConfig, matches: &ArgMatches) {
    if let Some(target) = matches.get_one::<String>("target") {
        config.target.name = target.clone();
    }
    if let Some(marker) = matches.get_one::<String>("marker") {
        config.target.marker = marker.clone();
    }
}

fn apply_launch_overrides(config: &mut WinprobeConfig, matches: &ArgMatches) {
    if let Some(target) = matches.get_one::<String>("target") {
        config.target.name = target.clone();
    }
    if let Some(executable) = matches.get_one::<PathBuf>("executable") {
        config.target.executable = executable.clone();
    }
    if let Some(args) = matches.get_many::<String>("args") {
        config.target.args = args.cloned().collect();
    }
    if let Some(init_wait) = matches.get_one::<u64>("init-wait") {
        config.timing.init_wait_secs = *init_wait;
    }
    if let Some(drain_timeout) = matches.get_one::<u64>("drain-timeout") {
        config.timing.drain_timeout_secs = *drain_timeout;
    }
}

/// Run both automation queries and print the reports. The two queries are
/// independent: a failure in either is printed and the other still runs,
/// so the command always completes successfully.
fn handle_inspect_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config();
    apply_inspect_overrides(&mut config, matches);

    info!(
        event = "cli.inspect_started",
        target = %config.target.name,
        marker = %config.target.marker
    );

    println!(
        "🔍 Checking for {} windows and menu bar items...",
        config.target.name
    );

    match inspect_handler::inspect_windows(&config.target) {
        Ok(report) => {
            if report.processes.is_empty() {
                println!("❌ No {} windows found", config.target.name);
            } else {
                println!("✅ Found {} process info:", config.target.name);
                for process in &report.processes {
                    println!("  {}", process.summary_line());
                    for title in &process.window_titles {
                        println!("    Window: {}", title);
                    }
                }
            }
            if let Some(warning) = &report.warning {
                println!("❌ AppleScript error: {}", warning);
            }
        }
        Err(e) => {
            println!("❌ AppleScript error: {}", e);
            error!(event = "cli.inspect_window_query_failed", error = %e);
            events::log_app_error(&e);
        }
    }

    println!();
    println!(
        "🔍 Checking menu bar for '{}' text...",
        config.target.marker
    );

    match inspect_handler::inspect_menu_bar(&config.target) {
        Ok(report) => {
            if report.entries.is_empty() {
                println!("❌ Could not read menu bar items");
            } else {
                println!("✅ Menu bar items found:");
                let mut found_marker = false;
                for entry in &report.entries {
                    if entry.matched {
                        println!("  🎯 FOUND: {}", entry.title);
                        found_marker = true;
                    } else {
                        println!("    {}", entry.title);
                    }
                }
                if !found_marker {
                    println!(
                        "❌ No '{}' or {} found in menu bar",
                        config.target.marker, config.target.name
                    );
                }
            }
            if let Some(warning) = &report.warning {
                println!("❌ AppleScript error: {}", warning);
            }
        }
        Err(e) => {
            println!("❌ Could not read menu bar items: {}", e);
            error!(event = "cli.inspect_menu_bar_query_failed", error = %e);
            events::log_app_error(&e);
        }
    }

    info!(event = "cli.inspect_completed");

    Ok(())
}

/// Run the launch probe and the unconditional process-table scan. Every
/// failure is printed at its point of occurrence; nothing aborts the run.
fn handle_launch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config();
    apply_launch_overrides(&mut config, matches);

    info!(
        event = "cli.launch_started",
        target = %config.target.name,
        executable = %config.target.executable.display()
    );

    println!("🧪 Testing {} launch...", config.target.name);
    println!("{}", "=".repeat(50));

    match probe_handler::launch_app(&config.target) {
        Ok(app) => {
            println!(
                "✅ App launched, waiting {} seconds for initialization...",
                config.timing.init_wait_secs
            );

            match probe_handler::observe(app, &config.timing) {
                Ok(ProbeOutcome::ExitedEarly { exit_code, output }) => {
                    println!("❌ App exited immediately");
                    print_output_sections(&output);
                    info!(event = "cli.launch_exited_early", exit_code = exit_code);
                }
                Ok(ProbeOutcome::Terminated { drained }) => {
                    println!("✅ App is still running");
                    match &drained {
                        Some(output) => print_output_sections(output),
                        None => println!("⏰ App is running but no immediate output"),
                    }
                    println!("🛑 App terminated");
                    info!(event = "cli.launch_terminated");
                }
                Err(e) => {
                    println!("❌ Error: {}", e);
                    error!(event = "cli.launch_observe_failed", error = %e);
                    events::log_app_error(&e);
                }
            }
        }
        Err(e) => {
            println!("❌ Launch error: {}", e);
            error!(event = "cli.launch_failed", error = %e);
            events::log_app_error(&e);
        }
    }

    println!("{}", "=".repeat(50));
    println!(
        "🔍 Now checking if any {} processes are running...",
        config.target.name
    );

    match probe_handler::scan(&config.target) {
        Ok(matches) if matches.is_empty() => {
            println!("❌ No {} processes found", config.target.name);
        }
        Ok(matches) => {
            println!("✅ Found {} processes:", config.target.name);
            for m in &matches {
                println!("  {} {} ({})", m.pid, m.name, m.status);
            }
        }
        Err(e) => {
            println!("❌ Error checking processes: {}", e);
            error!(event = "cli.launch_scan_failed", error = %e);
            events::log_app_error(&e);
        }
    }

    info!(event = "cli.launch_completed");

    Ok(())
}

fn print_output_sections(output: &CapturedOutput) {
    if !output.stdout.is_empty() {
        println!("📝 STDOUT:");
        println!("{}", output.stdout);
    }
    if !output.stderr.is_empty() {
        println!("❌ STDERR:");
        println!("{}", output.stderr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::app::build_cli;

    fn inspect_matches(argv: Vec<&str>) -> ArgMatches {
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        matches.subcommand_matches("inspect").unwrap().clone()
    }

    fn launch_matches(argv: Vec<&str>) -> ArgMatches {
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        matches.subcommand_matches("launch").unwrap().clone()
    }

    #[test]
    fn test_apply_inspect_overrides() {
        let mut config = WinprobeConfig::default();
        let sub = inspect_matches(vec!["winprobe", "inspect", "-t", "OtherApp", "-m", "OA"]);

        apply_inspect_overrides(&mut config, &sub);
        assert_eq!(config.target.name, "OtherApp");
        assert_eq!(config.target.marker, "OA");
    }

    #[test]
    fn test_apply_inspect_overrides_keeps_defaults() {
        let mut config = WinprobeConfig::default();
        let sub = inspect_matches(vec!["winprobe", "inspect"]);

        apply_inspect_overrides(&mut config, &sub);
        assert_eq!(config.target.name, "WindowPreview");
        assert_eq!(config.target.marker, "WP");
    }

    #[test]
    fn test_apply_launch_overrides() {
        let mut config = WinprobeConfig::default();
        let sub = launch_matches(vec![
            "winprobe",
            "launch",
            "-e",
            "/tmp/app",
            "--init-wait",
            "1",
            "--drain-timeout",
            "4",
            "--",
            "--flag",
        ]);

        apply_launch_overrides(&mut config, &sub);
        assert_eq!(config.target.executable, PathBuf::from("/tmp/app"));
        assert_eq!(config.target.args, vec!["--flag"]);
        assert_eq!(config.timing.init_wait_secs, 1);
        assert_eq!(config.timing.drain_timeout_secs, 4);
    }
}
