use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

pub fn build_cli() -> Command {
    Command::new("winprobe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Diagnose a macOS app's windows, menu bar presence, and launch behavior")
        .long_about(
            "Winprobe runs two independent diagnostics against a target application: \
             'inspect' queries the UI-automation layer for the app's windows and its \
             menu bar entry, and 'launch' starts the app's binary, observes it briefly, \
             terminates it, and re-scans the process table. Both are best-effort and \
             always run to completion.",
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only emit error-level log output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("inspect")
                .about("Query the UI-automation layer for windows and menu bar entries")
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Process name substring to match (overrides config)"),
                )
                .arg(
                    Arg::new("marker")
                        .long("marker")
                        .short('m')
                        .help("Menu bar marker string to highlight (overrides config)"),
                ),
        )
        .subcommand(
            Command::new("launch")
                .about("Launch the target binary, observe it, terminate it, and scan the process table")
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .help("Process name substring for the final scan (overrides config)"),
                )
                .arg(
                    Arg::new("executable")
                        .long("executable")
                        .short('e')
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to the binary to launch (overrides config)"),
                )
                .arg(
                    Arg::new("init-wait")
                        .long("init-wait")
                        .value_parser(value_parser!(u64))
                        .help("Seconds to wait after launch before the liveness check (overrides config)"),
                )
                .arg(
                    Arg::new("drain-timeout")
                        .long("drain-timeout")
                        .value_parser(value_parser!(u64))
                        .help("Seconds to wait for buffered output from a live child (overrides config)"),
                )
                .arg(
                    Arg::new("args")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true)
                        .help("Arguments passed to the launched binary"),
                ),
        )
}
