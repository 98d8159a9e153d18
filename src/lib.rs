//! winprobe: diagnostics for a macOS app's runtime state
//!
//! Two independent checkers behind one CLI:
//!
//! - [`inspect`] - query the UI-automation layer for the target app's
//!   windows and for its presence in the system menu bar
//! - [`probe`] - launch the target app's binary, observe it briefly,
//!   terminate it, and re-scan the process table

pub mod cli;
pub mod core;
pub mod inspect;
pub mod probe;

pub use cli::app::build_cli;
pub use cli::commands::run_command;
pub use core::logging::init_logging;
