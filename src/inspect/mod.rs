pub mod errors;
pub mod handler;
pub mod operations;
pub mod types;

pub use errors::InspectError;
pub use types::{MenuBarEntry, MenuBarReport, ProcessWindows, WindowReport};
