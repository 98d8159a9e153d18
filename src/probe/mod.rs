pub mod errors;
pub mod handler;
pub mod operations;
pub mod types;

pub use errors::ProbeError;
pub use types::{CapturedOutput, ProbeOutcome, ScanMatch};
