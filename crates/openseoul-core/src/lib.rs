//! Openseoul Core - shared plumbing for the open-data archiver
//!
//! Synchronous HTTP facade over a shared async client, logging setup, and
//! progress reporting used by the dataset pipeline and the CLI.

pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use http::{get_json, HttpError};
pub use logging::init_logging;
pub use progress::ProgressContext;
