//! Openseoul Dataset - paginated fetch and CSV archive of one open-data set
//!
//! Walks `{base_url}/{start}/{end}/` ranges until `list_total_count` is
//! exhausted, then writes the accumulated rows as a sorted, BOM-prefixed
//! CSV file.
//!
//! # Example
//!
//! ```ignore
//! use openseoul_core::ProgressContext;
//! use openseoul_dataset::{run, Config};
//!
//! let config = Config {
//!     base_url: "http://openapi.seoul.go.kr:8088/KEY/json/VwsmTrdarSelngQq".into(),
//!     ..Default::default()
//! };
//!
//! let summary = run(&config, "VwsmTrdarSelngQq.csv", &ProgressContext::new())?;
//! println!("{} records archived", summary.fetched_records);
//! ```

pub mod api;
pub mod config;
pub mod envelope;
pub mod export;
pub mod pager;
pub mod record;
pub mod runner;

// Re-exports
pub use api::Client;
pub use config::Config;
pub use envelope::{Envelope, EnvelopeError};
pub use export::{write_csv, SORT_COLUMN};
pub use pager::{collect_all, Harvest, PageSource, Status, DEFAULT_PAGE_SIZE};
pub use record::{Record, Scalar};
pub use runner::{run, Summary};
