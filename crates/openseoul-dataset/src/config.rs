//! Dataset pipeline configuration.

use std::path::PathBuf;

use crate::pager::DEFAULT_PAGE_SIZE;

/// Runtime configuration for one dataset run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Everything before the range segments, access key and response format
    /// included, e.g.
    /// `http://openapi.seoul.go.kr:8088/<key>/json/VwsmTrdarSelngQq`.
    pub base_url: String,
    /// Access key issued by the portal. Kept for reference; the portal
    /// embeds it in `base_url`.
    pub auth_key: String,
    /// Expected top-level key of responses; discovered from the first page
    /// when `None`.
    pub service: Option<String>,
    /// Records per range request.
    pub page_size: u64,
    /// Directory CSV files land in.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://openapi.seoul.go.kr:8088".to_string(),
            auth_key: String::new(),
            service: None,
            page_size: DEFAULT_PAGE_SIZE,
            output_dir: PathBuf::from("../data/raw_data"),
        }
    }
}
