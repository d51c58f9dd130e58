//! One dataset run: fetch every page, export the CSV, report a summary.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use openseoul_core::ProgressContext;

use crate::api::Client;
use crate::config::Config;
use crate::export::write_csv;
use crate::pager::{collect_all, Status};

/// Outcome of one run.
#[derive(Debug)]
pub struct Summary {
    pub status: Status,
    /// Top-level key observed on the first page.
    pub service: Option<String>,
    pub expected_records: u64,
    pub fetched_records: usize,
    pub pages_fetched: usize,
    pub pages_skipped: usize,
    /// Path of the written CSV; `None` when nothing was exported.
    pub written: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Fetch a dataset and write it to `<output_dir>/<filename>`.
pub fn run(config: &Config, filename: &str, progress: &ProgressContext) -> Result<Summary> {
    let start = Instant::now();

    let client = Client::new(&config.base_url, &config.auth_key);
    let bar = progress.records_bar(0);
    bar.set_prefix("records");

    let harvest = collect_all(&client, config.service.as_deref(), config.page_size, &bar);
    bar.finish_and_clear();

    let path = config.output_dir.join(filename);
    let written = write_csv(&harvest.records, &path)
        .with_context(|| format!("export to {} failed", path.display()))?
        .then_some(path);

    let summary = Summary {
        status: harvest.status,
        service: harvest.service,
        expected_records: harvest.expected,
        fetched_records: harvest.records.len(),
        pages_fetched: harvest.pages_fetched,
        pages_skipped: harvest.pages_skipped,
        written,
        elapsed: start.elapsed(),
    };

    log::info!("=== Dataset Summary ===");
    if let Some(service) = &summary.service {
        log::info!("Service: {service}");
    }
    log::info!(
        "Records: {}/{} ({})",
        summary.fetched_records,
        summary.expected_records,
        summary.status
    );
    log::info!(
        "Pages: {} fetched, {} skipped",
        summary.pages_fetched,
        summary.pages_skipped
    );
    match &summary.written {
        Some(path) => log::info!("Output: {}", path.display()),
        None => log::info!("Output: none"),
    }
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}
