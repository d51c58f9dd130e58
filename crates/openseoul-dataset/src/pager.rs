//! Pagination loop: discover the total from the first page, then walk
//! fixed-size ranges until exhausted.

use indicatif::ProgressBar;
use serde_json::Value;

use openseoul_core::HttpError;

use crate::api::Client;
use crate::envelope::Envelope;
use crate::record::Record;

/// Default records per range request, matching the portal's maximum width.
pub const DEFAULT_PAGE_SIZE: u64 = 1000;

/// Anything that can serve one page of raw response body.
///
/// The production implementation is [`Client`]; tests script responses in
/// memory.
pub trait PageSource {
    fn fetch_page(&self, start: u64, end: u64) -> Result<Value, HttpError>;
}

impl PageSource for Client {
    fn fetch_page(&self, start: u64, end: u64) -> Result<Value, HttpError> {
        Client::fetch_page(self, start, end)
    }
}

/// How a collection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every page fetched and parsed.
    Complete,
    /// The loop stopped early or skipped pages; records hold whatever was
    /// accumulated.
    Partial,
    /// The first page failed; nothing was accumulated.
    Failed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Failed => "failed",
        })
    }
}

/// Accumulated result of one collection run.
#[derive(Debug)]
pub struct Harvest {
    pub records: Vec<Record>,
    pub status: Status,
    /// `list_total_count` from the first page; 0 when the first page failed.
    pub expected: u64,
    /// Top-level key observed on the first page.
    pub service: Option<String>,
    /// Pages whose rows were appended.
    pub pages_fetched: usize,
    /// Pages skipped over a malformed envelope.
    pub pages_skipped: usize,
}

impl Harvest {
    fn failed() -> Self {
        Self {
            records: Vec::new(),
            status: Status::Failed,
            expected: 0,
            service: None,
            pages_fetched: 0,
            pages_skipped: 0,
        }
    }
}

/// Fetch all pages of a dataset.
///
/// The first page discovers `list_total_count` and the top-level key; later
/// pages are parsed against that key. A failed first page aborts the run; an
/// HTTP failure on a later page stops the loop, keeping what was
/// accumulated; a later page with a malformed envelope is skipped and the
/// loop continues.
pub fn collect_all(
    source: &impl PageSource,
    service: Option<&str>,
    page_size: u64,
    bar: &ProgressBar,
) -> Harvest {
    let page_size = page_size.max(1);

    let first = match source.fetch_page(1, page_size) {
        Ok(body) => body,
        Err(e) => {
            log::error!("first page failed: {e}");
            return Harvest::failed();
        }
    };
    let envelope = match Envelope::parse(first, service) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::error!("first page envelope rejected: {e}");
            return Harvest::failed();
        }
    };

    let expected = envelope.total_count;
    let service_key = envelope.service;
    log::info!("{service_key}: {expected} records expected");
    bar.set_length(expected);

    let mut records = envelope.rows;
    let mut pages_fetched = 1usize;
    let mut pages_skipped = 0usize;
    let mut stopped_early = false;
    bar.set_position(records.len() as u64);

    let mut start = page_size + 1;
    while start <= expected {
        let end = start + page_size - 1;
        log::debug!("fetching records {start}..={end}");
        match source.fetch_page(start, end) {
            Ok(body) => match Envelope::parse(body, Some(service_key.as_str())) {
                Ok(mut page) => {
                    records.append(&mut page.rows);
                    pages_fetched += 1;
                    bar.set_position(records.len() as u64);
                }
                Err(e) => {
                    log::warn!("records {start}..={end} skipped: {e}");
                    pages_skipped += 1;
                }
            },
            Err(e) => {
                log::error!("records {start}..={end} failed: {e}, stopping");
                stopped_early = true;
                break;
            }
        }
        start += page_size;
    }

    let status = if stopped_early || pages_skipped > 0 {
        Status::Partial
    } else {
        Status::Complete
    };

    Harvest {
        records,
        status,
        expected,
        service: Some(service_key),
        pages_fetched,
        pages_skipped,
    }
}
