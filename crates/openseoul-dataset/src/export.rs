//! CSV export of accumulated records.

use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::record::{column_union, compare, Record};

/// Column used to order exported rows when present.
pub const SORT_COLUMN: &str = "STDR_YYQU_CD";

/// UTF-8 byte-order mark; spreadsheet tools use it to pick the decoder.
const BOM: &[u8] = b"\xef\xbb\xbf";

/// Write `records` to `path` as a BOM-prefixed UTF-8 CSV.
///
/// Columns are the union of keys across all records, in sorted name order;
/// missing fields become empty cells. Rows sort ascending by [`SORT_COLUMN`]
/// when any record carries it, in fetch order otherwise. Parent directories
/// are created. Empty input is a logged no-op; returns whether a file was
/// written.
pub fn write_csv(records: &[Record], path: &Path) -> Result<bool> {
    if records.is_empty() {
        log::warn!("no records to export, skipping {}", path.display());
        return Ok(false);
    }

    let columns = column_union(records);

    let mut ordered: Vec<&Record> = records.iter().collect();
    if records.iter().any(|r| r.contains_key(SORT_COLUMN)) {
        ordered.sort_by(|a, b| match (a.get(SORT_COLUMN), b.get(SORT_COLUMN)) {
            (Some(x), Some(y)) => compare(x, y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(BOM).context("cannot write byte-order mark")?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&columns).context("cannot write header")?;
    for record in ordered {
        writer
            .write_record(columns.iter().map(|column| {
                record
                    .get(column)
                    .map(|s| s.render().into_owned())
                    .unwrap_or_default()
            }))
            .context("cannot write row")?;
    }
    writer.flush().context("cannot flush CSV")?;

    log::info!("wrote {} rows to {}", records.len(), path.display());
    Ok(true)
}
