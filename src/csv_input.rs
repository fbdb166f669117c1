//! CSV input: a pre-scan line count and a two-column row reader.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One request to process, as read from the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub request_ref: String,
    /// Empty when the row carries no catalog id.
    pub catalog_id: String,
}

impl Row {
    pub fn new(request_ref: &str, catalog_id: &str) -> Self {
        Self {
            request_ref: request_ref.trim_matches(' ').to_string(),
            catalog_id: catalog_id.trim_matches(' ').to_string(),
        }
    }

    /// Build a row from raw CSV fields. Bytes that are not UTF-8 are replaced
    /// rather than rejected, so legacy-encoded exports still process.
    fn from_bytes(request_ref: &[u8], catalog_id: &[u8]) -> Self {
        Self::new(
            &String::from_utf8_lossy(request_ref),
            &String::from_utf8_lossy(catalog_id),
        )
    }
}

/// Count newline-separated lines. Drives the progress total and the
/// summary's request total.
pub fn count_lines(path: &Path) -> Result<u64> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut count = 0u64;
    for line in BufReader::new(file).split(b'\n') {
        line.with_context(|| format!("read {}", path.display()))?;
        count += 1;
    }
    Ok(count)
}

/// Yields rows until EOF or the first record that is not exactly two
/// columns. A stop before EOF is logged with the offending line.
pub struct RowReader {
    records: csv::ByteRecordsIntoIter<File>,
    finished: bool,
}

pub fn open_rows(path: &Path) -> Result<RowReader> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    Ok(RowReader {
        records: reader.into_byte_records(),
        finished: false,
    })
}

impl Iterator for RowReader {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.finished {
            return None;
        }
        match self.records.next() {
            Some(Ok(record)) if record.len() == 2 => {
                Some(Row::from_bytes(&record[0], &record[1]))
            }
            Some(Ok(record)) => {
                self.finished = true;
                tracing::warn!(
                    line = record.position().map(|pos| pos.line()),
                    fields = record.len(),
                    "stopping at CSV record without exactly two columns"
                );
                None
            }
            Some(Err(err)) => {
                self.finished = true;
                tracing::warn!(
                    line = err.position().map(|pos| pos.line()),
                    "stopping at unreadable CSV record: {err}"
                );
                None
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}
