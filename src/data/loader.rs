use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Record};

/// Minimum fields per row: code, name, unit, price.
pub const REQUIRED_FIELDS: usize = 4;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a load produced no dataset. No partial results are ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("price list source {} is unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `row` counts data rows from 1; blank lines are not rows and a quoted
    /// field spanning several lines is still one row.
    #[error("price list row {row} is malformed: {reason}")]
    ParseFailure { row: usize, reason: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the whole delimited source at `path` into memory.
///
/// Rows are comma separated, have no header, and are mapped positionally:
/// `code, name, unit, price[, ignored...]`.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file, path)
}

/// Like [`load_file`] but over any reader; `origin` is only used in errors.
pub fn load_reader<R: Read>(reader: R, origin: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row_no = index + 1;
        let row = result.map_err(|err| classify_csv_error(err, row_no, origin))?;

        if row.len() < REQUIRED_FIELDS {
            return Err(LoadError::ParseFailure {
                row: row_no,
                reason: format!(
                    "expected at least {REQUIRED_FIELDS} fields, found {}",
                    row.len()
                ),
            });
        }

        records.push(Record {
            code: row[0].to_string(),
            name: row[1].to_string(),
            unit: row[2].to_string(),
            price: parse_price(&row[3], row_no),
        });
    }

    log::debug!("loaded {} records from {}", records.len(), origin.display());
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a price cell. Anything that is not a finite number becomes `0.0`.
pub fn parse_price(text: &str, row: usize) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::warn!("row {row}: price {text:?} is not a number, using 0.0");
            0.0
        }
    }
}

fn classify_csv_error(err: csv::Error, row: usize, origin: &Path) -> LoadError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::SourceUnavailable {
            path: origin.to_path_buf(),
            source,
        },
        _ => LoadError::ParseFailure { row, reason },
    }
}
