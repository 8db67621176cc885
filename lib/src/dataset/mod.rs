//! Tabular dataset loading.
//!
//! A [`Table`] is an immutable, column-oriented view of a CSV file with a
//! header row. Cells are kept as optional strings so the same table can feed
//! both numeric and categorical feature groups; typing happens when a block
//! of columns is extracted.
//!
//! # Missing values
//!
//! A cell is missing when it is empty or equal to one of [`MISSING_MARKERS`]
//! (the markers pandas treats as NA by default). Cells are compared
//! verbatim: `" male"` and `"male"` are different categories and `" NA"` is
//! a value. Numeric extraction trims whitespace before parsing.
//!
//! # Example
//!
//! ```ignore
//! use scoreprep::dataset::Table;
//!
//! let table = Table::from_csv_path("artifacts/train.csv")?;
//! let scores = table.numeric_matrix(&["reading_score".into(), "writing_score".into()])?;
//! ```

use std::path::PathBuf;
use thiserror::Error;

mod table;

pub use self::table::Table;

/// Cell values treated as missing, in addition to the empty string.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if `cell` denotes a missing value.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// Errors raised while reading or slicing a [`Table`].
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    NoHeader,
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
    #[error("column '{column}' has {got} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        got: usize,
    },
    #[error("column '{0}' not found")]
    MissingColumn(String),
    #[error("column '{column}', row {row}: cannot parse {value:?} as a number")]
    ParseNumber {
        column: String,
        row: usize,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing_markers() {
        for marker in ["", "NA", "NaN", "nan", "null", "None", "N/A", "<NA>"] {
            assert!(is_missing(marker), "{:?} should be missing", marker);
        }
        for value in ["0", "female", "none", "na ", "standard"] {
            assert!(!is_missing(value), "{:?} should not be missing", value);
        }
    }

    #[test]
    fn test_dataset_error_display() {
        let err = DatasetError::ParseNumber {
            column: "reading_score".to_string(),
            row: 3,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'reading_score', row 3: cannot parse \"abc\" as a number"
        );
    }
}
