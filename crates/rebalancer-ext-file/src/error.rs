//! File I/O error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading holdings or requests, or writing exports.
#[derive(Error, Debug)]
pub enum FileError {
    /// Underlying I/O failure.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// CSV reader or writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A spreadsheet workbook could not be opened or read.
    #[error("Cannot read workbook '{path}': {message}")]
    Workbook {
        /// Workbook file.
        path: PathBuf,
        /// Reader message.
        message: String,
    },

    /// A plan workbook could not be written.
    #[error("Workbook export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// No holdings sheet was found in a directory.
    #[error("No holdings sheet (.csv, .xlsx, .xlsm, .xls, .ods) found in '{dir}'")]
    NoSheetFound {
        /// Directory searched.
        dir: PathBuf,
    },

    /// The holdings sheet is too narrow for the positional layout.
    #[error(
        "Holdings sheet has {found} data column(s), {required} required \
         (Asset Class, Security Name, Quantity, Market Value)"
    )]
    MissingColumns {
        /// Data columns found after skipped columns.
        found: usize,
        /// Data columns required.
        required: usize,
    },

    /// Every data row was discarded.
    #[error("No holdings found: every data row is missing a quantity")]
    NoHoldings,

    /// A quantity or market value cell is not a number.
    #[error("Invalid {column} '{value}' on row {row}")]
    InvalidNumber {
        /// One-based row number in the sheet.
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell text.
        value: String,
    },

    /// An allocation request could not be decoded or encoded.
    #[error("Invalid allocation request '{path}': {message}")]
    Request {
        /// Request file.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },

    /// File extension is not one of the supported request formats.
    #[error("Unsupported request format '{path}' (expected .json or .toml)")]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// A plan export could not be written.
    #[error("Export failed: {0}")]
    Export(String),
}

impl FileError {
    /// Create an I/O error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid number error.
    #[must_use]
    pub fn invalid_number(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            row,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a workbook read error.
    #[must_use]
    pub fn workbook(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a request decode error.
    #[must_use]
    pub fn request(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Request {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors that mean the holdings sheet itself is unusable.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumns { .. } | Self::NoHoldings | Self::InvalidNumber { .. }
        )
    }
}
