use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification used at the view boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataErrorKind {
    FileNotFound,
    Schema,
    Value,
}

impl DataErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FileNotFound => "File not found",
            Self::Schema => "Schema error",
            Self::Value => "Value error",
        }
    }
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("file '{}' was not found", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("workbook '{}' has no worksheet", .path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("unsupported indicator file '{}' (expected .xlsx, .xls, .ods or .csv)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("line {line}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        line: u64,
        column: String,
        value: String,
    },

    #[error("cannot render a radar chart with zero axes")]
    ZeroAxes,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub fn kind(&self) -> DataErrorKind {
        match self {
            Self::FileNotFound { .. } => DataErrorKind::FileNotFound,
            Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                DataErrorKind::FileNotFound
            }
            Self::MissingColumns { .. }
            | Self::EmptyWorkbook { .. }
            | Self::UnsupportedFormat { .. } => DataErrorKind::Schema,
            Self::NotNumeric { .. }
            | Self::ZeroAxes
            | Self::Csv(_)
            | Self::Spreadsheet(_)
            | Self::Io(_) => DataErrorKind::Value,
        }
    }
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;
