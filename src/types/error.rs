use std::path::{Path, PathBuf};
use thiserror::Error;

/// carbontrack error types
#[derive(Error, Debug)]
pub enum CarbontrackError {
    /// A record is missing a required field or carries an invalid value.
    /// `index` is the record's position in its input batch, or in `file`
    /// when the batch came from one.
    #[error("invalid record #{index}{}: {field}", in_file(.file))]
    InvalidRecord {
        index: usize,
        field: String,
        file: Option<PathBuf>,
    },

    /// Ratio requested against a zero denominator
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Failed to parse JSON/JSONL
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Dashboard API request failed
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for carbontrack
pub type Result<T> = std::result::Result<T, CarbontrackError>;

impl CarbontrackError {
    /// Attach the source file to parse and record errors
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            Self::Parse(msg) => Self::Parse(format!("{}: {}", path.display(), msg)),
            Self::InvalidRecord { index, field, .. } => Self::InvalidRecord {
                index,
                field,
                file: Some(path.to_path_buf()),
            },
            other => other,
        }
    }
}

fn in_file(file: &Option<PathBuf>) -> String {
    match file {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}
