// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A section line does not match the token layout of its keyword.
    #[error("malformed {section} line '{line}': {reason}")]
    Format {
        section: String,
        line: String,
        reason: String,
    },

    #[error("atom {atom} requests symmetry operation {operation}, but only {available} were parsed")]
    OutOfRange {
        atom: usize,
        operation: usize,
        available: usize,
    },

    #[error("required section {0} not found in structure file")]
    MissingSection(String),
}

impl ConvertError {
    pub fn format(section: &str, line: &str, reason: impl Into<String>) -> Self {
        ConvertError::Format {
            section: section.to_string(),
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
