use std::path::PathBuf;
use thiserror::Error;

use crate::money::ParseMoneyError;

/// Failures raised while turning ledger files into typed records.
///
/// The matching engine itself never fails; everything here belongs to
/// ingestion and configuration. Each variant names the file it came from
/// and, for row-level problems, the 1-based line and the offending field.
#[derive(Error, Debug)]
pub enum ReconError {
    #[error("{}: missing required header(s): {missing}", .path.display())]
    MissingHeader { path: PathBuf, missing: String },

    #[error("{}:{line}: malformed amount in '{field}': {source}", .path.display())]
    MalformedAmount {
        path: PathBuf,
        line: u64,
        field: &'static str,
        #[source]
        source: ParseMoneyError,
    },

    #[error("{}:{line}: malformed date '{value}' in '{field}' (expected YYYY-MM-DD)", .path.display())]
    MalformedDate {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("{}:{line}: malformed timestamp '{value}' in '{field}' (expected RFC 3339)", .path.display())]
    MalformedTimestamp {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("{}:{line}: invalid type '{value}' (expected DEBIT or CREDIT)", .path.display())]
    InvalidType {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("{}: I/O error: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: CSV error: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: invalid run config: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),
}

pub type ReconResult<T> = Result<T, ReconError>;
