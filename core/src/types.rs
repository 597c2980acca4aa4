//! Shared primitive types used across the entire reconciliation pipeline.

/// A stable record identifier (`trxID` or `unique_identifier`).
pub type RecordId = String;

/// The name of an external statement source, usually a bank.
pub type SourceName = String;

/// Source label used when neither the row nor the caller names a source.
pub const UNKNOWN_SOURCE: &str = "UNKNOWN";
