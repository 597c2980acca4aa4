//! Ledger reconciliation core.
//!
//! Matches an internal transaction ledger against one or more bank
//! statements over an inclusive date window. `ingest` turns CSV into
//! typed records, `engine::reconcile` does the matching, and `report`
//! shapes the result for output.

pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod ledger;
pub mod money;
pub mod report;
pub mod result;
pub mod types;

pub use engine::{reconcile, DateWindow};
pub use error::{ReconError, ReconResult};
pub use ledger::{Direction, ExternalStatement, InternalTransaction};
pub use money::Money;
pub use result::{MatchedPair, ReconciliationResult, SourceGroups};
