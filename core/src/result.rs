//! Reconciliation output.
//!
//! A `ReconciliationResult` is assembled once at the end of a run and never
//! mutated afterwards. Unmatched external statements are kept in an
//! explicit order-preserving association so output is reproducible.

use crate::{
    ledger::{ExternalStatement, InternalTransaction},
    money::Money,
    types::{RecordId, SourceName},
};

/// One internal record paired with the external record it claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    pub internal_id: RecordId,
    pub external_id: RecordId,
    pub source:      SourceName,
    /// `abs(internal.signed_amount - external.signed_amount)`.
    pub discrepancy: Money,
}

/// External statements grouped by source name.
///
/// Groups appear in the order their first member was pushed; members keep
/// their push order within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceGroups {
    groups: Vec<(SourceName, Vec<ExternalStatement>)>,
}

impl SourceGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: ExternalStatement) {
        match self
            .groups
            .iter_mut()
            .find(|(name, _)| *name == statement.source)
        {
            Some((_, members)) => members.push(statement),
            None => self.groups.push((statement.source.clone(), vec![statement])),
        }
    }

    pub fn get(&self, source: &str) -> Option<&[ExternalStatement]> {
        self.groups
            .iter()
            .find(|(name, _)| name == source)
            .map(|(_, members)| members.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ExternalStatement])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    /// Number of distinct sources.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of statements across every group.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, members)| members.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub total_internal:     usize,
    pub total_external:     usize,
    pub matched_count:      usize,
    pub matches:            Vec<MatchedPair>,
    pub unmatched_internal: Vec<InternalTransaction>,
    pub unmatched_external: SourceGroups,
    pub total_discrepancy:  Money,
}

impl ReconciliationResult {
    pub fn total_processed(&self) -> usize {
        self.total_internal + self.total_external
    }

    pub fn unmatched_total(&self) -> usize {
        self.unmatched_internal.len() + self.unmatched_external.record_count()
    }
}
