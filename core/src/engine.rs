//! The reconciliation engine.
//!
//! PIPELINE (fixed, one sequential pass):
//!   1. Filter both ledgers to the inclusive date window.
//!   2. Bucket external statements by (date, sign), input order preserved.
//!   3. Walk internal transactions in ascending timestamp order (stable).
//!   4. Each one claims the nearest-amount unclaimed candidate in its bucket;
//!      ties go to the candidate that entered the bucket first.
//!   5. Every unclaimed candidate is reported unmatched, grouped by source.
//!
//! RULES:
//!   - No I/O and no failure modes. Bad input is rejected before this point.
//!   - The discrepancy total saturates at `i64::MAX` cents; it never wraps.
//!   - Nothing survives between runs; buckets live on the stack of `reconcile`.
//!   - Candidates are never removed, only flagged as claimed, so bucket
//!     indices stay stable while scanning.

use crate::{
    ledger::{ExternalStatement, InternalTransaction, MatchKey},
    money::Money,
    result::{MatchedPair, ReconciliationResult, SourceGroups},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive calendar-date range `[start, end]`.
///
/// `start > end` is not rejected; such a window simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end:   NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

struct Candidate<'a> {
    statement: &'a ExternalStatement,
    claimed:   bool,
}

/// Buckets in creation order, with a key index for lookup.
#[derive(Default)]
struct Buckets<'a> {
    index:   HashMap<MatchKey, usize>,
    buckets: Vec<Vec<Candidate<'a>>>,
}

impl<'a> Buckets<'a> {
    fn insert(&mut self, statement: &'a ExternalStatement) {
        let slot = *self
            .index
            .entry(statement.match_key())
            .or_insert_with(|| {
                self.buckets.push(Vec::new());
                self.buckets.len() - 1
            });
        self.buckets[slot].push(Candidate {
            statement,
            claimed: false,
        });
    }

    /// Claim the unclaimed candidate nearest to `target`.
    /// Returns the claimed statement and the absolute distance.
    fn claim_nearest(
        &mut self,
        key: &MatchKey,
        target: Money,
    ) -> Option<(&'a ExternalStatement, Money)> {
        let bucket = &mut self.buckets[*self.index.get(key)?];

        let mut best: Option<(usize, Money)> = None;
        for (i, candidate) in bucket.iter().enumerate() {
            if candidate.claimed {
                continue;
            }
            let diff = (target - candidate.statement.signed_amount()).abs();
            // Strict `<` keeps the earliest candidate on ties.
            if best.map_or(true, |(_, best_diff)| diff < best_diff) {
                best = Some((i, diff));
            }
        }

        let (i, diff) = best?;
        bucket[i].claimed = true;
        Some((bucket[i].statement, diff))
    }

    /// Unclaimed statements, bucket by bucket in creation order.
    fn into_leftovers(self) -> impl Iterator<Item = &'a ExternalStatement> {
        self.buckets
            .into_iter()
            .flatten()
            .filter(|c| !c.claimed)
            .map(|c| c.statement)
    }
}

/// Reconcile `internal` against `external` over `window`.
pub fn reconcile(
    internal: &[InternalTransaction],
    external: &[ExternalStatement],
    window: DateWindow,
) -> ReconciliationResult {
    let mut internal_in: Vec<&InternalTransaction> = internal
        .iter()
        .filter(|t| window.contains(t.date_key()))
        .collect();
    let external_in: Vec<&ExternalStatement> = external
        .iter()
        .filter(|s| window.contains(s.date))
        .collect();

    log::debug!(
        "window {}..={}: {}/{} internal, {}/{} external in range",
        window.start,
        window.end,
        internal_in.len(),
        internal.len(),
        external_in.len(),
        external.len()
    );

    let mut buckets = Buckets::default();
    for statement in external_in.iter().copied() {
        buckets.insert(statement);
    }

    // `sort_by` is stable: equal timestamps keep input order.
    internal_in.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let mut matches = Vec::new();
    let mut unmatched_internal = Vec::new();
    let mut total_discrepancy = Money::ZERO;

    for tx in &internal_in {
        match buckets.claim_nearest(&tx.match_key(), tx.signed_amount()) {
            Some((statement, diff)) => {
                total_discrepancy = total_discrepancy.saturating_add(diff);
                matches.push(MatchedPair {
                    internal_id: tx.id.clone(),
                    external_id: statement.id.clone(),
                    source:      statement.source.clone(),
                    discrepancy: diff,
                });
            }
            None => {
                log::debug!("no candidate for internal {} ({})", tx.id, tx.signed_amount());
                unmatched_internal.push((*tx).clone());
            }
        }
    }

    let mut unmatched_external = SourceGroups::new();
    for statement in buckets.into_leftovers() {
        unmatched_external.push(statement.clone());
    }

    if total_discrepancy == Money::from_cents(i64::MAX) {
        log::warn!("total discrepancy reached the representable maximum and was capped");
    }

    let result = ReconciliationResult {
        total_internal: internal_in.len(),
        total_external: external_in.len(),
        matched_count: matches.len(),
        matches,
        unmatched_internal,
        unmatched_external,
        total_discrepancy,
    };

    log::info!(
        "reconciled: {} matched, {} unmatched, discrepancy {}",
        result.matched_count,
        result.unmatched_total(),
        result.total_discrepancy
    );

    result
}
