//! JSON summary shaping.
//!
//! Money is always rendered as a two-decimal string, never a JSON number.

use crate::{
    ledger::{ExternalStatement, InternalTransaction},
    money::Money,
    result::ReconciliationResult,
};
use chrono::SecondsFormat;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalRow {
    #[serde(rename = "trxID")]
    pub trx_id: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(rename = "transactionTime")]
    pub transaction_time: String,
}

impl From<&InternalTransaction> for InternalRow {
    fn from(tx: &InternalTransaction) -> Self {
        Self {
            trx_id: tx.id.clone(),
            amount: tx.amount,
            kind: tx.direction.as_str(),
            transaction_time: tx.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    pub unique_identifier: String,
    pub amount: Money,
    pub date: String,
    pub bank: String,
}

impl From<&ExternalStatement> for StatementRow {
    fn from(s: &ExternalStatement) -> Self {
        Self {
            unique_identifier: s.id.clone(),
            amount: s.amount,
            date: s.date.format("%Y-%m-%d").to_string(),
            bank: s.source.clone(),
        }
    }
}

/// The run summary written to stdout and, optionally, to a file.
///
/// `unmatched_bank_by_name` is keyed by source name in sorted order; the
/// records inside each group keep the engine's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_system_transactions: usize,
    pub total_bank_transactions:   usize,
    pub total_processed:           usize,
    pub matched_count:             usize,
    pub unmatched_total:           usize,
    pub total_discrepancy:         Money,
    pub unmatched_system:          Vec<InternalRow>,
    pub unmatched_bank_by_name:    BTreeMap<String, Vec<StatementRow>>,
}

impl Summary {
    pub fn from_result(res: &ReconciliationResult) -> Self {
        let unmatched_bank_by_name = res
            .unmatched_external
            .iter()
            .map(|(name, members)| {
                (
                    name.to_string(),
                    members.iter().map(StatementRow::from).collect(),
                )
            })
            .collect();

        Self {
            total_system_transactions: res.total_internal,
            total_bank_transactions:   res.total_external,
            total_processed:           res.total_processed(),
            matched_count:             res.matched_count,
            unmatched_total:           res.unmatched_total(),
            total_discrepancy:         res.total_discrepancy,
            unmatched_system:          res.unmatched_internal.iter().map(InternalRow::from).collect(),
            unmatched_bank_by_name,
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
