//! Ledger record shapes and their matching keys.
//!
//! Both sides reduce to `(calendar date, signed amount)`. Internal
//! transactions carry an unsigned magnitude plus a direction; external
//! statements carry the sign in the amount itself.

use crate::{
    money::Money,
    types::{RecordId, SourceName},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Direction of an internal transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    /// Case-insensitive parse of `DEBIT` / `CREDIT`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("DEBIT") {
            Some(Self::Debit)
        } else if raw.eq_ignore_ascii_case("CREDIT") {
            Some(Self::Credit)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

/// Sign half of a bucket key. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn of(amount: Money) -> Self {
        if amount.is_negative() {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

/// `(date, sign)`: the bucket a record is matched within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey {
    pub date: NaiveDate,
    pub sign: Sign,
}

impl MatchKey {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self {
            date,
            sign: Sign::of(amount),
        }
    }
}

/// A row from the internal system-of-record ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalTransaction {
    pub id:        RecordId,
    /// Non-negative magnitude; the direction supplies the sign.
    pub amount:    Money,
    pub direction: Direction,
    pub timestamp: DateTime<FixedOffset>,
}

impl InternalTransaction {
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }

    /// Calendar day of the timestamp in its own offset.
    pub fn date_key(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn match_key(&self) -> MatchKey {
        MatchKey::new(self.date_key(), self.signed_amount())
    }
}

/// A row from an external bank statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalStatement {
    pub id:     RecordId,
    /// Signed; negative for debits.
    pub amount: Money,
    pub date:   NaiveDate,
    pub source: SourceName,
}

impl ExternalStatement {
    pub fn signed_amount(&self) -> Money {
        self.amount
    }

    pub fn match_key(&self) -> MatchKey {
        MatchKey::new(self.date, self.amount)
    }
}
