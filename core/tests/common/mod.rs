//! Shared builders for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use recon_core::{Direction, ExternalStatement, InternalTransaction, Money};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn money(s: &str) -> Money {
    s.parse().expect("valid amount")
}

pub fn debit(id: &str, amount: &str, time: &str) -> InternalTransaction {
    internal(id, amount, Direction::Debit, time)
}

pub fn credit(id: &str, amount: &str, time: &str) -> InternalTransaction {
    internal(id, amount, Direction::Credit, time)
}

pub fn internal(id: &str, amount: &str, direction: Direction, time: &str) -> InternalTransaction {
    InternalTransaction {
        id: id.into(),
        amount: money(amount),
        direction,
        timestamp: DateTime::parse_from_rfc3339(time).expect("valid RFC 3339"),
    }
}

pub fn stmt(id: &str, amount: &str, day: &str, source: &str) -> ExternalStatement {
    ExternalStatement {
        id: id.into(),
        amount: money(amount),
        date: date(day),
        source: source.into(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seeded ledger generator
// ─────────────────────────────────────────────────────────────────────────────

/// Deterministic random ledgers over a ten-day span starting 2025-08-01.
/// Amounts are drawn from a small pool so collisions and ties are common.
pub struct LedgerGen {
    rng: Pcg64Mcg,
}

impl LedgerGen {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    fn day(&mut self) -> NaiveDate {
        date("2025-08-01") + chrono::Days::new(self.rng.gen_range(0..10))
    }

    fn cents(&mut self) -> i64 {
        const POOL: [i64; 6] = [0, 1, 99, 1_000, 1_001, 25_000];
        POOL[self.rng.gen_range(0..POOL.len())] + self.rng.gen_range(0..3)
    }

    pub fn internal(&mut self, n: usize) -> Vec<InternalTransaction> {
        (0..n)
            .map(|i| {
                let day = self.day();
                let hour = self.rng.gen_range(0..24);
                let direction = if self.rng.gen_bool(0.5) {
                    Direction::Debit
                } else {
                    Direction::Credit
                };
                InternalTransaction {
                    id: format!("TX{i}"),
                    amount: Money::from_cents(self.cents()),
                    direction,
                    timestamp: DateTime::parse_from_rfc3339(&format!("{day}T{hour:02}:00:00Z"))
                        .expect("generated timestamp"),
                }
            })
            .collect()
    }

    pub fn external(&mut self, n: usize) -> Vec<ExternalStatement> {
        const SOURCES: [&str; 3] = ["Alpha", "Beta", "Gamma"];
        (0..n)
            .map(|i| {
                let cents = self.cents();
                let signed = if self.rng.gen_bool(0.5) { -cents } else { cents };
                ExternalStatement {
                    id: format!("B{i}"),
                    amount: Money::from_cents(signed),
                    date: self.day(),
                    source: SOURCES[self.rng.gen_range(0..SOURCES.len())].into(),
                }
            })
            .collect()
    }
}
