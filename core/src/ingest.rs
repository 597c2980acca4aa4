//! CSV ingestion for both ledgers.
//!
//! RULE: Ingestion is all-or-nothing. The first bad row aborts the file
//! with an error naming the path, line and field; callers never see a
//! partially parsed ledger.
//!
//! Headers are matched case-insensitively after trimming, extra columns
//! are ignored and every value is trimmed before it is parsed.

use crate::{
    error::{ReconError, ReconResult},
    ledger::{Direction, ExternalStatement, InternalTransaction},
    money::{Money, ParseMoneyError},
    types::UNKNOWN_SOURCE,
};
use chrono::{DateTime, NaiveDate};
use csv::StringRecord;
use std::{
    fs::File,
    io::Read,
    path::Path,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_FORMAT_LEN: usize = "2025-08-01".len();

// ── Internal ledger ──────────────────────────────────────────────

/// Parse the internal ledger at `path`.
/// Required columns: `trxID`, `amount`, `type`, `transactionTime`.
pub fn parse_internal_csv(path: impl AsRef<Path>) -> ReconResult<Vec<InternalTransaction>> {
    let path = path.as_ref();
    read_internal(open(path)?, path)
}

/// Parse an internal ledger from any reader. `origin` labels errors.
pub fn read_internal<R: Read>(
    reader: R,
    origin: impl AsRef<Path>,
) -> ReconResult<Vec<InternalTransaction>> {
    let origin = origin.as_ref();
    let mut rdr = csv_reader(reader);
    let headers = read_headers(&mut rdr, origin)?;
    let [i_id, i_amount, i_type, i_time] = require_columns(
        &headers,
        ["trxID", "amount", "type", "transactionTime"],
        origin,
    )?;

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|source| csv_error(origin, source))?;
        let line = line_of(&record);

        let raw_amount = field(&record, i_amount);
        let amount = parse_amount(raw_amount, origin, line)?;
        if amount.is_negative() {
            return Err(ReconError::MalformedAmount {
                path: origin.to_path_buf(),
                line,
                field: "amount",
                source: ParseMoneyError::Negative(raw_amount.to_string()),
            });
        }

        let raw_type = field(&record, i_type);
        let direction = Direction::parse(raw_type).ok_or_else(|| ReconError::InvalidType {
            path: origin.to_path_buf(),
            line,
            value: raw_type.to_string(),
        })?;

        let raw_time = field(&record, i_time);
        let timestamp =
            DateTime::parse_from_rfc3339(raw_time).map_err(|_| ReconError::MalformedTimestamp {
                path: origin.to_path_buf(),
                line,
                field: "transactionTime",
                value: raw_time.to_string(),
            })?;

        out.push(InternalTransaction {
            id: field(&record, i_id).to_string(),
            amount,
            direction,
            timestamp,
        });
    }

    log::debug!("{}: {} internal rows", origin.display(), out.len());
    Ok(out)
}

// ── External statements ──────────────────────────────────────────

/// Parse a bank statement at `path`.
/// Required columns: `unique_identifier`, `amount`, `date`; `bank` is optional.
/// Rows without a bank name fall back to `default_source`, then to `UNKNOWN`.
pub fn parse_external_csv(
    path: impl AsRef<Path>,
    default_source: &str,
) -> ReconResult<Vec<ExternalStatement>> {
    let path = path.as_ref();
    read_external(open(path)?, path, default_source)
}

/// Parse a bank statement from any reader. `origin` labels errors.
pub fn read_external<R: Read>(
    reader: R,
    origin: impl AsRef<Path>,
    default_source: &str,
) -> ReconResult<Vec<ExternalStatement>> {
    let origin = origin.as_ref();
    let mut rdr = csv_reader(reader);
    let headers = read_headers(&mut rdr, origin)?;
    let [i_id, i_amount, i_date] =
        require_columns(&headers, ["unique_identifier", "amount", "date"], origin)?;
    let i_bank = column(&headers, "bank");
    let default_source = default_source.trim();

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|source| csv_error(origin, source))?;
        let line = line_of(&record);

        let amount = parse_amount(field(&record, i_amount), origin, line)?;

        let raw_date = field(&record, i_date);
        let date = parse_date(raw_date).ok_or_else(|| ReconError::MalformedDate {
            path: origin.to_path_buf(),
            line,
            field: "date",
            value: raw_date.to_string(),
        })?;

        let named = i_bank.map(|i| field(&record, i)).unwrap_or_default();
        let source = [named, default_source]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE);

        out.push(ExternalStatement {
            id: field(&record, i_id).to_string(),
            amount,
            date,
            source: source.to_string(),
        });
    }

    log::debug!("{}: {} statement rows", origin.display(), out.len());
    Ok(out)
}

/// Default source label for a statement file: its name with everything
/// from the last `.` removed. A bare `.csv` yields an empty label.
pub fn source_name_for(path: impl AsRef<Path>) -> String {
    let Some(name) = path.as_ref().file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    match name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name.into_owned(),
    }
}

/// Parse several statement files in the given order and concatenate them.
/// Each file's default source is its file stem.
pub fn parse_external_files<P: AsRef<Path>>(paths: &[P]) -> ReconResult<Vec<ExternalStatement>> {
    let mut out = Vec::new();
    for path in paths {
        let path = path.as_ref();
        out.extend(parse_external_csv(path, &source_name_for(path))?);
    }
    Ok(out)
}

// ── Helpers ──────────────────────────────────────────────────────

fn open(path: &Path) -> ReconResult<File> {
    File::open(path).map_err(|source| ReconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn csv_error(origin: &Path, source: csv::Error) -> ReconError {
    ReconError::Csv {
        path: origin.to_path_buf(),
        source,
    }
}

fn read_headers<R: Read>(rdr: &mut csv::Reader<R>, origin: &Path) -> ReconResult<StringRecord> {
    rdr.headers()
        .cloned()
        .map_err(|source| csv_error(origin, source))
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn require_columns<const N: usize>(
    headers: &StringRecord,
    names: [&str; N],
    origin: &Path,
) -> ReconResult<[usize; N]> {
    let found = names.map(|name| column(headers, name));
    let missing: Vec<&str> = names
        .iter()
        .zip(&found)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(ReconError::MissingHeader {
            path: origin.to_path_buf(),
            missing: missing.join(","),
        });
    }
    Ok(found.map(|idx| idx.unwrap_or_default()))
}

/// Trimmed field; short rows read as empty.
fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or_default()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

/// Zero-padded `YYYY-MM-DD` only; `2025-8-1` is rejected.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != DATE_FORMAT_LEN {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_amount(raw: &str, origin: &Path, line: u64) -> ReconResult<Money> {
    raw.parse::<Money>().map_err(|source| ReconError::MalformedAmount {
        path: origin.to_path_buf(),
        line,
        field: "amount",
        source,
    })
}
