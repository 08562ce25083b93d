use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PennyError, Result};
use crate::models::{NormalizedRow, TxnKind};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalize a date string to YYYY-MM-DD. Accepts ISO dates and the
/// M/D/YYYY form common in US bank exports. Returns None when the value
/// is not a real calendar date.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    for pattern in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, pattern) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    None
}

pub fn file_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

// ---------------------------------------------------------------------------
// Delimited-text parsing
// ---------------------------------------------------------------------------

/// Maps recognized header names (case-insensitive) to column positions.
/// Unrecognized columns are ignored.
#[derive(Default)]
struct ColumnMap {
    date: Option<usize>,
    kind: Option<usize>,
    amount: Option<usize>,
    description: Option<usize>,
    category: Option<usize>,
    account: Option<usize>,
    from_account: Option<usize>,
    to_account: Option<usize>,
    notes: Option<usize>,
}

impl ColumnMap {
    fn from_header(record: &csv::StringRecord) -> Self {
        let mut map = Self::default();
        for (i, name) in record.iter().enumerate() {
            match name.trim().to_lowercase().as_str() {
                "date" => map.date = Some(i),
                "type" => map.kind = Some(i),
                "amount" => map.amount = Some(i),
                "description" => map.description = Some(i),
                "category" => map.category = Some(i),
                "account" => map.account = Some(i),
                "fromaccount" | "from account" => map.from_account = Some(i),
                "toaccount" | "to account" => map.to_account = Some(i),
                "notes" => map.notes = Some(i),
                _ => {}
            }
        }
        map
    }

    fn get<'a>(&self, record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
        idx.and_then(|i| record.get(i)).unwrap_or("").trim()
    }
}

fn opt(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse delimited transaction text: a header row naming columns followed
/// by one data row per transaction. Quoted fields may contain commas and
/// doubled-quote escapes; embedded newlines are not supported. Blank lines
/// are skipped. The first invalid row aborts the parse with its 1-based
/// source line number.
pub fn parse_csv(text: &str) -> Result<Vec<NormalizedRow>> {
    if text.trim().lines().count() < 2 {
        return Err(PennyError::Format(
            "file must have a header row and at least one data row".to_string(),
        ));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut columns: Option<ColumnMap> = None;
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let cols = match &columns {
            Some(cols) => cols,
            None => {
                columns = Some(ColumnMap::from_header(&record));
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let date = cols.get(&record, cols.date);
        let kind_raw = cols.get(&record, cols.kind);
        let amount_raw = cols.get(&record, cols.amount);

        if date.is_empty() || kind_raw.is_empty() || amount_raw.is_empty() {
            return Err(PennyError::Validation {
                row: line,
                reason: "missing required fields (date, type, amount)".to_string(),
            });
        }

        let kind: TxnKind = kind_raw.parse().map_err(|_| PennyError::Validation {
            row: line,
            reason: format!("invalid type '{kind_raw}' (expected income, expense, or transfer)"),
        })?;

        let amount = amount_raw
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| PennyError::Validation {
                row: line,
                reason: format!("invalid amount '{amount_raw}'"),
            })?;

        rows.push(NormalizedRow {
            date: date.to_string(),
            kind,
            amount,
            description: cols.get(&record, cols.description).to_string(),
            category: opt(cols.get(&record, cols.category)),
            account: opt(cols.get(&record, cols.account)),
            from_account: opt(cols.get(&record, cols.from_account)),
            to_account: opt(cols.get(&record, cols.to_account)),
            notes: opt(cols.get(&record, cols.notes)),
        });
    }

    Ok(rows)
}
