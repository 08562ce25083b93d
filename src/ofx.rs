use std::collections::HashSet;

use regex::Regex;

use crate::error::Result;
use crate::models::{NormalizedRow, RawBankTransaction, TxnKind};

// OFX/QFX bank exports are frequently SGML-like with unclosed tags, so
// extraction is deliberately tag-scoped text scanning, never a strict
// XML parse that would reject real-world files.

pub struct OfxParseOutcome {
    pub rows: Vec<RawBankTransaction>,
    /// Blocks dropped for missing or unparseable required fields.
    pub skipped: usize,
}

pub fn looks_like_ofx(text: &str) -> bool {
    text.contains("<STMTTRN>") || text.contains("OFXHEADER") || text.contains("<OFX>")
}

/// Extract all `<STMTTRN>` blocks from a bank export. A block missing its
/// type, posted date, amount, or identifier is dropped whole and counted;
/// no partial records are produced. A document with no blocks yields an
/// empty outcome, not an error.
pub fn parse_ofx(text: &str) -> Result<OfxParseOutcome> {
    let block_re = Regex::new(r"(?s)<STMTTRN>(.*?)</STMTTRN>")?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for cap in block_re.captures_iter(text) {
        let block = cap.get(1).map(|m| m.as_str()).unwrap_or("");

        let trn_type = extract_tag(block, "TRNTYPE")?;
        let posted = extract_tag(block, "DTPOSTED")?;
        let amount_raw = extract_tag(block, "TRNAMT")?;
        let fit_id = extract_tag(block, "FITID")?;
        let name = extract_tag(block, "NAME")?;
        let memo = extract_tag(block, "MEMO")?;

        if trn_type.is_empty() || posted.is_empty() || amount_raw.is_empty() || fit_id.is_empty() {
            skipped += 1;
            continue;
        }
        let Some(date) = reduce_posted_date(&posted) else {
            skipped += 1;
            continue;
        };
        let Ok(amount) = amount_raw.parse::<f64>() else {
            skipped += 1;
            continue;
        };

        rows.push(RawBankTransaction {
            trn_type,
            date,
            amount,
            fit_id,
            name: if name.is_empty() { "Unknown".to_string() } else { name },
            memo: if memo.is_empty() { None } else { Some(memo) },
        });
    }

    Ok(OfxParseOutcome { rows, skipped })
}

/// Read the text of `<TAG>` up to the next `<`. Empty string when absent.
fn extract_tag(block: &str, tag: &str) -> Result<String> {
    let re = Regex::new(&format!("<{tag}>([^<]+)"))?;
    Ok(re
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default())
}

/// Reduce a 14-digit bank timestamp (YYYYMMDDHHMMSS...) to YYYY-MM-DD.
/// No timezone interpretation; the date digits are taken as-is.
fn reduce_posted_date(posted: &str) -> Option<String> {
    let digits = posted.get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits[..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    chrono::NaiveDate::from_ymd_opt(year, month, day)?;
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Map raw bank transactions to normalized rows, order-preserving. The
/// kind comes from the sign of the amount (the bank's TRNTYPE string is
/// informational only) and the sign itself is discarded. Transfers are
/// never inferred: a bank export is single-account and self-contained.
///
/// `seen_fit_ids` is a deduplication hook: when provided, rows whose bank
/// identifier is already in the set are skipped.
pub fn normalize(
    rows: &[RawBankTransaction],
    seen_fit_ids: Option<&HashSet<String>>,
) -> Vec<NormalizedRow> {
    rows.iter()
        .filter(|t| seen_fit_ids.map_or(true, |seen| !seen.contains(&t.fit_id)))
        .map(|t| NormalizedRow {
            date: t.date.clone(),
            kind: if t.amount >= 0.0 { TxnKind::Income } else { TxnKind::Expense },
            amount: t.amount.abs(),
            description: t.name.clone(),
            category: None,
            account: None,
            from_account: None,
            to_account: None,
            notes: t.memo.clone(),
        })
        .collect()
}
