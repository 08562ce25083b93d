use crate::error::{PennyError, Result};
use crate::models::EnrichedTransaction;

const HEADER: [&str; 9] = [
    "Date",
    "Type",
    "Amount",
    "Description",
    "Category",
    "Account",
    "From Account",
    "To Account",
    "Notes",
];

/// Render enriched transactions as delimited text with a fixed 9-column
/// header, suitable for re-import. Fields containing a comma, quote, or
/// newline are wrapped in double quotes with internal quotes doubled;
/// absent optional fields render as empty strings.
pub fn to_csv(rows: &[EnrichedTransaction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;

    for t in rows {
        let amount = format!("{:.2}", t.amount);
        wtr.write_record([
            t.date.as_str(),
            t.kind.as_str(),
            amount.as_str(),
            t.description.as_str(),
            t.category.as_deref().unwrap_or(""),
            t.account.as_deref().unwrap_or(""),
            t.from_account.as_deref().unwrap_or(""),
            t.to_account.as_deref().unwrap_or(""),
            t.notes.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| PennyError::Other(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| PennyError::Other(format!("CSV output not UTF-8: {e}")))
}
