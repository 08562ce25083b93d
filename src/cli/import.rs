use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{PennyError, Result};
use crate::importer;
use crate::models::{NormalizedRow, TxnKind};
use crate::ofx;
use crate::reconciler::reconcile;
use crate::settings::db_path;
use crate::store::{SqliteStore, Store};

const PREVIEW_ROWS: usize = 10;

fn is_ofx_file(path: &Path, text: &str) -> bool {
    path.extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("ofx") || e.eq_ignore_ascii_case("qfx"))
        || ofx::looks_like_ofx(text)
}

fn parse_file(path: &Path, text: &str, format: Option<&str>) -> Result<Vec<NormalizedRow>> {
    let use_ofx = match format {
        Some("ofx") => true,
        Some("csv") => false,
        Some(other) => {
            return Err(PennyError::Other(format!(
                "Unknown format '{other}' (expected csv or ofx)"
            )))
        }
        None => is_ofx_file(path, text),
    };

    if use_ofx {
        let outcome = ofx::parse_ofx(text)?;
        if outcome.skipped > 0 {
            println!(
                "{}",
                format!("{} incomplete bank record(s) skipped", outcome.skipped).yellow()
            );
        }
        Ok(ofx::normalize(&outcome.rows, None))
    } else {
        importer::parse_csv(text)
    }
}

fn preview(rows: &[NormalizedRow]) {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Type", "Amount", "Description", "Category", "Account"]);
    for row in rows.iter().take(PREVIEW_ROWS) {
        let account = match row.kind {
            TxnKind::Transfer => format!(
                "{} -> {}",
                row.from_account.as_deref().unwrap_or("-"),
                row.to_account.as_deref().unwrap_or("-"),
            ),
            _ => row.account.clone().unwrap_or_else(|| "-".to_string()),
        };
        table.add_row(vec![
            Cell::new(&row.date),
            Cell::new(row.kind.as_str()),
            Cell::new(crate::fmt::money(row.amount)),
            Cell::new(&row.description),
            Cell::new(row.category.as_deref().unwrap_or("-")),
            Cell::new(account),
        ]);
    }
    println!("Preview\n{table}");
    if rows.len() > PREVIEW_ROWS {
        println!("Showing {PREVIEW_ROWS} of {} transactions", rows.len());
    }
}

pub fn run(file: &str, format: Option<&str>, yes: bool) -> Result<()> {
    let path = PathBuf::from(file);
    let text = std::fs::read_to_string(&path)?;

    let mut rows = parse_file(&path, &text, format)?;
    if rows.is_empty() {
        println!("No importable transactions found in {}.", path.display());
        return Ok(());
    }

    // Resolve dates up front so a bad one fails before anything persists.
    for row in &mut rows {
        row.date = importer::normalize_date(&row.date)
            .ok_or_else(|| PennyError::Other(format!("Unresolvable date: '{}'", row.date)))?;
    }

    preview(&rows);
    if !yes {
        println!("Parsed {} transactions. Re-run with --yes to import.", rows.len());
        return Ok(());
    }

    let store = SqliteStore::open(&db_path())?;

    let checksum = importer::file_checksum(&path)?;
    if store.has_import(&checksum)? {
        println!("This file has already been imported (duplicate checksum).");
        return Ok(());
    }

    let accounts = store.accounts()?;
    let categories = store.categories()?;
    if accounts.is_empty() {
        println!(
            "{}",
            "No accounts exist yet; imported rows will have no account. \
             Add one with `penny accounts add`."
                .yellow()
        );
    }

    let resolved = reconcile(&accounts, &categories, &rows);
    let unmatched_endpoints = resolved
        .iter()
        .filter(|t| {
            t.kind == TxnKind::Transfer
                && (t.from_account_id.is_none() || t.to_account_id.is_none())
        })
        .count();
    if unmatched_endpoints > 0 {
        println!(
            "{}",
            format!(
                "{unmatched_endpoints} transfer(s) had account names with no match; \
                 those endpoints were left unset"
            )
            .yellow()
        );
    }

    let inserted = store.insert_transactions(&resolved)?;

    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let min_date = rows.iter().map(|r| r.date.as_str()).min();
    let max_date = rows.iter().map(|r| r.date.as_str()).max();
    store.record_import(filename, &checksum, inserted, min_date, max_date)?;

    println!("{}", format!("Imported {inserted} transactions.").green());
    Ok(())
}
