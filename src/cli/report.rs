use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::reports;
use crate::settings::db_path;
use crate::store::{SqliteStore, Store};

const CATEGORY_LIMIT: usize = 10;
const TRANSACTION_LIMIT: usize = 20;

pub fn run(month: Option<String>) -> Result<()> {
    let (year, month) = match month {
        Some(m) => reports::parse_month(&m)
            .ok_or_else(|| PennyError::Other(format!("Invalid month '{m}' (expected YYYY-MM)")))?,
        None => reports::current_month(),
    };
    let (start, end) = reports::month_bounds(year, month);

    let store = SqliteStore::open(&db_path())?;
    let rows = store.transactions(Some(&start), Some(&end))?;
    if rows.is_empty() {
        println!("No transactions found for this period.");
        return Ok(());
    }

    let data = reports::build_report_data(rows, reports::month_label(year, month));

    let mut summary = Table::new();
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec![
        Cell::new("Total Income"),
        Cell::new(money(data.summary.total_income).green()),
    ]);
    summary.add_row(vec![
        Cell::new("Total Expenses"),
        Cell::new(money(data.summary.total_expense).red()),
    ]);
    let net = money(data.summary.net_income);
    let net_cell = if data.summary.net_income >= 0.0 {
        Cell::new(net.green().bold())
    } else {
        Cell::new(net.red().bold())
    };
    summary.add_row(vec![Cell::new("Net Income"), net_cell]);
    summary.add_row(vec![
        Cell::new("Transaction Count"),
        Cell::new(data.summary.transaction_count),
    ]);
    println!("Financial Report — {}\n{summary}", data.period);

    let top = reports::top_categories(&data, CATEGORY_LIMIT);
    if !top.is_empty() {
        let mut breakdown = Table::new();
        breakdown.set_header(vec!["Category", "Amount", "Percentage"]);
        for (name, value, pct) in top {
            breakdown.add_row(vec![
                Cell::new(name),
                Cell::new(money(value)),
                Cell::new(format!("{pct:.1}%")),
            ]);
        }
        println!("Expense by Category\n{breakdown}");
    }

    let mut recent = Table::new();
    recent.set_header(vec!["Date", "Type", "Description", "Amount"]);
    for t in data.transactions.iter().take(TRANSACTION_LIMIT) {
        let desc = if t.description.is_empty() {
            t.category.clone().unwrap_or_default()
        } else {
            t.description.clone()
        };
        recent.add_row(vec![
            Cell::new(&t.date),
            Cell::new(t.kind.as_str()),
            Cell::new(desc),
            Cell::new(money(t.amount)),
        ]);
    }
    println!("Recent Transactions\n{recent}");
    Ok(())
}
