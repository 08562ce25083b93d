use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::{db_path, get_data_dir};
use crate::store::SqliteStore;

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    let store = SqliteStore::open(&db_path())?;
    let (accounts, categories, transactions) = store.counts()?;

    println!("Data directory: {}", data_dir.display());

    let mut table = Table::new();
    table.set_header(vec!["Accounts", "Categories", "Transactions"]);
    table.add_row(vec![
        Cell::new(accounts),
        Cell::new(categories),
        Cell::new(transactions),
    ]);
    println!("{table}");
    Ok(())
}
