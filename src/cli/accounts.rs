use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::db_path;
use crate::store::SqliteStore;

pub fn add(name: &str, account_type: &str) -> Result<()> {
    let store = SqliteStore::open(&db_path())?;
    store.add_account(name, account_type)?;
    println!("Added account: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let store = SqliteStore::open(&db_path())?;
    let rows = store.accounts_detailed()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type"]);
    for (id, name, account_type) in rows {
        table.add_row(vec![Cell::new(id), Cell::new(name), Cell::new(account_type)]);
    }
    println!("Accounts\n{table}");
    Ok(())
}
