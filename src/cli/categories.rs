use comfy_table::{Cell, Table};

use crate::error::{PennyError, Result};
use crate::settings::db_path;
use crate::store::{SqliteStore, Store};

pub fn add(name: &str, kind: &str, color: Option<&str>) -> Result<()> {
    if !matches!(kind, "income" | "expense") {
        return Err(PennyError::Other(format!(
            "Invalid category kind '{kind}' (expected income or expense)"
        )));
    }
    let store = SqliteStore::open(&db_path())?;
    store.add_category(name, kind, color)?;
    println!("Added category: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let store = SqliteStore::open(&db_path())?;
    let categories = store.categories()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Kind", "Color"]);
    for c in categories {
        table.add_row(vec![
            Cell::new(c.id),
            Cell::new(c.name),
            Cell::new(c.kind),
            Cell::new(c.color.unwrap_or_default()),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}
