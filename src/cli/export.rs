use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::exporter;
use crate::settings::{db_path, get_data_dir};
use crate::store::{SqliteStore, Store};

#[cfg(feature = "pdf")]
use crate::error::PennyError;
#[cfg(feature = "pdf")]
use crate::reports;

fn default_export_path(stem: &str, ext: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    get_data_dir()
        .join("exports")
        .join(format!("{stem}-{date}.{ext}"))
}

fn write_artifact(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn csv(from: Option<String>, to: Option<String>, output: Option<String>) -> Result<()> {
    let store = SqliteStore::open(&db_path())?;
    let rows = store.transactions(from.as_deref(), to.as_deref())?;
    if rows.is_empty() {
        println!("No transactions to export.");
        return Ok(());
    }

    let content = exporter::to_csv(&rows)?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_export_path("transactions-export", "csv"));
    write_artifact(content.as_bytes(), &path)
}

#[cfg(feature = "pdf")]
pub fn report(month: Option<String>, output: Option<String>) -> Result<()> {
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
    let bytes = crate::pdf::render_report(&data)?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_export_path("financial-report", "pdf"));
    write_artifact(&bytes, &path)
}
