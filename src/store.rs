use std::path::Path;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::Connection;

use crate::db;
use crate::error::Result;
use crate::models::{AccountRef, CategoryRef, EnrichedTransaction, ResolvedTransaction, TxnKind};

impl FromSql for TxnKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// Narrow persistence port. The import/export core never touches the
/// database directly; the CLI layer injects one implementation of this.
pub trait Store {
    fn accounts(&self) -> Result<Vec<AccountRef>>;
    fn categories(&self) -> Result<Vec<CategoryRef>>;
    /// Returns the number of rows written, so callers can distinguish an
    /// empty batch from a failed one.
    fn insert_transactions(&self, rows: &[ResolvedTransaction]) -> Result<usize>;
    /// Transactions with joined display names, newest-first, optionally
    /// bounded by an inclusive date range.
    fn transactions(&self, from: Option<&str>, to: Option<&str>)
        -> Result<Vec<EnrichedTransaction>>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = db::get_connection(db_path)?;
        db::init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn add_account(&self, name: &str, account_type: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO accounts (name, account_type) VALUES (?1, ?2)",
            rusqlite::params![name, account_type],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_category(&self, name: &str, kind: &str, color: Option<&str>) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories (name, kind, color) VALUES (?1, ?2, ?3)",
            rusqlite::params![name, kind, color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn accounts_detailed(&self) -> Result<Vec<(i64, String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, account_type FROM accounts ORDER BY id")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn has_import(&self, checksum: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM imports WHERE checksum = ?1")?;
        Ok(stmt.exists([checksum])?)
    }

    pub fn record_import(
        &self,
        filename: &str,
        checksum: &str,
        record_count: usize,
        date_range_start: Option<&str>,
        date_range_end: Option<&str>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO imports (filename, checksum, record_count, date_range_start, date_range_end) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![filename, checksum, record_count as i64, date_range_start, date_range_end],
        )?;
        Ok(())
    }

    /// (accounts, categories, transactions) row counts for `penny status`.
    pub fn counts(&self) -> Result<(i64, i64, i64)> {
        let count = |table: &str| -> Result<i64> {
            Ok(self
                .conn
                .query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?)
        };
        Ok((count("accounts")?, count("categories")?, count("transactions")?))
    }
}

impl Store for SqliteStore {
    fn accounts(&self) -> Result<Vec<AccountRef>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM accounts ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(AccountRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn categories(&self) -> Result<Vec<CategoryRef>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, kind, color FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryRef {
                id: row.get(0)?,
                name: row.get(1)?,
                kind: row.get(2)?,
                color: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_transactions(&self, rows: &[ResolvedTransaction]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO transactions \
             (kind, date, amount, description, notes, account_id, category_id, from_account_id, to_account_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        let mut inserted = 0usize;
        for row in rows {
            stmt.execute(rusqlite::params![
                row.kind.as_str(),
                row.date,
                row.amount,
                row.description,
                row.notes,
                row.account_id,
                row.category_id,
                row.from_account_id,
                row.to_account_id,
            ])?;
            inserted += 1;
        }
        Ok(inserted)
    }

    fn transactions(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<EnrichedTransaction>> {
        let (clause, params): (&str, Vec<String>) = match (from, to) {
            (Some(f), Some(t)) => (
                "WHERE t.date >= ?1 AND t.date <= ?2",
                vec![f.to_string(), t.to_string()],
            ),
            (Some(f), None) => ("WHERE t.date >= ?1", vec![f.to_string()]),
            (None, Some(t)) => ("WHERE t.date <= ?1", vec![t.to_string()]),
            (None, None) => ("", Vec::new()),
        };
        let sql = format!(
            "SELECT t.date, t.kind, t.amount, t.description, t.notes, \
             c.name, c.color, a.name, fa.name, ta.name \
             FROM transactions t \
             LEFT JOIN categories c ON t.category_id = c.id \
             LEFT JOIN accounts a ON t.account_id = a.id \
             LEFT JOIN accounts fa ON t.from_account_id = fa.id \
             LEFT JOIN accounts ta ON t.to_account_id = ta.id \
             {clause} ORDER BY t.date DESC, t.id DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let param_values: Vec<&dyn rusqlite::types::ToSql> = params
            .iter()
            .map(|p| p as &dyn rusqlite::types::ToSql)
            .collect();
        let rows = stmt.query_map(param_values.as_slice(), |row| {
            Ok(EnrichedTransaction {
                date: row.get(0)?,
                kind: row.get(1)?,
                amount: row.get(2)?,
                description: row.get(3)?,
                notes: row.get(4)?,
                category: row.get(5)?,
                category_color: row.get(6)?,
                account: row.get(7)?,
                from_account: row.get(8)?,
                to_account: row.get(9)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
