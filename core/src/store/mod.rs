//! SQLite adapter over a simulation output database.
//!
//! RULE: Only the store talks to the database.
//! Analytics code builds `Query` values and calls store methods; it never
//! executes SQL directly. The store never writes.

mod catalog;
mod time_info;

pub use time_info::SimulationTimeInfo;

use crate::{
    error::QueryResult,
    query::{Column, Query},
};
use rusqlite::{params_from_iter, Connection, OpenFlags};

pub struct OutputStore {
    conn: Connection,
}

impl OutputStore {
    /// Open an existing output database read-only.
    pub fn open(path: &str) -> QueryResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("Opened output database {path} read-only");
        Ok(Self { conn })
    }

    /// Wrap a caller-owned connection (fixtures, in-memory databases).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    // ── Generic reads ──────────────────────────────────────────

    /// One integer column of every matching row. Duplicates are kept so
    /// callers can check the uniqueness they rely on.
    pub fn ids(&self, query: &Query, column: Column) -> QueryResult<Vec<i64>> {
        query.check_column(column)?;
        let (from_where, params) = query.render_from_where()?;
        let sql = format!("SELECT {} {from_where}", column.name());
        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_from_iter(params.iter()), |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("{sql} -> {} rows", ids.len());
        Ok(ids)
    }

    /// `SUM(column)` over matching rows. `None` when no row contributes.
    pub fn sum(&self, query: &Query, column: Column) -> QueryResult<Option<f64>> {
        query.check_column(column)?;
        let (from_where, params) = query.render_from_where()?;
        let sql = format!("SELECT SUM({}) {from_where}", column.name());
        let total: Option<f64> = self.conn.query_row(
            &sql,
            params_from_iter(params.iter()),
            |row| row.get(0),
        )?;
        log::debug!("{sql} -> {total:?}");
        Ok(total)
    }

    pub fn count(&self, query: &Query) -> QueryResult<i64> {
        let (from_where, params) = query.render_from_where()?;
        let sql = format!("SELECT COUNT(*) {from_where}");
        let count: i64 = self.conn.query_row(
            &sql,
            params_from_iter(params.iter()),
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
