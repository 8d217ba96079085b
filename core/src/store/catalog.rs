//! Distinct tag listings used when a report is not told what to cover.

use super::OutputStore;
use crate::{error::QueryResult, query::Column};

impl OutputStore {
    /// Distinct agent prototypes, sorted.
    pub fn prototypes(&self) -> QueryResult<Vec<String>> {
        self.distinct_text(Column::Prototype)
    }

    /// Distinct transaction commodities, sorted.
    pub fn commodities(&self) -> QueryResult<Vec<String>> {
        self.distinct_text(Column::Commodity)
    }

    fn distinct_text(&self, column: Column) -> QueryResult<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT {col} FROM {table} WHERE {col} IS NOT NULL ORDER BY {col} ASC",
            col = column.name(),
            table = column.relation().table_name(),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }
}
