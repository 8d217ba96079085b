use crate::types::SimId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A row set expected to be keyed uniquely was not.
    #[error("Integrity fault in {relation}: {rows} rows but {distinct} distinct ids")]
    Integrity {
        relation: &'static str,
        rows:     usize,
        distinct: usize,
    },

    #[error("Expected exactly one SimulationTimeInfo row for sim id {sim_id}, found {rows}")]
    Cardinality { sim_id: SimId, rows: usize },

    #[error("No agents with prototype '{prototype}'")]
    EmptyAgentSet { prototype: String },

    #[error("Sum over {column} has no contributing rows")]
    NullAggregate { column: &'static str },

    #[error("Invalid flow direction '{0}': expected \"in\" or \"out\"")]
    InvalidDirection(String),

    #[error("Column {column} does not belong to relation {relation}")]
    ColumnMismatch {
        column:   &'static str,
        relation: &'static str,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type QueryResult<T> = Result<T, QueryError>;
