//! Read-only analytics over agent-based fuel-cycle simulation output.
//!
//! Open an output database with `OutputStore`, wrap it in `Analytics`, and
//! ask population, material-flow, enrichment and time-bound questions.

pub mod analytics;
pub mod config;
pub mod error;
pub mod query;
pub mod report;
pub mod series;
pub mod store;
pub mod types;

pub use analytics::Analytics;
pub use config::{AnalyticsConfig, NullSumPolicy, SurvivorPolicy};
pub use error::{QueryError, QueryResult};
pub use store::OutputStore;
pub use types::{Direction, Month, TimeSpan};
