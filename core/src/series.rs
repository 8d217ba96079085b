//! Month-by-month evaluation of the analytics queries.
//!
//! Each series evaluates one query per unit span of the requested range, so
//! summing a flow series gives the same total as a single call over the
//! whole span.

use crate::{
    analytics::Analytics,
    error::QueryResult,
    types::{AgentId, Direction, Month, TimeSpan},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValue {
    pub month: Month,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: Month,
    pub count: usize,
}

/// Sum of the values in a series.
pub fn series_total(series: &[MonthlyValue]) -> f64 {
    series.iter().map(|m| m.value).sum()
}

impl Analytics<'_> {
    pub fn population_series(
        &self,
        prototype: &str,
        span: TimeSpan,
    ) -> QueryResult<Vec<MonthlyCount>> {
        span.months()
            .map(|month| {
                let count = self.active_agent_count(prototype, month, None)?;
                Ok(MonthlyCount { month, count })
            })
            .collect()
    }

    pub fn material_flow_series(
        &self,
        prototype: &str,
        commodity: &str,
        span: TimeSpan,
        direction: Direction,
    ) -> QueryResult<Vec<MonthlyValue>> {
        span.unit_spans()
            .map(|unit| {
                let value =
                    self.material_flow(prototype, commodity, unit.start, Some(unit.end), direction)?;
                Ok(MonthlyValue {
                    month: unit.start,
                    value,
                })
            })
            .collect()
    }

    pub fn swu_series(
        &self,
        span: TimeSpan,
        agent_id: Option<AgentId>,
    ) -> QueryResult<Vec<MonthlyValue>> {
        span.months()
            .map(|month| {
                let value = self.swu_usage(month, None, agent_id)?;
                Ok(MonthlyValue { month, value })
            })
            .collect()
    }

    pub fn nat_u_series(
        &self,
        span: TimeSpan,
        agent_id: Option<AgentId>,
    ) -> QueryResult<Vec<MonthlyValue>> {
        span.months()
            .map(|month| {
                let value = self.nat_u_usage(month, None, agent_id)?;
                Ok(MonthlyValue { month, value })
            })
            .collect()
    }
}
