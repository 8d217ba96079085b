//! Shared primitive types used across the analytics layer.

use crate::error::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A simulated month index. Zero-based; one unit = one month.
pub type Month = i64;

/// Agent identifier as recorded in the Agents relation.
pub type AgentId = i64;

pub type TransactionId = i64;

/// Simulation identifier as recorded in SimulationTimeInfo.
pub type SimId = i64;

/// The simulation id queried when the caller does not name one.
pub const DEFAULT_SIM_ID: SimId = 1;

/// A closed interval of months `[start, end]`.
///
/// A span whose `end` precedes its `start` is empty: it contains no months
/// and any query filtered by it matches nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: Month,
    pub end:   Month,
}

impl TimeSpan {
    /// `end` defaults to `start`, giving a single-month span.
    pub fn new(start: Month, end: Option<Month>) -> Self {
        Self {
            start,
            end: end.unwrap_or(start),
        }
    }

    pub fn single(month: Month) -> Self {
        Self::new(month, None)
    }

    /// Number of discrete months in the span (`end - start + 1`),
    /// saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        if self.end < self.start {
            return 0;
        }
        usize::try_from(self.end.abs_diff(self.start))
            .ok()
            .and_then(|gap| gap.checked_add(1))
            .unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, month: Month) -> bool {
        self.start <= month && month <= self.end
    }

    pub fn months(&self) -> impl Iterator<Item = Month> {
        self.start..=self.end
    }

    /// Split into adjacent one-month spans covering the same months.
    pub fn unit_spans(&self) -> impl Iterator<Item = TimeSpan> {
        self.months().map(TimeSpan::single)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Which side of a transaction the agent set sits on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Agents are the receivers.
    In,
    /// Agents are the senders.
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In  => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in"  => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            _     => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_defaults_end_to_start() {
        let span = TimeSpan::new(5, None);
        assert_eq!(span, TimeSpan { start: 5, end: 5 });
        assert_eq!(span.len(), 1);
        assert!(span.contains(5));
        assert!(!span.contains(6));
    }

    #[test]
    fn closed_span_counts_both_endpoints() {
        let span = TimeSpan::new(0, Some(119));
        assert_eq!(span.len(), 120);
        assert_eq!(span.months().count(), 120);
        assert_eq!(span.unit_spans().last(), Some(TimeSpan::single(119)));
    }

    #[test]
    fn reversed_span_is_empty() {
        let span = TimeSpan::new(10, Some(3));
        assert!(span.is_empty());
        assert_eq!(span.months().count(), 0);
        assert!(!span.contains(5));
    }

    #[test]
    fn extreme_span_length_saturates() {
        let span = TimeSpan::new(Month::MIN, Some(Month::MAX));
        assert_eq!(span.len(), usize::MAX);
        assert!(!span.is_empty());
        assert!(span.contains(0));

        let wide = TimeSpan::new(-5, Some(Month::MAX - 10));
        assert!(wide.len() > 0);
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("in".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!(" OUT ".parse::<Direction>().unwrap(), Direction::Out);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(QueryError::InvalidDirection(s)) if s == "sideways"
        ));
    }
}
