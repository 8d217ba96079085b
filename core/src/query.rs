//! Typed filter builder over the simulation output schema.
//!
//! A `Query` names one relation and accumulates predicates. Successive
//! `filter()` calls combine with logical AND. Only the store renders a query
//! to SQL; analytics code builds queries and hands them over.

use crate::error::{QueryError, QueryResult};
use crate::types::TimeSpan;
use rusqlite::types::Value;

/// The six relations read by the analytics layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Agents,
    AgentDeaths,
    Transactions,
    TransactedResources,
    Enrichments,
    SimulationTimeInfo,
}

impl Relation {
    pub fn table_name(&self) -> &'static str {
        match self {
            Relation::Agents              => "Agents",
            Relation::AgentDeaths         => "AgentDeaths",
            Relation::Transactions        => "Transactions",
            Relation::TransactedResources => "TransactedResources",
            Relation::Enrichments         => "Enrichments",
            Relation::SimulationTimeInfo  => "SimulationTimeInfo",
        }
    }
}

/// Every column the analytics layer touches, bound to its relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    // Agents
    AgentId,
    Prototype,
    EnterDate,
    // AgentDeaths
    DeathAgentId,
    DeathDate,
    // Transactions
    TransactionId,
    SenderId,
    ReceiverId,
    TransactionTime,
    Commodity,
    // TransactedResources
    ResourceTransactionId,
    Quantity,
    // Enrichments
    EnrichmentId,
    EnrichmentTime,
    Swu,
    NaturalUranium,
    // SimulationTimeInfo
    SimId,
    SimulationStart,
    Duration,
}

impl Column {
    pub fn relation(&self) -> Relation {
        use Column::*;
        match self {
            AgentId | Prototype | EnterDate => Relation::Agents,
            DeathAgentId | DeathDate => Relation::AgentDeaths,
            TransactionId | SenderId | ReceiverId | TransactionTime | Commodity => {
                Relation::Transactions
            }
            ResourceTransactionId | Quantity => Relation::TransactedResources,
            EnrichmentId | EnrichmentTime | Swu | NaturalUranium => Relation::Enrichments,
            SimId | SimulationStart | Duration => Relation::SimulationTimeInfo,
        }
    }

    /// Column name as it appears in the output schema.
    pub fn name(&self) -> &'static str {
        use Column::*;
        match self {
            AgentId               => "ID",
            Prototype             => "Prototype",
            EnterDate             => "EnterDate",
            DeathAgentId          => "AgentID",
            DeathDate             => "DeathDate",
            TransactionId         => "ID",
            SenderId              => "SenderID",
            ReceiverId            => "ReceiverID",
            TransactionTime       => "Time",
            Commodity             => "Commodity",
            ResourceTransactionId => "TransactionID",
            Quantity              => "Quantity",
            EnrichmentId          => "ID",
            EnrichmentTime        => "Time",
            Swu                   => "SWU",
            NaturalUranium        => "Natural_Uranium",
            SimId                 => "SimId",
            SimulationStart       => "SimulationStart",
            Duration              => "Duration",
        }
    }

    /// `Relation.Column`, used in log lines and error messages.
    pub fn qualified(&self) -> &'static str {
        use Column::*;
        match self {
            AgentId               => "Agents.ID",
            Prototype             => "Agents.Prototype",
            EnterDate             => "Agents.EnterDate",
            DeathAgentId          => "AgentDeaths.AgentID",
            DeathDate             => "AgentDeaths.DeathDate",
            TransactionId         => "Transactions.ID",
            SenderId              => "Transactions.SenderID",
            ReceiverId            => "Transactions.ReceiverID",
            TransactionTime       => "Transactions.Time",
            Commodity             => "Transactions.Commodity",
            ResourceTransactionId => "TransactedResources.TransactionID",
            Quantity              => "TransactedResources.Quantity",
            EnrichmentId          => "Enrichments.ID",
            EnrichmentTime        => "Enrichments.Time",
            Swu                   => "Enrichments.SWU",
            NaturalUranium        => "Enrichments.Natural_Uranium",
            SimId                 => "SimulationTimeInfo.SimId",
            SimulationStart       => "SimulationTimeInfo.SimulationStart",
            Duration              => "SimulationTimeInfo.Duration",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(Column, Value),
    Le(Column, Value),
    Ge(Column, Value),
    /// Closed integer span, both endpoints included.
    Between(Column, TimeSpan),
    /// Integer set membership. An empty set matches no rows.
    InSet(Column, Vec<i64>),
}

impl Predicate {
    pub fn equals(column: Column, value: impl Into<Value>) -> Self {
        Predicate::Eq(column, value.into())
    }

    pub fn at_most(column: Column, value: impl Into<Value>) -> Self {
        Predicate::Le(column, value.into())
    }

    pub fn at_least(column: Column, value: impl Into<Value>) -> Self {
        Predicate::Ge(column, value.into())
    }

    pub fn within(column: Column, span: TimeSpan) -> Self {
        Predicate::Between(column, span)
    }

    pub fn in_set<I>(column: Column, ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Predicate::InSet(column, ids.into_iter().collect())
    }

    pub fn column(&self) -> Column {
        match self {
            Predicate::Eq(c, _)
            | Predicate::Le(c, _)
            | Predicate::Ge(c, _)
            | Predicate::Between(c, _)
            | Predicate::InSet(c, _) => *c,
        }
    }

    /// Append this predicate's SQL fragment, pushing bound values onto
    /// `params`. Placeholders are numbered from `params.len() + 1`.
    fn render(&self, params: &mut Vec<Value>) -> String {
        let mut bind = |value: Value| {
            params.push(value);
            format!("?{}", params.len())
        };
        match self {
            Predicate::Eq(c, v) => format!("{} = {}", c.name(), bind(v.clone())),
            Predicate::Le(c, v) => format!("{} <= {}", c.name(), bind(v.clone())),
            Predicate::Ge(c, v) => format!("{} >= {}", c.name(), bind(v.clone())),
            Predicate::Between(c, span) => {
                let lo = bind(Value::Integer(span.start));
                let hi = bind(Value::Integer(span.end));
                format!("{} BETWEEN {lo} AND {hi}", c.name())
            }
            Predicate::InSet(c, ids) => {
                if ids.is_empty() {
                    return "0 = 1".to_string();
                }
                // Integers render inline so large id sets never hit the
                // bound-parameter limit.
                let list = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} IN ({list})", c.name())
            }
        }
    }
}

/// A single-relation read with AND-combined predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    relation:   Relation,
    predicates: Vec<Predicate>,
}

impl Query {
    pub fn on(relation: Relation) -> Self {
        Self {
            relation,
            predicates: Vec::new(),
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Reject any column (projected or filtered) that is not part of this
    /// query's relation.
    pub fn check_column(&self, column: Column) -> QueryResult<()> {
        if column.relation() != self.relation {
            return Err(QueryError::ColumnMismatch {
                column:   column.qualified(),
                relation: self.relation.table_name(),
            });
        }
        Ok(())
    }

    /// Render `FROM <table> [WHERE ...]` with its bound parameters.
    pub fn render_from_where(&self) -> QueryResult<(String, Vec<Value>)> {
        let mut params = Vec::new();
        let mut clauses = Vec::with_capacity(self.predicates.len());
        for predicate in &self.predicates {
            self.check_column(predicate.column())?;
            clauses.push(predicate.render(&mut params));
        }

        let mut sql = format!("FROM {}", self.relation.table_name());
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        Ok((sql, params))
    }
}
