//! Analytical queries over a fuel-cycle simulation output database.
//!
//! Every operation is a read-only query against the store:
//!   1. Population count: agents of a prototype active over a span
//!   2. Material flow: commodity quantity into/out of a prototype
//!   3. Enrichment usage: SWU and natural uranium over a span
//!   4. Time bounds: start month, duration, last month index
//!
//! Uniqueness the queries rely on (agent ids, transaction ids, one
//! SimulationTimeInfo row per sim) is re-checked on every call and a
//! violation is returned as an error, never deduplicated away.

use crate::{
    config::{AnalyticsConfig, NullSumPolicy, SurvivorPolicy},
    error::{QueryError, QueryResult},
    query::{Column, Predicate, Query, Relation},
    store::{OutputStore, SimulationTimeInfo},
    types::{AgentId, Direction, Month, SimId, TimeSpan, TransactionId},
};
use std::collections::BTreeSet;

pub struct Analytics<'a> {
    store:  &'a OutputStore,
    config: AnalyticsConfig,
}

impl<'a> Analytics<'a> {
    pub fn new(store: &'a OutputStore, config: AnalyticsConfig) -> Self {
        Self { store, config }
    }

    pub fn with_defaults(store: &'a OutputStore) -> Self {
        Self::new(store, AnalyticsConfig::default())
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn store(&self) -> &OutputStore {
        self.store
    }

    // ── Population ─────────────────────────────────────────────

    /// Number of `prototype` agents active over `[start, end]`
    /// (`end` defaults to `start`).
    ///
    /// An agent counts when it entered at or before `end` and has a death
    /// recorded at or after `start`; a death exactly at `start` still counts.
    /// Under `SurvivorPolicy::AsRecorded` agents with no death row are not
    /// counted. `SurvivorPolicy::IncludeSurvivors` counts them as active.
    pub fn active_agent_count(
        &self,
        prototype: &str,
        start: Month,
        end: Option<Month>,
    ) -> QueryResult<usize> {
        let span = TimeSpan::new(start, end);

        let entered = Query::on(Relation::Agents)
            .filter(Predicate::equals(Column::Prototype, prototype.to_string()))
            .filter(Predicate::at_most(Column::EnterDate, span.end));
        let entry_ids = unique_ids(Relation::Agents, self.store.ids(&entered, Column::AgentId)?)?;

        let exited = Query::on(Relation::AgentDeaths)
            .filter(Predicate::at_least(Column::DeathDate, span.start));
        let exit_ids: BTreeSet<AgentId> = self
            .store
            .ids(&exited, Column::DeathAgentId)?
            .into_iter()
            .collect();

        let recorded = entry_ids.intersection(&exit_ids).count();

        match self.config.survivor_policy {
            SurvivorPolicy::AsRecorded => {
                log::debug!(
                    "{prototype} over {span}: {} entered, {recorded} active",
                    entry_ids.len()
                );
                Ok(recorded)
            }
            SurvivorPolicy::IncludeSurvivors => {
                let ever_died: BTreeSet<AgentId> = self
                    .store
                    .ids(&Query::on(Relation::AgentDeaths), Column::DeathAgentId)?
                    .into_iter()
                    .collect();
                let survivors = entry_ids.difference(&ever_died).count();
                if survivors > 0 {
                    log::warn!(
                        "{prototype} over {span}: counting {survivors} agents with no death record \
                         as active ({recorded} active by recorded deaths)"
                    );
                }
                Ok(recorded + survivors)
            }
        }
    }

    // ── Material flow ──────────────────────────────────────────

    /// Quantity of `commodity` moved into (`Direction::In`) or out of
    /// (`Direction::Out`) agents of `prototype` over `[start, end]`.
    ///
    /// Fails with `EmptyAgentSet` when no agent has the prototype. Returns
    /// exactly 0.0 when agents exist but no transaction matches.
    pub fn material_flow(
        &self,
        prototype: &str,
        commodity: &str,
        start: Month,
        end: Option<Month>,
        direction: Direction,
    ) -> QueryResult<f64> {
        let span = TimeSpan::new(start, end);

        let agents = Query::on(Relation::Agents)
            .filter(Predicate::equals(Column::Prototype, prototype.to_string()));
        let agent_ids: BTreeSet<AgentId> =
            unique_ids(Relation::Agents, self.store.ids(&agents, Column::AgentId)?)?;
        if agent_ids.is_empty() {
            return Err(QueryError::EmptyAgentSet {
                prototype: prototype.to_string(),
            });
        }

        let party = match direction {
            Direction::In  => Column::ReceiverId,
            Direction::Out => Column::SenderId,
        };
        let transactions = Query::on(Relation::Transactions)
            .filter(Predicate::in_set(party, agent_ids.iter().copied()))
            .filter(Predicate::within(Column::TransactionTime, span))
            .filter(Predicate::equals(Column::Commodity, commodity.to_string()));
        let txn_ids: BTreeSet<TransactionId> = unique_ids(
            Relation::Transactions,
            self.store.ids(&transactions, Column::TransactionId)?,
        )?;

        if txn_ids.is_empty() {
            log::debug!("{commodity} {direction} {prototype} over {span}: no transactions");
            return Ok(0.0);
        }

        let resources = Query::on(Relation::TransactedResources)
            .filter(Predicate::in_set(Column::ResourceTransactionId, txn_ids.iter().copied()));
        let total = self.store.sum(&resources, Column::Quantity)?;
        log::debug!(
            "{commodity} {direction} {prototype} over {span}: {} transactions, total {total:?}",
            txn_ids.len()
        );
        self.resolve_sum(total, Column::Quantity)
    }

    // ── Enrichment usage ───────────────────────────────────────

    /// Separative work over `[start, end]`, optionally for one enrichment
    /// facility. The agent filter matches the Enrichments row's own ID.
    pub fn swu_usage(
        &self,
        start: Month,
        end: Option<Month>,
        agent_id: Option<AgentId>,
    ) -> QueryResult<f64> {
        self.enrichment_sum(Column::Swu, TimeSpan::new(start, end), agent_id)
    }

    /// Natural uranium feed over `[start, end]`, optionally for one
    /// enrichment facility.
    pub fn nat_u_usage(
        &self,
        start: Month,
        end: Option<Month>,
        agent_id: Option<AgentId>,
    ) -> QueryResult<f64> {
        self.enrichment_sum(Column::NaturalUranium, TimeSpan::new(start, end), agent_id)
    }

    fn enrichment_sum(
        &self,
        column: Column,
        span: TimeSpan,
        agent_id: Option<AgentId>,
    ) -> QueryResult<f64> {
        let mut query = Query::on(Relation::Enrichments)
            .filter(Predicate::within(Column::EnrichmentTime, span));
        if let Some(id) = agent_id {
            query = query.filter(Predicate::equals(Column::EnrichmentId, id));
        }
        let total = self.store.sum(&query, column)?;
        self.resolve_sum(total, column)
    }

    // ── Time bounds ────────────────────────────────────────────

    /// Index of the first simulated month. `sim_id` defaults to the
    /// configured simulation.
    pub fn start_month(&self, sim_id: Option<SimId>) -> QueryResult<Month> {
        Ok(self.time_info(sim_id)?.simulation_start)
    }

    /// Number of simulated months.
    pub fn month_count(&self, sim_id: Option<SimId>) -> QueryResult<Month> {
        Ok(self.time_info(sim_id)?.duration)
    }

    /// Index of the last simulated month: `month_count - start_month - 1`.
    pub fn end_month(&self, sim_id: Option<SimId>) -> QueryResult<Month> {
        let info = self.time_info(sim_id)?;
        Ok(info.duration - info.simulation_start - 1)
    }

    /// `start_month` for the configured simulation.
    pub fn start_month_default(&self) -> QueryResult<Month> {
        self.start_month(Some(self.config.default_sim_id))
    }

    /// `month_count` for the configured simulation.
    pub fn month_count_default(&self) -> QueryResult<Month> {
        self.month_count(Some(self.config.default_sim_id))
    }

    /// `end_month` for the configured simulation.
    pub fn end_month_default(&self) -> QueryResult<Month> {
        self.end_month(Some(self.config.default_sim_id))
    }

    /// `[start_month, end_month]` for the simulation.
    pub fn simulation_span(&self, sim_id: Option<SimId>) -> QueryResult<TimeSpan> {
        let info = self.time_info(sim_id)?;
        Ok(TimeSpan::new(
            info.simulation_start,
            Some(info.duration - info.simulation_start - 1),
        ))
    }

    fn time_info(&self, sim_id: Option<SimId>) -> QueryResult<SimulationTimeInfo> {
        let sim_id = sim_id.unwrap_or(self.config.default_sim_id);
        let rows = self.store.simulation_time_info(sim_id)?;
        match rows.as_slice() {
            [info] => Ok(*info),
            _ => Err(QueryError::Cardinality {
                sim_id,
                rows: rows.len(),
            }),
        }
    }

    // ── Helpers ────────────────────────────────────────────────

    fn resolve_sum(&self, total: Option<f64>, column: Column) -> QueryResult<f64> {
        match (total, self.config.null_sum_policy) {
            (Some(value), _) => Ok(value),
            (None, NullSumPolicy::Zero) => {
                log::warn!("SUM({}) had no rows, reporting 0.0", column.qualified());
                Ok(0.0)
            }
            (None, NullSumPolicy::Fault) => Err(QueryError::NullAggregate {
                column: column.qualified(),
            }),
        }
    }
}

/// Collect ids into a set, failing if any id appeared more than once.
fn unique_ids(relation: Relation, rows: Vec<i64>) -> QueryResult<BTreeSet<i64>> {
    let total = rows.len();
    let ids: BTreeSet<i64> = rows.into_iter().collect();
    if ids.len() != total {
        log::warn!(
            "{} returned {total} rows for {} distinct ids",
            relation.table_name(),
            ids.len()
        );
        return Err(QueryError::Integrity {
            relation: relation.table_name(),
            rows:     total,
            distinct: ids.len(),
        });
    }
    Ok(ids)
}
