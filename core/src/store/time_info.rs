use super::OutputStore;
use crate::{
    error::QueryResult,
    query::{Column, Predicate, Query, Relation},
    types::{Month, SimId},
};
use rusqlite::params_from_iter;
use serde::{Deserialize, Serialize};

/// One row of the SimulationTimeInfo relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationTimeInfo {
    pub sim_id:           SimId,
    pub simulation_start: Month,
    pub duration:         Month,
}

impl OutputStore {
    /// Every SimulationTimeInfo row for `sim_id`. The exactly-one contract
    /// is enforced by the caller.
    pub fn simulation_time_info(&self, sim_id: SimId) -> QueryResult<Vec<SimulationTimeInfo>> {
        let query = Query::on(Relation::SimulationTimeInfo)
            .filter(Predicate::equals(Column::SimId, sim_id));
        let (from_where, params) = query.render_from_where()?;
        let sql = format!(
            "SELECT {}, {}, {} {from_where}",
            Column::SimId.name(),
            Column::SimulationStart.name(),
            Column::Duration.name(),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(SimulationTimeInfo {
                    sim_id:           row.get(0)?,
                    simulation_start: row.get(1)?,
                    duration:         row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
