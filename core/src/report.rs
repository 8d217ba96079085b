//! Whole-simulation summary built from the analytics queries.

use crate::{
    analytics::Analytics,
    error::{QueryError, QueryResult},
    series::MonthlyCount,
    types::{Direction, Month, SimId},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub sim_id:       SimId,
    pub generated_at: DateTime<Utc>,
    pub start_month:  Month,
    pub month_count:  Month,
    pub end_month:    Month,
    pub populations:  Vec<PopulationSeries>,
    pub flows:        Vec<FlowTotal>,
    pub swu_total:    f64,
    pub nat_u_total:  f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopulationSeries {
    pub prototype: String,
    pub counts:    Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowTotal {
    pub prototype: String,
    pub commodity: String,
    pub direction: Direction,
    pub quantity:  f64,
}

impl Analytics<'_> {
    /// Build a report over the whole simulation. Prototype and commodity
    /// lists come from the report config, or from the store when empty.
    pub fn simulation_report(&self, sim_id: Option<SimId>) -> QueryResult<SimulationReport> {
        let sim_id = sim_id.unwrap_or(self.config().default_sim_id);
        let span = self.simulation_span(Some(sim_id))?;
        let report_config = &self.config().report;

        let prototypes = if report_config.prototypes.is_empty() {
            self.store().prototypes()?
        } else {
            report_config.prototypes.clone()
        };
        let commodities = if report_config.commodities.is_empty() {
            self.store().commodities()?
        } else {
            report_config.commodities.clone()
        };
        log::info!(
            "Building report for sim {sim_id} over {span}: {} prototypes, {} commodities",
            prototypes.len(),
            commodities.len()
        );

        let mut populations = Vec::with_capacity(prototypes.len());
        for prototype in &prototypes {
            populations.push(PopulationSeries {
                prototype: prototype.clone(),
                counts:    self.population_series(prototype, span)?,
            });
        }

        let mut flows = Vec::new();
        for prototype in &prototypes {
            for commodity in &commodities {
                for &direction in &report_config.directions {
                    let quantity = self.material_flow(
                        prototype,
                        commodity,
                        span.start,
                        Some(span.end),
                        direction,
                    )?;
                    if quantity != 0.0 {
                        flows.push(FlowTotal {
                            prototype: prototype.clone(),
                            commodity: commodity.clone(),
                            direction,
                            quantity,
                        });
                    }
                }
            }
        }

        Ok(SimulationReport {
            sim_id,
            generated_at: Utc::now(),
            start_month:  span.start,
            month_count:  self.month_count(Some(sim_id))?,
            end_month:    span.end,
            populations,
            flows,
            swu_total:    enrichment_total(
                self.swu_usage(span.start, Some(span.end), None),
                "SWU",
            )?,
            nat_u_total:  enrichment_total(
                self.nat_u_usage(span.start, Some(span.end), None),
                "natural uranium",
            )?,
        })
    }
}

/// A simulation without enrichment (e.g. a once-through reactor fleet) is
/// still reportable: an empty enrichment sum reports 0.0 under any policy.
fn enrichment_total(total: QueryResult<f64>, label: &str) -> QueryResult<f64> {
    match total {
        Err(QueryError::NullAggregate { column }) => {
            log::warn!("No enrichment rows for {label} ({column}), reporting 0.0");
            Ok(0.0)
        }
        other => other,
    }
}

impl SimulationReport {
    /// Plain-text summary for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== SIMULATION {} ===", self.sim_id);
        let _ = writeln!(out, "  generated:   {}", self.generated_at.to_rfc3339());
        let _ = writeln!(out, "  start month: {}", self.start_month);
        let _ = writeln!(out, "  months:      {}", self.month_count);
        let _ = writeln!(out, "  end month:   {}", self.end_month);
        let _ = writeln!(out, "  SWU:         {:.3}", self.swu_total);
        let _ = writeln!(out, "  natural U:   {:.3}", self.nat_u_total);

        let _ = writeln!(out);
        let _ = writeln!(out, "=== POPULATION (peak / final) ===");
        for series in &self.populations {
            let peak = series.counts.iter().map(|c| c.count).max().unwrap_or(0);
            let last = series.counts.last().map(|c| c.count).unwrap_or(0);
            let _ = writeln!(out, "  {:<24} {peak:>6} / {last}", series.prototype);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "=== MATERIAL FLOW ===");
        if self.flows.is_empty() {
            let _ = writeln!(out, "  (no flows recorded)");
        }
        for flow in &self.flows {
            let _ = writeln!(
                out,
                "  {:<24} {:<3} {:<20} {:.3}",
                flow.prototype, flow.direction.as_str(), flow.commodity, flow.quantity
            );
        }
        out
    }
}
