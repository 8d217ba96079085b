use crate::types::{Direction, SimId, DEFAULT_SIM_ID};
use serde::{Deserialize, Serialize};

/// How `active_agent_count` treats agents that have no AgentDeaths row.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurvivorPolicy {
    /// Count only agents entered by the end of the span that also have a
    /// death recorded at or after its start. Agents that never exited are
    /// left out.
    #[default]
    AsRecorded,
    /// Agents with no death row are still active and are counted.
    IncludeSurvivors,
}

/// What an aggregate returns when no row contributes to the sum.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NullSumPolicy {
    #[default]
    Zero,
    Fault,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Prototypes to report on. Empty: every prototype in the database.
    #[serde(default)]
    pub prototypes: Vec<String>,
    /// Commodities to report on. Empty: every commodity in the database.
    #[serde(default)]
    pub commodities: Vec<String>,
    #[serde(default = "default_directions")]
    pub directions: Vec<Direction>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            prototypes:  Vec::new(),
            commodities: Vec::new(),
            directions:  default_directions(),
        }
    }
}

fn default_directions() -> Vec<Direction> {
    vec![Direction::In, Direction::Out]
}

fn default_sim_id() -> SimId {
    DEFAULT_SIM_ID
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_sim_id")]
    pub default_sim_id: SimId,
    #[serde(default)]
    pub survivor_policy: SurvivorPolicy,
    #[serde(default)]
    pub null_sum_policy: NullSumPolicy,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_sim_id:  DEFAULT_SIM_ID,
            survivor_policy: SurvivorPolicy::default(),
            null_sum_policy: NullSumPolicy::default(),
            report:          ReportConfig::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
