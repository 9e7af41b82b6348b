use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::catalog::Scenario;
use crate::engine::EngineSettings;
use crate::simulation::{SimulatorConfig, UsagePatterns};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineSettings,
    pub patterns: UsagePatterns,
    pub simulation: SimulatorConfig,
    pub demo: DemoConfig,
}

/// What the demo binary sets up before running an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub scenario: Scenario,
    /// Trailing window the analysis covers, in days.
    pub analysis_days: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::FamilyHome,
            analysis_days: 30,
        }
    }
}

impl Config {
    /// Layered load: built-in defaults, then `config/default.toml`, then
    /// `HOMEWATT__`-prefixed environment variables (`__` nests sections,
    /// e.g. `HOMEWATT__SIMULATION__SEED=42`).
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("HOMEWATT__").split("__"));
        Ok(figment.extract()?)
    }
}
