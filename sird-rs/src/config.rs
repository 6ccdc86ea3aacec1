//! Configuration of calibration runs, read from a TOML file.
use crate::{
    data::{InitialState, Observations},
    epidemic::{ModelState, SirdParams},
    error::Result,
    fit::{Grid, GridSearch, ScoreMode},
    prelude::Real,
    sim::{NegativePolicy, Simulator},
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings shared by all binaries. Every field has a default, so any subset
/// can be given in the configuration file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// CSV file with observed data.
    pub data: PathBuf,
    /// Integration step, in days.
    pub dt: Real,
    /// Simulated days. Defaults to the number of observed days minus one.
    pub horizon: Option<usize>,
    pub policy: NegativePolicy,
    pub score: ScoreMode,
    pub initial: InitialState,
    pub parallel: bool,
    pub verbose: bool,
    pub grid: Grid,
    pub plot: PlotConfig,
    /// Optional CSV file receiving simulated and observed curves of the best
    /// fit.
    pub output: Option<PathBuf>,
    pub forecast: ForecastConfig,
    pub synthetic: SyntheticConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: PathBuf::from("sird_dataset.csv"),
            dt: 1.0,
            horizon: None,
            policy: NegativePolicy::default(),
            score: ScoreMode::default(),
            initial: InitialState::default(),
            parallel: true,
            verbose: false,
            grid: Grid::default(),
            plot: PlotConfig::default(),
            output: None,
            forecast: ForecastConfig::default(),
            synthetic: SyntheticConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub enabled: bool,
    pub width: usize,
    pub height: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            enabled: true,
            width: 90,
            height: 16,
        }
    }
}

/// Rates used by the forecast binary.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ForecastConfig {
    pub params: SirdParams,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            params: SirdParams::new(0.33684210526315794, 0.1, 0.01),
        }
    }
}

/// Description of a synthetic dataset.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SyntheticConfig {
    pub params: SirdParams,
    pub initial: ModelState,
    /// Number of rows, day 0 included.
    pub days: usize,
    /// Relative amplitude of the multiplicative noise.
    pub noise: Real,
    pub seed: u64,
    pub output: PathBuf,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        SyntheticConfig {
            params: SirdParams::new(0.33684210526315794, 0.1, 0.01),
            initial: ModelState::new(0.99, 0.01, 0.0, 0.0),
            days: 90,
            noise: 0.02,
            seed: 0,
            output: PathBuf::from("sird_dataset.csv"),
        }
    }
}

impl Config {
    /// Read configuration from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let data = fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Config> {
        Ok(toml::from_str(data)?)
    }

    /// Like from_path(), but falls back to the default configuration if the
    /// file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("{} not found, using default configuration", path.display());
            return Ok(Config::default());
        }
        Self::from_path(path)
    }

    /// Simulated days needed to cover the observations.
    pub fn horizon_for(&self, observations: &Observations) -> usize {
        self.horizon
            .unwrap_or_else(|| observations.len().saturating_sub(1))
    }

    /// Simulator for the given horizon with the configured step and policy.
    pub fn simulator(&self, horizon: usize) -> Result<Simulator> {
        Ok(Simulator::new(self.dt, horizon)?.with_policy(self.policy))
    }

    /// Grid search seeded from the first observation.
    pub fn grid_search(&self, observations: &Observations) -> Result<GridSearch> {
        let simulator = self.simulator(self.horizon_for(observations))?;
        let initial = observations.initial_state(self.initial)?;
        Ok(GridSearch::new(simulator, initial)
            .with_mode(self.score)
            .with_parallel(self.parallel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::SirdError, fit::ParamRange};

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn example_config() {
        let cfg = Config::from_toml(include_str!("../conf.toml")).unwrap();
        assert_eq!(cfg.dt, 0.001);
        assert_eq!(cfg.score, ScoreMode::Compartments);
        assert_eq!(cfg.initial, InitialState::Seeded);
        assert_eq!(cfg.policy, NegativePolicy::Clamp);
        assert_eq!(cfg.grid.len().unwrap(), 320);
        assert_eq!(cfg.synthetic.days, 90);
    }

    #[test]
    fn partial_config() {
        let cfg = Config::from_toml(
            r#"
            dt = 0.5
            horizon = 30
            policy = "allow"
            score = "infectious"
            initial = "from_data"

            [grid]
            beta = [0.2, 0.3]
            mu = 0.01

            [forecast.params]
            beta = 0.25
            gamma = 0.1
            mu = 0.02
            "#,
        )
        .unwrap();
        assert_eq!(cfg.horizon, Some(30));
        assert_eq!(cfg.score, ScoreMode::Infectious);
        assert_eq!(cfg.initial, InitialState::FromData);
        assert_eq!(cfg.grid.beta, ParamRange::List(vec![0.2, 0.3]));
        assert_eq!(cfg.grid.gamma, Grid::default().gamma);
        assert_eq!(cfg.forecast.params, SirdParams::new(0.25, 0.1, 0.02));

        let sim = cfg.simulator(30).unwrap();
        assert_eq!(sim.steps_per_day(), 2);
        assert_eq!(sim.policy(), NegativePolicy::Allow);
    }

    #[test]
    fn grid_search_from_data() {
        let data = "day,S,I,R,D\n0,990,8,1.5,0.5\n1,985,10,4,1\n2,980,12,6,2\n";
        let obs = Observations::from_reader(data.as_bytes()).unwrap();
        let cfg = Config::default();
        let search = cfg.grid_search(&obs).unwrap();
        assert_eq!(search.simulator().horizon(), 2);
        assert_eq!(search.initial(), ModelState::new(990.0, 8.0, 0.0, 0.0));
        assert!(search.parallel());
    }

    #[test]
    fn invalid_config() {
        assert!(matches!(
            Config::from_toml("dt = \"fast\""),
            Err(SirdError::Config(_))
        ));
        let cfg = Config::from_toml("dt = 0.3").unwrap();
        assert!(cfg.simulator(10).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load_or_default("this/file/does/not/exist.toml").unwrap();
        assert_eq!(cfg, Config::default());
    }
}
