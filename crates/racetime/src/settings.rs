use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use racetime_core::{AnalysisConfig, ConfigOverrides};
use tracing::info;

/// Where the analysis settings come from: defaults, then the config file, then flags or env.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// TOML file with analysis settings; fields it leaves out keep their defaults
    #[arg(long, env = "RACETIME_CONFIG")]
    pub config: Option<PathBuf>,
    /// Longest plausible race, in seconds
    #[arg(long, env = "RACETIME_MAX_RACE_TIME")]
    pub max_race_time: Option<f64>,
    /// Shortest plausible race, in seconds
    #[arg(long, env = "RACETIME_MIN_RACE_TIME")]
    pub min_race_time: Option<f64>,
    /// Inactivity, in seconds, that closes a session
    #[arg(long, env = "RACETIME_SESSION_GAP")]
    pub session_gap: Option<f64>,
    #[arg(long, env = "RACETIME_PAIRING_TOLERANCE")]
    pub pairing_tolerance: Option<f64>,
    /// Repeated reads of one bib at one timing point closer than this are merged
    #[arg(long, env = "RACETIME_DUPLICATE_THRESHOLD")]
    pub duplicate_threshold: Option<f64>,
}

impl ConfigArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            max_reasonable_race_time: self.max_race_time,
            min_reasonable_race_time: self.min_race_time,
            session_gap_threshold: self.session_gap,
            pairing_tolerance: self.pairing_tolerance,
            duplicate_threshold: self.duplicate_threshold,
        }
    }

    pub fn resolve(&self) -> Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => {
                let config = AnalysisConfig::load(path).with_context(|| {
                    format!("failed to load analysis config from {}", path.display())
                })?;
                info!(path = %path.display(), "Loaded analysis config");
                config
            }
            None => AnalysisConfig::default(),
        };

        let overrides = self.overrides();
        if !overrides.is_empty() {
            info!(?overrides, "Applying analysis config overrides");
        }
        Ok(base.with_overrides(&overrides))
    }
}
