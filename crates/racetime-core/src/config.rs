use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Tunables for one analysis run. All values are seconds.
///
/// No cross-field validation is done: an inverted duration window simply classifies every
/// finished attempt as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub max_reasonable_race_time: f64,
    pub min_reasonable_race_time: f64,
    /// Inactivity that closes a session.
    pub session_gap_threshold: f64,
    /// Accepted for compatibility with existing config files; neither pairing strategy reads it.
    pub pairing_tolerance: f64,
    /// Reads of the same bib and timing point closer than this are duplicates.
    pub duplicate_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_reasonable_race_time: 300.0,
            min_reasonable_race_time: 1.0,
            session_gap_threshold: 600.0,
            pairing_tolerance: 10.0,
            duplicate_threshold: 0.5,
        }
    }
}

impl AnalysisConfig {
    /// Parses a TOML document; fields it leaves out keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str::<AnalysisConfig>(toml_str)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(value) = overrides.max_reasonable_race_time {
            self.max_reasonable_race_time = value;
        }
        if let Some(value) = overrides.min_reasonable_race_time {
            self.min_reasonable_race_time = value;
        }
        if let Some(value) = overrides.session_gap_threshold {
            self.session_gap_threshold = value;
        }
        if let Some(value) = overrides.pairing_tolerance {
            self.pairing_tolerance = value;
        }
        if let Some(value) = overrides.duplicate_threshold {
            self.duplicate_threshold = value;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub max_reasonable_race_time: Option<f64>,
    pub min_reasonable_race_time: Option<f64>,
    pub session_gap_threshold: Option<f64>,
    pub pairing_tolerance: Option<f64>,
    pub duplicate_threshold: Option<f64>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
