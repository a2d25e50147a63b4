//! Analysis profiles
//!
//! A profile is a small TOML file bundling the settings for one instrumented
//! target: where its definition table lives and how its tick counter scales
//! to physical time. Command-line flags override profile values.

use crate::domain::time::{self, TickConverter};
use crate::error::{MtagsError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Tick-to-time scale of the instrumented target
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TimeScale {
    pub ticks_per_second: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_unit() -> String {
    "s".to_string()
}

fn default_precision() -> usize {
    3
}

impl TimeScale {
    pub fn converter(&self) -> TickConverter {
        time::from_rate(self.ticks_per_second, &self.unit, self.precision)
    }
}

/// An analysis profile loaded from TOML
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Profile {
    /// Definition table to load before analysis
    pub definitions: Option<PathBuf>,

    /// Tick scale; absent means raw ticks
    pub time: Option<TimeScale>,
}

impl Profile {
    /// Load a profile from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let profile: Profile = toml::from_str(&contents)?;
        if let Some(scale) = &profile.time {
            if scale.ticks_per_second <= 0.0 {
                return Err(MtagsError::Config(format!(
                    "ticks-per-second must be positive, got {}",
                    scale.ticks_per_second
                )));
            }
        }
        Ok(profile)
    }

    /// Resolve the definitions path relative to the profile's own directory
    pub fn definitions_path(&self, profile_path: &Path) -> Option<PathBuf> {
        let definitions = self.definitions.as_ref()?;
        if definitions.is_absolute() {
            Some(definitions.clone())
        } else {
            Some(
                profile_path
                    .parent()
                    .unwrap_or(Path::new("."))
                    .join(definitions),
            )
        }
    }
}
