//! Run settings
//!
//! Non-physics parameters for a session host: RNG seed, default player
//! name and tier, tick rate. Physics is fixed per tier and not configurable.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SIM_DT, TICKS_PER_SECOND};
use crate::difficulty::Tier;

/// Session host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Wind RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Player name (blank falls back to a default label)
    pub player_name: String,
    /// Difficulty used when none is selected explicitly
    pub tier: Tier,
    /// Simulation ticks per second
    pub ticks_per_second: f32,
    /// Maximum ticks the host may run per frame
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            player_name: String::new(),
            tier: Tier::Medium,
            ticks_per_second: TICKS_PER_SECOND,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults.
    /// Returns the settings and a warning if the file couldn't be used.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => match Self::from_json(&text) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    (settings, None)
                }
                Err(e) => (
                    Self::default(),
                    Some(format!("failed to parse {}: {}", path.display(), e)),
                ),
            },
            Err(e) => (
                Self::default(),
                Some(format!("failed to read {}: {}", path.display(), e)),
            ),
        }
    }

    /// Check for values the host can't run with. Returns human-readable warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.ticks_per_second.is_finite() || self.ticks_per_second <= 0.0 {
            warnings.push(format!(
                "ticks_per_second must be positive (got {})",
                self.ticks_per_second
            ));
        } else if self.ticks_per_second != TICKS_PER_SECOND {
            warnings.push(format!(
                "ticks_per_second {} differs from {}; arrow physics is tuned per tick",
                self.ticks_per_second, TICKS_PER_SECOND
            ));
        }
        if self.max_substeps == 0 {
            warnings.push("max_substeps of 0 would never advance the simulation".to_string());
        }
        warnings
    }

    /// Seconds per tick, falling back to the default rate for bad values
    pub fn tick_interval(&self) -> f32 {
        if self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0 {
            1.0 / self.ticks_per_second
        } else {
            SIM_DT
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "seed": 42, "tier": "hard" }"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.tier, Tier::Hard);
        assert_eq!(s.max_substeps, MAX_SUBSTEPS);
        assert!(s.player_name.is_empty());
        assert!(s.validate().is_empty());
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
        assert!(Settings::from_json(r#"{ "tier": "impossible" }"#).is_err());
    }

    #[test]
    fn test_validate_flags_problems() {
        let s = Settings {
            ticks_per_second: 0.0,
            max_substeps: 0,
            ..Default::default()
        };
        let warnings = s.validate();
        assert_eq!(warnings.len(), 2);
        assert!((s.tick_interval() - SIM_DT).abs() < 1e-9);
    }

    #[test]
    fn test_long_name_is_fine() {
        let s = Settings {
            player_name: "Robin of Locksley, Earl of Huntingdon".to_string(),
            ..Default::default()
        };
        assert!(s.validate().is_empty());
    }

    #[test]
    fn test_load_or_default_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "tier": "impossible" }"#).unwrap();
        let (s, warning) = Settings::load_or_default(file.path());
        assert_eq!(s, Settings::default());
        assert!(warning.unwrap().contains("failed to parse"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let (s, warning) = Settings::load_or_default("/definitely/not/here/bullseye.json");
        assert_eq!(s, Settings::default());
        assert!(warning.unwrap().contains("failed to read"));
    }

    #[test]
    fn test_load_or_default_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "player_name": "Robin", "tier": "easy" }"#)
            .unwrap();
        let (s, warning) = Settings::load_or_default(file.path());
        assert!(warning.is_none());
        assert_eq!(s.player_name, "Robin");
        assert_eq!(s.tier, Tier::Easy);
    }
}
