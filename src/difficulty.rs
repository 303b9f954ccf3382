//! Difficulty tiers
//!
//! Each tier fixes the target size, the wind range and how fast the power
//! gauge fills. Physics is otherwise identical across tiers.

use serde::{Deserialize, Serialize};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "medium" | "med" | "normal" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    /// Parse a tier name, falling back to medium for anything unrecognized
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{}', using {}", s, Tier::default().as_str());
            Tier::default()
        })
    }

    /// Gameplay parameters for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Tier::Easy => DifficultyProfile {
                target_size: 200.0,
                wind_scale: 0.03,
                power_charge_rate: 1.2,
            },
            Tier::Medium => DifficultyProfile {
                target_size: 180.0,
                wind_scale: 0.05,
                power_charge_rate: 1.5,
            },
            Tier::Hard => DifficultyProfile {
                target_size: 160.0,
                wind_scale: 0.08,
                power_charge_rate: 1.8,
            },
        }
    }
}

/// Per-round gameplay parameters (immutable once the round starts)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Target diameter
    pub target_size: f32,
    /// Max magnitude of the per-shot wind acceleration
    pub wind_scale: f32,
    /// Power gauge units gained per tick while aiming
    pub power_charge_rate: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Tier::default().profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Tier::parse("Easy"), Some(Tier::Easy));
        assert_eq!(Tier::parse(" hard "), Some(Tier::Hard));
        assert_eq!(Tier::parse("med"), Some(Tier::Medium));
        assert_eq!(Tier::parse("nightmare"), None);
    }

    #[test]
    fn test_unknown_tier_defaults_to_medium() {
        assert_eq!(Tier::parse_or_default("???"), Tier::Medium);
        assert_eq!(Tier::parse_or_default(""), Tier::Medium);
    }

    #[test]
    fn test_profiles_get_harder() {
        let easy = Tier::Easy.profile();
        let hard = Tier::Hard.profile();
        assert!(easy.target_size > hard.target_size);
        assert!(easy.wind_scale < hard.wind_scale);
        for tier in Tier::ALL {
            let p = tier.profile();
            assert!(p.target_size > 0.0 && p.wind_scale >= 0.0 && p.power_charge_rate > 0.0);
            // Wind never outweighs gravity, so every flight comes down
            assert!(p.wind_scale < crate::consts::GRAVITY);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Tier::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let tier: Tier = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(tier, Tier::Easy);
    }
}
