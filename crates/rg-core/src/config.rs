//! Tunable game settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Numeric settings consumed by the revolver table.
///
/// The cylinder always has six chambers; only the misfire chance, the
/// inactivity timeout, the default switch value, and the mute bounds vary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Chance that an ordinary message triggers a misfire.
    pub misfire_probability: f64,
    /// Seconds without a load or shot before a game is cleared.
    pub timeout_secs: u64,
    /// Misfire switch value for groups that have never toggled it.
    pub default_misfire: bool,
    /// Shortest mute, in seconds.
    #[serde(alias = "min_ban_duration")]
    pub min_mute_secs: u64,
    /// Longest mute, in seconds.
    #[serde(alias = "max_ban_duration")]
    pub max_mute_secs: u64,
    /// RNG seed for reproducible games. Seeded from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            misfire_probability: 0.005,
            timeout_secs: 180,
            default_misfire: false,
            min_mute_secs: 60,
            max_mute_secs: 3000,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Set the misfire probability.
    pub fn with_misfire_probability(mut self, probability: f64) -> Self {
        self.misfire_probability = probability;
        self
    }

    /// Set the inactivity timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the misfire switch default.
    pub fn with_default_misfire(mut self, enabled: bool) -> Self {
        self.default_misfire = enabled;
        self
    }

    /// Set both mute bounds in seconds.
    pub fn with_mute_range(mut self, min_secs: u64, max_secs: u64) -> Self {
        self.min_mute_secs = min_secs;
        self.max_mute_secs = max_secs;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The inactivity timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that the settings describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.misfire_probability) {
            return Err(ConfigError::Probability(self.misfire_probability));
        }
        if self.max_mute_secs < self.min_mute_secs {
            return Err(ConfigError::MuteBounds {
                min: self.min_mute_secs,
                max: self.max_mute_secs,
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let cfg = GameSettings::default();
        assert!((cfg.misfire_probability - 0.005).abs() < f64::EPSILON);
        assert_eq!(cfg.timeout_secs, 180);
        assert!(!cfg.default_misfire);
        assert_eq!(cfg.min_mute_secs, 60);
        assert_eq!(cfg.max_mute_secs, 3000);
        assert_eq!(cfg.seed, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = GameSettings::default()
            .with_misfire_probability(0.5)
            .with_timeout_secs(30)
            .with_default_misfire(true)
            .with_mute_range(5, 10)
            .with_seed(7);
        assert!((cfg.misfire_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert!(cfg.default_misfire);
        assert_eq!((cfg.min_mute_secs, cfg.max_mute_secs), (5, 10));
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn reversed_mute_bounds_rejected() {
        let cfg = GameSettings::default().with_mute_range(100, 10);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MuteBounds { min: 100, max: 10 })
        );
    }

    #[test]
    fn equal_mute_bounds_allowed() {
        assert!(GameSettings::default().with_mute_range(60, 60).validate().is_ok());
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let cfg = GameSettings::default().with_misfire_probability(1.5);
        assert_eq!(cfg.validate(), Err(ConfigError::Probability(1.5)));
        let cfg = GameSettings::default().with_misfire_probability(f64::NAN);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg = GameSettings::default().with_timeout_secs(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn legacy_ban_keys_accepted() {
        let cfg: GameSettings =
            serde_json::from_str(r#"{"min_ban_duration": 10, "max_ban_duration": 20}"#).unwrap();
        assert_eq!((cfg.min_mute_secs, cfg.max_mute_secs), (10, 20));
        assert_eq!(cfg.timeout_secs, 180);
    }
}
