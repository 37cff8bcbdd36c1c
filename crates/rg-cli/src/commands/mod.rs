pub mod play;
pub mod switches;

use std::path::Path;

use crate::config::PluginConfig;

/// Settings flags that override the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    /// RNG seed.
    pub seed: Option<u64>,
    /// Inactivity timeout in seconds.
    pub timeout: Option<u64>,
    /// Misfire probability.
    pub probability: Option<f64>,
}

/// Read the config file (or defaults when none is given) and apply flag
/// overrides on top.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<PluginConfig, String> {
    let mut config = match path {
        Some(path) => PluginConfig::load(path)?,
        None => PluginConfig::default(),
    };
    let settings = &mut config.game_settings;
    if let Some(seed) = overrides.seed {
        settings.seed = Some(seed);
    }
    if let Some(timeout) = overrides.timeout {
        settings.timeout_secs = timeout;
    }
    if let Some(probability) = overrides.probability {
        settings.misfire_probability = probability;
    }
    Ok(config)
}

/// Print the default config file.
pub fn default_config() -> Result<(), String> {
    println!("{}", PluginConfig::default_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win() {
        let overrides = Overrides {
            seed: Some(9),
            timeout: Some(5),
            probability: Some(0.25),
        };
        let cfg = load_config(None, &overrides).unwrap();
        assert_eq!(cfg.game_settings.seed, Some(9));
        assert_eq!(cfg.game_settings.timeout_secs, 5);
        assert!((cfg.game_settings.misfire_probability - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        let cfg = load_config(None, &Overrides::default()).unwrap();
        assert_eq!(cfg, PluginConfig::default());
    }
}
