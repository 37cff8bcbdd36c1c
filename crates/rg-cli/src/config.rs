//! The plugin config file: game settings plus custom flavor text.

use std::path::Path;

use rg_core::GameSettings;
use serde::{Deserialize, Serialize};

/// Newline-separated custom flavor lines. Blank entries keep the built-in
/// lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomTexts {
    /// Misfire openers.
    pub misfire_descriptions: String,
    /// Victim reactions, shared by hits and misfires.
    pub user_reactions: String,
    /// Hit openers.
    pub trigger_descriptions: String,
    /// Empty chamber lines.
    pub miss_messages: String,
}

/// Everything the config file may contain. Missing keys take defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Numeric game settings.
    pub game_settings: GameSettings,
    /// Custom flavor text.
    pub custom_texts: CustomTexts,
}

impl PluginConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        serde_json::from_str(&text).map_err(|e| format!("invalid config {}: {e}", path.display()))
    }

    /// The default config as pretty JSON.
    pub fn default_json() -> Result<String, String> {
        serde_json::to_string_pretty(&Self::default()).map_err(|e| e.to_string())
    }
}
