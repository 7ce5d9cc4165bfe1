//! Simulation settings with persistence
//!
//! Settings are saved to `~/.config/hearth/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hearth_core::ClockConfig;
use hearth_goap::{AgentConfig, PlannerConfig};

/// All simulation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub planner: PlannerConfig,
    pub agent: AgentConfig,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hearth"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse settings: {}, using defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Tick loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Stop after this many control ticks
    pub max_ticks: u64,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,
    pub clock: ClockConfig,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_ticks: 600,
            realtime: false,
            clock: ClockConfig::default(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse(
            r#"
[planner]
max_depth = 6

[simulation]
max_ticks = 50
"#,
        )
        .unwrap();

        assert_eq!(settings.planner.max_depth, Some(6));
        assert_eq!(settings.planner.max_nodes, None);
        assert_eq!(settings.simulation.max_ticks, 50);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.agent.replan_cooldown, 0.0);
    }

    #[test]
    fn test_round_trip_defaults() {
        let content = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed = Settings::parse(&content).unwrap();
        assert_eq!(parsed.simulation.max_ticks, 600);
        assert_eq!(parsed.planner, PlannerConfig::default());
    }
}
