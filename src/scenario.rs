//! Scenario files: starting facts, named locations, and the agents that live there

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use hearth_core::{FactEntry, WorldState};
use hearth_goap::GoalDefinition;

use crate::actions::StockedActionDefinition;

/// A point agents can walk to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub position: Vec3,
}

/// One agent as written in a scenario file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub actions: Vec<StockedActionDefinition>,
    #[serde(default)]
    pub goals: Vec<GoalDefinition>,
}

fn default_speed() -> f32 {
    3.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub world: Vec<FactEntry>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub agents: Vec<AgentDefinition>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse scenario {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Starting world state shared by every agent
    pub fn world_state(&self) -> Result<WorldState> {
        WorldState::from_entries(&self.world).context("Invalid starting world")
    }

    pub fn location_map(&self) -> HashMap<String, Vec3> {
        self.locations
            .iter()
            .map(|l| (l.name.clone(), l.position))
            .collect()
    }
}
