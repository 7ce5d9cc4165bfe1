//! Authoring data for actions, goals, and starting facts
//!
//! Facts are written as `{ key, value }` lists so that repeated keys can be
//! caught at load time instead of silently overwriting each other.

use serde::{Deserialize, Serialize};

use hearth_core::{FactEntry, WorldState};

use crate::action::ActionData;
use crate::error::GoapError;
use crate::goal::{Goal, GoalSet};

/// One authored action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub name: String,
    #[serde(default)]
    pub cost: f32,
    #[serde(default)]
    pub duration: f32,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub preconditions: Vec<FactEntry>,
    #[serde(default)]
    pub effects: Vec<FactEntry>,
}

impl ActionDefinition {
    pub fn build(&self) -> Result<ActionData, GoapError> {
        let mut builder = ActionData::builder(&self.name)
            .cost(self.cost)
            .duration(self.duration)
            .preconditions(self.preconditions.iter().cloned())
            .effects(self.effects.iter().cloned());
        if let Some(target) = &self.target {
            builder = builder.target(target);
        }
        builder.build()
    }
}

/// One authored goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDefinition {
    pub name: String,
    pub facts: Vec<FactEntry>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub remove_on_achieve: bool,
}

impl GoalDefinition {
    pub fn build(&self) -> Result<Goal, GoapError> {
        Ok(Goal::from_entries(&self.name, &self.facts)?.remove_on_achieve(self.remove_on_achieve))
    }
}

/// Actions, goals, and starting facts for a single agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub world: Vec<FactEntry>,
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
    #[serde(default)]
    pub goals: Vec<GoalDefinition>,
}

impl Catalog {
    pub fn from_toml_str(content: &str) -> Result<Self, GoapError> {
        Ok(toml::from_str(content)?)
    }

    pub fn world_state(&self) -> Result<WorldState, GoapError> {
        Ok(WorldState::from_entries(&self.world)?)
    }

    pub fn actions(&self) -> Result<Vec<ActionData>, GoapError> {
        self.actions.iter().map(ActionDefinition::build).collect()
    }

    pub fn goals(&self) -> Result<GoalSet, GoapError> {
        build_goals(&self.goals)
    }
}

/// Validate a list of goal definitions into a priority-ordered set
pub fn build_goals(definitions: &[GoalDefinition]) -> Result<GoalSet, GoapError> {
    let mut goals = GoalSet::new();
    for def in definitions {
        goals.insert(def.build()?, def.priority);
    }
    Ok(goals)
}
