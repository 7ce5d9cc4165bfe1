//! GOAP goal definitions

use hearth_core::{FactEntry, WorldState};

use crate::action::facts_for;
use crate::error::GoapError;

/// A desired set of facts
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub name: String,
    pub desired_state: WorldState,
    /// Drop the goal from the agent once a plan for it has run to completion
    pub remove_on_achieve: bool,
}

impl Goal {
    /// Create a goal that wants a single fact
    pub fn new(name: impl Into<String>, key: &str, value: i32) -> Self {
        Self {
            name: name.into(),
            desired_state: WorldState::from_fact(key, value),
            remove_on_achieve: false,
        }
    }

    /// Create a goal from authored entries, rejecting repeated keys
    pub fn from_entries(name: impl Into<String>, entries: &[FactEntry]) -> Result<Self, GoapError> {
        let name = name.into();
        let desired_state = facts_for(&name, entries)?;
        Ok(Self {
            name,
            desired_state,
            remove_on_achieve: false,
        })
    }

    pub fn with_fact(mut self, key: &str, value: i32) -> Self {
        self.desired_state.set_state(key, value);
        self
    }

    pub fn remove_on_achieve(mut self, remove: bool) -> Self {
        self.remove_on_achieve = remove;
        self
    }

    /// True if every goal key is present in `state`
    pub fn is_satisfied_by(&self, state: &WorldState) -> bool {
        state.satisfies(&self.desired_state)
    }
}

/// An agent's goals, each paired with an integer priority
#[derive(Debug, Clone, Default)]
pub struct GoalSet {
    entries: Vec<(Goal, i32)>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a goal, replacing any existing goal with the same name
    pub fn insert(&mut self, goal: Goal, priority: i32) {
        match self.entries.iter_mut().find(|(g, _)| g.name == goal.name) {
            Some(entry) => *entry = (goal, priority),
            None => self.entries.push((goal, priority)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Goal> {
        let idx = self.entries.iter().position(|(g, _)| g.name == name)?;
        Some(self.entries.remove(idx).0)
    }

    pub fn get(&self, name: &str) -> Option<&Goal> {
        self.entries.iter().map(|(g, _)| g).find(|g| g.name == name)
    }

    pub fn priority(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(g, _)| g.name == name)
            .map(|(_, p)| *p)
    }

    /// Goals in descending priority. Equal priorities keep insertion order.
    pub fn by_priority(&self) -> Vec<&Goal> {
        let mut sorted: Vec<&(Goal, i32)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.into_iter().map(|(g, _)| g).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
