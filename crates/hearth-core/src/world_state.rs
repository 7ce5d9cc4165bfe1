//! World state representation: named integer facts

use std::collections::hash_map::{self, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CoreError;

/// A single `(key, value)` fact as written in authoring data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactEntry {
    pub key: String,
    pub value: i32,
}

impl FactEntry {
    pub fn new(key: impl Into<String>, value: i32) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Set of facts describing the world.
///
/// Facts only exist while their value is positive after an increment;
/// `edit_state` removes any fact that drops to zero or below. The planner
/// tests facts by presence, the stored value is only meaningful to action
/// hooks that read or adjust it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldState {
    facts: HashMap<String, i32>,
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            facts: HashMap::new(),
        }
    }

    /// Create a WorldState with a single fact
    pub fn from_fact(key: &str, value: i32) -> Self {
        let mut ws = Self::new();
        ws.set_state(key, value);
        ws
    }

    /// Build a state from authored entries, rejecting repeated keys
    pub fn from_entries(entries: &[FactEntry]) -> Result<Self, CoreError> {
        let mut ws = Self::new();
        for entry in entries {
            if ws.contains(&entry.key) {
                return Err(CoreError::DuplicateFact(entry.key.clone()));
            }
            ws.set_state(&entry.key, entry.value);
        }
        Ok(ws)
    }

    /// Insert or overwrite a fact.
    pub fn set_state(&mut self, key: &str, value: i32) {
        self.facts.insert(key.to_string(), value);
    }

    /// Add `delta` to a fact, creating it if absent.
    ///
    /// An existing fact whose value ends up `<= 0` is removed.
    pub fn edit_state(&mut self, key: &str, delta: i32) {
        match self.facts.get_mut(key) {
            Some(value) => {
                *value = value.saturating_add(delta);
                if *value <= 0 {
                    self.facts.remove(key);
                }
            }
            None => self.set_state(key, delta),
        }
    }

    /// Remove a fact, returning its last value.
    ///
    /// Deleting a missing fact leaves the state untouched and is logged.
    pub fn delete_state(&mut self, key: &str) -> Result<i32, CoreError> {
        match self.facts.remove(key) {
            Some(value) => Ok(value),
            None => {
                warn!("Cannot delete state '{}', it does not exist", key);
                Err(CoreError::StateNotFound(key.to_string()))
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.facts.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    /// Read-only view of every fact
    pub fn states(&self) -> &HashMap<String, i32> {
        &self.facts
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, i32> {
        self.facts.iter()
    }

    /// Check that every key in `required` is present in this state.
    /// Values are not compared.
    pub fn satisfies(&self, required: &WorldState) -> bool {
        required.keys().all(|key| self.contains(key))
    }

    /// Keys of `required` missing from this state
    pub fn missing<'a>(&'a self, required: &'a WorldState) -> impl Iterator<Item = &'a str> {
        required.keys().filter(move |key| !self.contains(key))
    }

    /// Insert facts from `other` whose keys are absent here.
    ///
    /// Existing values are never overwritten.
    pub fn merge_absent(&mut self, other: &WorldState) {
        for (key, value) in &other.facts {
            self.facts.entry(key.clone()).or_insert(*value);
        }
    }

    /// Number of facts
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl<'a> IntoIterator for &'a WorldState {
    type Item = (&'a String, &'a i32);
    type IntoIter = hash_map::Iter<'a, String, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}
