//! GOAP action definitions

use hearth_core::{CoreError, FactEntry, WorldState};

use crate::error::GoapError;

/// Static description of something an agent can do.
///
/// Preconditions and effects are fixed once built; planning only ever
/// reads them.
#[derive(Debug, Clone)]
pub struct ActionData {
    name: String,
    cost: f32,
    duration: f32,
    target: Option<String>,
    preconditions: WorldState,
    effects: WorldState,
}

impl ActionData {
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Seconds the action runs once the agent is in place
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Identifier handed to the movement provider, if the action has a location
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn preconditions(&self) -> &WorldState {
        &self.preconditions
    }

    pub fn effects(&self) -> &WorldState {
        &self.effects
    }

    /// Write the effects into a live world, overwriting existing values
    pub fn commit_effects(&self, world: &mut WorldState) {
        for (key, value) in &self.effects {
            world.set_state(key, *value);
        }
    }
}

/// Builder that validates authoring data before producing an [`ActionData`]
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    name: String,
    cost: f32,
    duration: f32,
    target: Option<String>,
    preconditions: Vec<FactEntry>,
    effects: Vec<FactEntry>,
}

impl ActionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: 0.0,
            duration: 0.0,
            target: None,
            preconditions: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn precondition(mut self, key: impl Into<String>, value: i32) -> Self {
        self.preconditions.push(FactEntry::new(key, value));
        self
    }

    pub fn effect(mut self, key: impl Into<String>, value: i32) -> Self {
        self.effects.push(FactEntry::new(key, value));
        self
    }

    pub fn preconditions(mut self, entries: impl IntoIterator<Item = FactEntry>) -> Self {
        self.preconditions.extend(entries);
        self
    }

    pub fn effects(mut self, entries: impl IntoIterator<Item = FactEntry>) -> Self {
        self.effects.extend(entries);
        self
    }

    pub fn build(self) -> Result<ActionData, GoapError> {
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(GoapError::InvalidCost(self.name));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(GoapError::InvalidDuration(self.name));
        }

        let preconditions = facts_for(&self.name, &self.preconditions)?;
        let effects = facts_for(&self.name, &self.effects)?;

        Ok(ActionData {
            name: self.name,
            cost: self.cost,
            duration: self.duration,
            target: self.target,
            preconditions,
            effects,
        })
    }
}

/// Build a fact set, attributing duplicate keys to `owner`
pub fn facts_for(owner: &str, entries: &[FactEntry]) -> Result<WorldState, GoapError> {
    WorldState::from_entries(entries).map_err(|err| match err {
        CoreError::DuplicateFact(key) => GoapError::DuplicateFact {
            owner: owner.to_string(),
            key,
        },
        other => GoapError::State(other),
    })
}

/// Something an agent can do to change world state.
///
/// Implementors supply their [`ActionData`] and may override the lifecycle
/// hooks. Returning `false` from either hook discards the rest of the
/// running plan.
pub trait Action {
    fn data(&self) -> &ActionData;

    fn name(&self) -> &str {
        self.data().name()
    }

    /// True if every precondition key is present in `state`
    fn check_plausibility(&self, state: &WorldState) -> bool {
        state.satisfies(self.data().preconditions())
    }

    /// Called when the agent dequeues the action
    fn on_action_start(&mut self, _world: &WorldState) -> bool {
        true
    }

    /// Called once the action's duration has elapsed
    fn on_action_complete(&mut self, world: &mut WorldState) -> bool {
        self.data().commit_effects(world);
        true
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn data(&self) -> &ActionData {
        (**self).data()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn check_plausibility(&self, state: &WorldState) -> bool {
        (**self).check_plausibility(state)
    }

    fn on_action_start(&mut self, world: &WorldState) -> bool {
        (**self).on_action_start(world)
    }

    fn on_action_complete(&mut self, world: &mut WorldState) -> bool {
        (**self).on_action_complete(world)
    }
}

/// Action with the default hooks: always starts, commits its effects on completion
#[derive(Debug, Clone)]
pub struct BasicAction(pub ActionData);

impl Action for BasicAction {
    fn data(&self) -> &ActionData {
        &self.0
    }
}

impl From<ActionData> for BasicAction {
    fn from(data: ActionData) -> Self {
        Self(data)
    }
}
