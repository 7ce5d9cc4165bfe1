//! Boundary to whatever moves an agent through the world
//!
//! The agent loop only hands over an action's target identifier and asks
//! whether the agent has arrived. Pathfinding and positions live on the
//! other side of this trait.

/// Movement provider consulted while an action is dispatched
pub trait Movement {
    /// Begin moving toward `target`
    fn move_to(&mut self, target: &str);

    /// True once the agent is close enough to `target` to start the action
    fn has_arrived(&self, target: &str) -> bool;
}

/// Movement provider for agents that never travel; every target counts as reached
#[derive(Debug, Clone, Copy, Default)]
pub struct Stationary;

impl Movement for Stationary {
    fn move_to(&mut self, _target: &str) {}

    fn has_arrived(&self, _target: &str) -> bool {
        true
    }
}
