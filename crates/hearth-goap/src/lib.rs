//! Hearth GOAP - Goal oriented action planning
//!
//! Provides the action contract, goals, the exhaustive planner, and the
//! per-agent execution loop that turns plans into committed world changes.

pub mod action;
pub mod agent;
pub mod catalog;
pub mod error;
pub mod goal;
pub mod movement;
pub mod planner;

pub use action::{Action, ActionBuilder, ActionData, BasicAction};
pub use agent::{Agent, AgentConfig, AgentState};
pub use catalog::{build_goals, ActionDefinition, Catalog, GoalDefinition};
pub use error::GoapError;
pub use goal::{Goal, GoalSet};
pub use movement::{Movement, Stationary};
pub use planner::{GoapPlanner, Plan, PlannerConfig};
