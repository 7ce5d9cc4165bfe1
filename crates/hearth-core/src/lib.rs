//! Hearth Core - Shared types for the Hearth planning engine
//!
//! This crate provides the foundational types used by the planner and the
//! simulation host:
//! - World state (named integer facts) and authoring fact entries
//! - Fixed-timestep simulation clock driving the control loop
//! - Common error types

pub mod clock;
pub mod error;
pub mod world_state;

pub use clock::{ClockConfig, SimClock};
pub use error::CoreError;
pub use world_state::{FactEntry, WorldState};
