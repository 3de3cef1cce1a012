//! Core simulation module for the depot
//!
//! This module contains all the simulation logic without any I/O or rendering
//! dependencies. It is driven the same way by the interactive modes and by
//! external controllers.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::DepotConfig;
pub use engine::{DepotEngine, StepResult};
pub use state::{DepotState, Drone, EndCause, Position};
