//! Depot Drone - a warehouse drone simulation with a reinforcement-learning
//! environment interface
//!
//! This library provides:
//! - Core simulation logic (game module): the grid, the racks, the door,
//!   cargo placement, and the step/reward contract
//! - The environment wrapper and scripted policies (rl module)
//! - TUI rendering and the synchronous step frontend (render module)
//! - Keyboard handling (input module)
//! - Session and episode statistics (metrics module)
//! - Execution modes: human, pilot, rollout (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
