//! Scripted controllers for the depot environment

use crate::game::{Action, DepotState, Position};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// A controller that picks a turn command from the current state
pub trait Policy {
    fn act(&mut self, state: &DepotState) -> Action;
}

/// Scripted pilot that stays on the grid and closes on the cargo
///
/// The candidate cell of each command is scored by Manhattan distance to
/// the cargo; commands that leave the grid are discarded first. With every
/// candidate out of bounds the pilot flies straight.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPilot;

impl GreedyPilot {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for GreedyPilot {
    fn act(&mut self, state: &DepotState) -> Action {
        let head = state.drone.head();

        Action::ALL
            .into_iter()
            .map(|action| {
                let heading = state.drone.heading.resolve(action);
                (action, head.stepped(heading, state.cell))
            })
            .filter(|(_, cell)| !state.is_collision(*cell))
            .min_by_key(|(_, cell)| manhattan(*cell, state.cargo))
            .map(|(action, _)| action)
            .unwrap_or(Action::STRAIGHT)
    }
}

fn manhattan(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Uniformly random turn commands
pub struct RandomPilot {
    rng: StdRng,
}

impl RandomPilot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPilot {
    fn act(&mut self, _state: &DepotState) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::ALL.len())]
    }
}
