use super::{
    action::{Action, Direction},
    config::DepotConfig,
    state::{DepotState, Drone, EndCause, Position},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Result of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: i32,
    /// Whether the episode has terminated
    pub done: bool,
    /// Items picked up so far this episode
    pub score: u32,
}

/// The engine that advances the simulation
pub struct DepotEngine {
    config: DepotConfig,
    rng: StdRng,
}

impl DepotEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: DepotConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed RNG seed, for reproducible cargo placement
    pub fn with_seed(config: DepotConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &DepotConfig {
        &self.config
    }

    /// Reset the simulation to initial state
    pub fn reset(&mut self) -> DepotState {
        let cell = self.config.cell;
        let door = Position::new(0, self.config.height - cell);

        let head = if self.config.trained {
            door
        } else {
            Position::new(self.config.width / 2, self.config.height / 2)
        };

        let racks = Self::build_racks(&self.config);

        let cargo = if self.config.trained {
            self.sample_cargo_trained(&racks, door, false)
        } else {
            self.sample_cargo_explore(&racks)
        };

        DepotState {
            drone: Drone::new(head, Direction::Up),
            cargo,
            racks,
            door,
            width: self.config.width,
            height: self.config.height,
            cell,
            score: 0,
            frames: 0,
            done: false,
            end: None,
        }
    }

    /// Execute one step of the simulation
    ///
    /// Terminal paths return before the tail pop, so the trail is left one
    /// segment longer than steady state on the episode's final step.
    pub fn step(&mut self, state: &mut DepotState, action: Action) -> StepResult {
        state.frames += 1;

        state.drone.heading = state.drone.heading.resolve(action);
        let new_head = state.drone.head().stepped(state.drone.heading, state.cell);
        state.drone.trail.insert(0, new_head);

        let left_grid = state.is_collision(new_head);
        let stalled = state.frames > self.config.stall_factor * (state.score + 1);

        if left_grid || stalled {
            state.done = true;
            state.end = Some(if left_grid {
                EndCause::LeftGrid
            } else {
                EndCause::Stalled
            });

            return StepResult {
                reward: self.config.crash_penalty,
                done: true,
                score: state.score,
            };
        }

        if state.score > self.config.quota {
            state.done = true;
            state.end = Some(EndCause::QuotaMet);

            return StepResult {
                reward: self.config.quota_bonus,
                done: true,
                score: state.score,
            };
        }

        let mut reward = 0;

        if new_head == state.cargo {
            state.score += 1;
            reward = self.config.pickup_reward;

            state.cargo = if self.config.trained {
                // Return to the door after every pick away from it
                let by_door = state.cargo != state.door;
                self.sample_cargo_trained(&state.racks, state.door, by_door)
            } else {
                self.sample_cargo_explore(&state.racks)
            };
        }

        state.drone.trail.pop();

        StepResult {
            reward,
            done: false,
            score: state.score,
        }
    }

    /// Build the three fixed rack columns
    fn build_racks(config: &DepotConfig) -> Vec<Position> {
        let cell = config.cell;
        let column_len = (config.height / cell - 8).max(0);

        let mut racks = Vec::new();
        for k in 0..3 {
            let top = Position::new(cell * 4 + 10 * cell * k, cell * 4);
            for i in 0..column_len {
                racks.push(Position::new(top.x, top.y + i * cell));
            }
        }

        racks
    }

    /// Uniformly sample a grid-aligned cell, resampling while it lands on a rack
    fn sample_cargo_explore(&mut self, racks: &[Position]) -> Position {
        let cell = self.config.cell;
        let cols = (self.config.width - cell) / cell;
        let rows = (self.config.height - cell) / cell;

        loop {
            let pos = Position::new(
                self.rng.gen_range(0..=cols) * cell,
                self.rng.gen_range(0..=rows) * cell,
            );

            if !racks.contains(&pos) {
                return pos;
            }
        }
    }

    /// Place the cargo at the door, or one cell beside a random rack cell
    fn sample_cargo_trained(
        &mut self,
        racks: &[Position],
        door: Position,
        by_door: bool,
    ) -> Position {
        if by_door {
            return door;
        }

        let target = racks[self.rng.gen_range(0..racks.len())];
        let offset = if self.rng.gen_bool(0.5) {
            self.config.cell
        } else {
            -self.config.cell
        };

        Position::new(target.x + offset, target.y)
    }
}
