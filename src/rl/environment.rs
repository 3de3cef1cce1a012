use anyhow::Result;

use super::observation::{observe, Observation};
use crate::game::{Action, DepotConfig, DepotEngine, DepotState};
use crate::render::{Frontend, Headless};

/// Depot environment for external controllers
///
/// Wraps the engine and provides the RL interface: `reset()` reinitializes
/// the episode and `step(action)` advances it by one frame, returning
/// `(reward, done, score)`. The environment composes with a display/timing
/// collaborator; with the default [`Headless`] frontend, steps neither
/// render nor wait, and with [`crate::render::TuiFrontend`] every
/// non-terminal step drains pending input, draws the state, and blocks
/// until the next tick of the fixed-rate clock.
///
/// Callers must invoke `reset()` after a terminal result before stepping
/// again.
pub struct DepotEnv<F: Frontend = Headless> {
    engine: DepotEngine,
    state: DepotState,
    frontend: F,
}

impl DepotEnv<Headless> {
    /// Create a headless environment
    pub fn new(config: DepotConfig) -> Self {
        Self::with_frontend(config, Headless)
    }

    /// Headless environment with a fixed RNG seed
    pub fn with_seed(config: DepotConfig, seed: u64) -> Self {
        let mut engine = DepotEngine::with_seed(config, seed);
        let state = engine.reset();
        Self {
            engine,
            state,
            frontend: Headless,
        }
    }
}

impl<F: Frontend> DepotEnv<F> {
    /// Environment with an attached display/timing collaborator
    pub fn with_frontend(config: DepotConfig, frontend: F) -> Self {
        let mut engine = DepotEngine::new(config);
        let state = engine.reset();
        Self {
            engine,
            state,
            frontend,
        }
    }

    /// Reinitialize the episode state
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
    }

    /// Advance the simulation by one step
    ///
    /// Returns `(reward, done, score)`. Terminal steps return before the
    /// render and the clock tick, matching the step contract.
    pub fn step(&mut self, action: Action) -> Result<(i32, bool, u32)> {
        self.frontend.pump()?;

        let result = self.engine.step(&mut self.state, action);

        if !result.done {
            self.frontend.present(&self.state)?;
            self.frontend.wait_tick();
        }

        Ok((result.reward, result.done, result.score))
    }

    /// Get the current observation without stepping
    pub fn observation(&self) -> Observation {
        observe(&self.state)
    }

    /// Get a reference to the current simulation state
    pub fn state(&self) -> &DepotState {
        &self.state
    }

    pub fn config(&self) -> &DepotConfig {
        self.engine.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};

    #[test]
    fn test_environment_creation() {
        let env = DepotEnv::with_seed(DepotConfig::default(), 3);

        assert_eq!(env.state().score, 0);
        assert_eq!(env.state().frames, 0);
        assert!(!env.state().done);
    }

    #[test]
    fn test_step_returns_contract_tuple() {
        let mut env = DepotEnv::with_seed(DepotConfig::default(), 3);

        let (reward, done, score) = env.step(Action::STRAIGHT).unwrap();

        assert_eq!(reward, 0);
        assert!(!done);
        assert_eq!(score, 0);
        assert_eq!(env.state().frames, 1);
    }

    #[test]
    fn test_reset_after_terminal() {
        let mut env = DepotEnv::with_seed(DepotConfig::small(), 3);
        env.state.drone.trail[0] = Position::new(0, 80);
        env.state.drone.heading = Direction::Left;

        let (reward, done, _) = env.step(Action::STRAIGHT).unwrap();
        assert!(done);
        assert_eq!(reward, -10);

        env.reset();
        assert!(!env.state().done);
        assert_eq!(env.state().frames, 0);
        assert_eq!(env.state().drone.trail.len(), 1);
    }

    #[test]
    fn test_pickup_through_environment() {
        let mut env = DepotEnv::with_seed(DepotConfig::default(), 3);
        let head = env.state().drone.head();
        let cell = env.state().cell;
        env.state.cargo = head.stepped(Direction::Up, cell);

        let (reward, done, score) = env.step(Action::STRAIGHT).unwrap();

        assert_eq!(reward, 10);
        assert!(!done);
        assert_eq!(score, 1);
    }

    #[test]
    fn test_episode_runs_to_termination() {
        let mut env = DepotEnv::with_seed(DepotConfig::small(), 3);

        let mut steps = 0;
        loop {
            let (_, done, _) = env.step(Action::STRAIGHT).unwrap();
            steps += 1;
            if done {
                break;
            }
            assert!(steps < 1000, "episode failed to terminate");
        }
    }

    #[test]
    fn test_observation_shape() {
        let env = DepotEnv::with_seed(DepotConfig::default(), 3);
        let obs = env.observation();

        assert_eq!(obs.len(), crate::rl::OBSERVATION_LEN);
        assert!(obs.iter().all(|f| *f == 0.0 || *f == 1.0));
    }
}
