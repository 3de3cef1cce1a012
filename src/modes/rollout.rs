//! Batch rollout mode
//!
//! Runs the scripted pilot through the environment for a fixed number of
//! episodes, tracking rolling statistics and printing progress. With
//! `watch` set, the synchronous terminal frontend is attached, so every
//! step draws the depot and blocks until the next tick of the fixed-rate
//! clock.

use anyhow::Result;

use crate::game::DepotConfig;
use crate::metrics::EpisodeStats;
use crate::render::{Frontend, Headless, TuiFrontend};
use crate::rl::{DepotEnv, GreedyPilot, Policy};

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of episodes to fly
    pub num_episodes: usize,

    /// Print progress every N episodes
    pub log_frequency: usize,

    /// Simulation configuration
    pub depot_config: DepotConfig,

    /// Attach the terminal frontend to every step
    pub watch: bool,
}

impl RolloutConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            log_frequency: 20,
            depot_config: DepotConfig::default(),
            watch: false,
        }
    }
}

/// Rollout mode driving the scripted pilot
pub struct RolloutMode<F: Frontend> {
    env: DepotEnv<F>,
    pilot: GreedyPilot,
    stats: EpisodeStats,
    config: RolloutConfig,
}

impl RolloutMode<Headless> {
    /// Headless rollout; episodes run at full speed
    pub fn new(config: RolloutConfig) -> Self {
        let env = DepotEnv::new(config.depot_config.clone());

        Self {
            env,
            pilot: GreedyPilot::new(),
            stats: EpisodeStats::new(100),
            config,
        }
    }
}

impl RolloutMode<TuiFrontend> {
    /// Rollout with the fixed-rate terminal display attached to each step
    pub fn watched(config: RolloutConfig) -> Result<Self> {
        let frontend = TuiFrontend::new(&config.depot_config)?;
        let env = DepotEnv::with_frontend(config.depot_config.clone(), frontend);

        Ok(Self {
            env,
            pilot: GreedyPilot::new(),
            stats: EpisodeStats::new(100),
            config,
        })
    }
}

impl<F: Frontend> RolloutMode<F> {
    /// Fly the configured number of episodes
    pub fn run(mut self) -> Result<()> {
        // stdout is unusable while the watch frontend holds the terminal
        let quiet = self.config.watch;

        if !quiet {
            self.print_header();
        }

        for episode in 0..self.config.num_episodes {
            let (episode_reward, episode_steps, episode_score) = self.run_episode()?;

            self.stats
                .record_episode(episode_reward, episode_steps, episode_score);

            if !quiet && (episode + 1) % self.config.log_frequency == 0 {
                self.print_progress(episode + 1);
            }
        }

        // Release the frontend (and the terminal with it) before the summary
        let Self { env, stats, .. } = self;
        drop(env);

        println!("\nRollout complete!");
        println!("{}", stats.format_summary());

        Ok(())
    }

    /// Fly a single episode to its terminal step
    fn run_episode(&mut self) -> Result<(i32, usize, u32)> {
        self.env.reset();

        let mut episode_reward = 0;
        let mut episode_steps = 0;

        loop {
            let action = self.pilot.act(self.env.state());
            let (reward, done, score) = self.env.step(action)?;

            episode_reward += reward;
            episode_steps += 1;

            if done {
                return Ok((episode_reward, episode_steps, score));
            }
        }
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Depot Rollout - drone_depot");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.num_episodes);
        println!(
            "Grid: {}x{} px, {} px cells",
            self.config.depot_config.width,
            self.config.depot_config.height,
            self.config.depot_config.cell
        );
        println!(
            "Layout: {}",
            if self.config.depot_config.trained {
                "trained (door spawn, rack-adjacent cargo)"
            } else {
                "explore (center spawn, random cargo)"
            }
        );
        println!(
            "Rewards: pickup {:+}, crash {:+}, quota {:+}",
            self.config.depot_config.pickup_reward,
            self.config.depot_config.crash_penalty,
            self.config.depot_config.quota_bonus
        );
        println!("Logging: Every {} episodes", self.config.log_frequency);
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, episode: usize) {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.num_episodes,
            self.stats.format_summary()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollout_config_creation() {
        let config = RolloutConfig::new(1000);
        assert_eq!(config.num_episodes, 1000);
        assert_eq!(config.log_frequency, 20);
        assert!(!config.watch);
    }

    #[test]
    fn test_run_single_episode() {
        let mut config = RolloutConfig::new(1);
        config.depot_config = DepotConfig::small();

        let mut rollout = RolloutMode::new(config);
        let (reward, steps, score) = rollout.run_episode().unwrap();

        assert!(steps > 0);
        // Either crashed out or picked something up along the way
        assert!(reward < 0 || score > 0);
    }

    #[test]
    fn test_run_records_episodes() {
        let mut config = RolloutConfig::new(3);
        config.depot_config = DepotConfig::small();
        config.log_frequency = 1000;

        let rollout = RolloutMode::new(config);
        rollout.run().unwrap();
    }
}
