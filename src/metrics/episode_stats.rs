//! Episode statistics tracking for batch rollouts
//!
//! Tracks episode-level metrics (rewards, lengths, scores) using rolling
//! windows for smoothed statistics.

use std::collections::VecDeque;

/// Episode statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use drone_depot::metrics::EpisodeStats;
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record_episode(15, 150, 5);
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<i32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Episode scores (items picked) (rolling window)
    episode_scores: VecDeque<u32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl EpisodeStats {
    /// Create a tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(&mut self, reward: i32, length: usize, score: u32) {
        Self::push_window(&mut self.episode_rewards, reward, self.window_size);
        Self::push_window(&mut self.episode_lengths, length, self.window_size);
        Self::push_window(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<i32>() as f32 / self.episode_rewards.len() as f32
        }
    }

    /// Mean episode length in steps over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f32 / self.episode_lengths.len() as f32
        }
    }

    /// Mean episode score (items picked) over the rolling window
    pub fn mean_episode_score(&self) -> f32 {
        if self.episode_scores.is_empty() {
            0.0
        } else {
            self.episode_scores.iter().sum::<u32>() as f32 / self.episode_scores.len() as f32
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Items: {:.2} | Len: {:.1}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
        )
    }

    fn push_window<T>(window: &mut VecDeque<T>, value: T, window_size: usize) {
        if window.len() >= window_size {
            window.pop_front();
        }
        window.push_back(value);
    }
}
