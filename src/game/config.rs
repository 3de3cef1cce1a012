use serde::{Deserialize, Serialize};

/// Configuration for the depot simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotConfig {
    /// Width of the depot grid in pixels
    pub width: i32,
    /// Height of the depot grid in pixels
    pub height: i32,
    /// Pixel edge length of one grid cell
    pub cell: i32,
    /// Evaluation layout: spawn at the door, cargo placed beside the racks
    pub trained: bool,
    /// Fixed tick rate applied by the synchronous frontend
    pub ticks_per_second: u32,

    // Rewards (for RL)
    /// Reward for picking up a cargo item
    pub pickup_reward: i32,
    /// Reward for leaving the grid or stalling out
    pub crash_penalty: i32,
    /// Reward for completing the pick quota
    pub quota_bonus: i32,

    /// An episode stalls out after `stall_factor * (score + 1)` frames
    pub stall_factor: u32,
    /// The episode ends with the bonus once the score passes this quota
    pub quota: u32,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            cell: 20,
            trained: false,
            ticks_per_second: 40,
            pickup_reward: 10,
            crash_penalty: -10,
            quota_bonus: 10,
            stall_factor: 100,
            quota: 100,
        }
    }
}

impl DepotConfig {
    /// Create a configuration with custom grid size and layout
    pub fn new(width: i32, height: i32, trained: bool) -> Self {
        Self {
            width,
            height,
            trained,
            ..Default::default()
        }
    }

    /// Create a small grid for testing; too short for any rack columns
    pub fn small() -> Self {
        Self::new(200, 160, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DepotConfig::default();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.cell, 20);
        assert!(!config.trained);
        assert_eq!(config.pickup_reward, 10);
        assert_eq!(config.crash_penalty, -10);
        assert_eq!(config.stall_factor, 100);
        assert_eq!(config.quota, 100);
    }

    #[test]
    fn test_custom_config() {
        let config = DepotConfig::new(320, 240, true);
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert!(config.trained);
        assert_eq!(config.cell, 20);
    }
}
