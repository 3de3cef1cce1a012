use std::time::{Duration, Instant};

/// Session-level counters shown in the TUI header
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub episodes_flown: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            episodes_flown: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_episode_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_episode_over(&mut self, final_score: u32) {
        self.episodes_flown += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = SessionMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = SessionMetrics::new();

        metrics.on_episode_over(10);
        assert_eq!(metrics.best_score, 10);
        assert_eq!(metrics.episodes_flown, 1);

        metrics.on_episode_over(5);
        assert_eq!(metrics.best_score, 10); // Should not decrease
        assert_eq!(metrics.episodes_flown, 2);

        metrics.on_episode_over(15);
        assert_eq!(metrics.best_score, 15);
        assert_eq!(metrics.episodes_flown, 3);
    }

    #[test]
    fn test_episode_start_resets_time() {
        let mut metrics = SessionMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_episode_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
