//! Watch mode for the scripted pilot
//!
//! Runs the greedy pilot against the environment in a TUI. Users can
//! control playback speed, pause, and reset episodes.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Reset episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{Stderr, stderr},
    time::Duration,
};
use tokio::time::{Interval, interval};

use crate::game::DepotConfig;
use crate::metrics::SessionMetrics;
use crate::render::{RenderTheme, Renderer};
use crate::rl::{DepotEnv, GreedyPilot, Policy};

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step) - same as human mode
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl PlaybackSpeed {
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }
}

/// Watch the scripted pilot fly episodes
pub struct PilotMode {
    env: DepotEnv,
    pilot: GreedyPilot,
    renderer: Renderer,
    metrics: SessionMetrics,
    should_quit: bool,
    paused: bool,
    speed: PlaybackSpeed,
    done: bool,
}

impl PilotMode {
    pub fn new(config: DepotConfig) -> Self {
        let renderer = Renderer::new(RenderTheme::default(), !config.trained);
        let env = DepotEnv::new(config);

        Self {
            env,
            pilot: GreedyPilot::new(),
            renderer,
            metrics: SessionMetrics::new(),
            should_quit: false,
            paused: false,
            speed: PlaybackSpeed::Normal,
            done: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_playback_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_playback_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation ticks based on speed
        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle keyboard input
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        if self.done {
                            // Auto-restart
                            self.env.reset();
                            self.done = false;
                            self.metrics.on_episode_start();
                        } else {
                            self.step_pilot()?;
                        }
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.env.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Step the pilot forward one action
    fn step_pilot(&mut self) -> Result<()> {
        let action = self.pilot.act(self.env.state());
        let (_reward, done, score) = self.env.step(action)?;

        if done {
            self.done = true;
            self.metrics.on_episode_over(score);
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                }
                KeyCode::Char('r') => {
                    self.env.reset();
                    self.done = false;
                    self.metrics.on_episode_start();
                }
                KeyCode::Char('1') => {
                    self.change_speed(PlaybackSpeed::Slow, tick_timer);
                }
                KeyCode::Char('2') => {
                    self.change_speed(PlaybackSpeed::Normal, tick_timer);
                }
                KeyCode::Char('3') => {
                    self.change_speed(PlaybackSpeed::Fast, tick_timer);
                }
                KeyCode::Char('4') => {
                    self.change_speed(PlaybackSpeed::VeryFast, tick_timer);
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn change_speed(&mut self, new_speed: PlaybackSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        tick_timer.reset_after(self.speed.tick_interval());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_speeds() {
        assert_eq!(
            PlaybackSpeed::Slow.tick_interval(),
            Duration::from_millis(500)
        );
        assert_eq!(
            PlaybackSpeed::Normal.tick_interval(),
            Duration::from_millis(125)
        );
        assert_eq!(
            PlaybackSpeed::Fast.tick_interval(),
            Duration::from_millis(50)
        );
        assert_eq!(
            PlaybackSpeed::VeryFast.tick_interval(),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn test_mode_creation() {
        let mode = PilotMode::new(DepotConfig::default());
        assert!(!mode.paused);
        assert!(!mode.done);
        assert_eq!(mode.speed, PlaybackSpeed::Normal);
    }

    #[test]
    fn test_pilot_steps_advance_frames() {
        let mut mode = PilotMode::new(DepotConfig::default());

        for _ in 0..20 {
            mode.step_pilot().unwrap();
            if mode.done {
                break;
            }
        }

        assert!(mode.env.state().frames >= 1);
        assert!(mode.env.state().frames <= 20);
    }
}
