use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Action, DepotConfig, DepotEngine, DepotState, Direction};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{RenderTheme, Renderer};

/// Interactive mode: fly the drone with the keyboard
///
/// Key presses select an absolute heading, which is resolved against the
/// drone's current heading into the relative turn command the simulation
/// consumes. Steering into the opposite heading is ignored.
pub struct HumanMode {
    engine: DepotEngine,
    state: DepotState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_steer: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: DepotConfig) -> Self {
        let renderer = Renderer::new(RenderTheme::default(), !config.trained);
        let mut engine = DepotEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_steer: None,
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation ticks at 8 Hz (125ms per tick)
        let tick_interval = Duration::from_millis(125);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    if !self.state.done {
                        self.update_simulation()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
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

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(heading) => {
                    self.pending_steer = Some(heading);
                }
                KeyAction::Restart => {
                    self.reset_episode();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_simulation(&mut self) -> Result<()> {
        let action = self
            .pending_steer
            .map(|desired| self.state.drone.heading.steer_toward(desired))
            .unwrap_or(Action::STRAIGHT);

        self.pending_steer = None;

        let result = self.engine.step(&mut self.state, action);

        if result.done {
            self.metrics.on_episode_over(self.state.score);
        }

        Ok(())
    }

    fn reset_episode(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_episode_start();
        self.pending_steer = None;
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
    fn test_initialization() {
        let mode = HumanMode::new(DepotConfig::default());
        assert!(!mode.state.done);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.drone.heading, Direction::Up);
    }

    #[test]
    fn test_reset_episode() {
        let mut mode = HumanMode::new(DepotConfig::default());
        mode.state.score = 10;
        mode.state.done = true;
        mode.reset_episode();
        assert_eq!(mode.state.score, 0);
        assert!(!mode.state.done);
    }

    #[test]
    fn test_steer_is_relative() {
        let mut mode = HumanMode::new(DepotConfig::default());
        // heading up, steering right resolves to a right turn
        mode.pending_steer = Some(Direction::Right);
        mode.update_simulation().unwrap();
        assert_eq!(mode.state.drone.heading, Direction::Right);

        // the opposite heading is ignored and the drone flies straight
        mode.pending_steer = Some(Direction::Left);
        mode.update_simulation().unwrap();
        assert_eq!(mode.state.drone.heading, Direction::Right);
    }
}
