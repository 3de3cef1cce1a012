use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;

use super::clock::TickClock;
use super::renderer::{RenderTheme, Renderer};
use crate::game::{DepotConfig, DepotState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;

/// Display and timing collaborator invoked by the environment on every step
pub trait Frontend {
    /// Drain and discard pending input; a quit request ends the process here
    fn pump(&mut self) -> Result<()>;

    /// Draw the current state
    fn present(&mut self, state: &DepotState) -> Result<()>;

    /// Block until the next tick of the fixed-rate clock
    fn wait_tick(&mut self);
}

/// Frontend that does nothing; steps run at full speed
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Frontend for Headless {
    fn pump(&mut self) -> Result<()> {
        Ok(())
    }

    fn present(&mut self, _state: &DepotState) -> Result<()> {
        Ok(())
    }

    fn wait_tick(&mut self) {}
}

/// Terminal frontend: raw-mode ratatui display plus the fixed-rate clock
///
/// The terminal is acquired on construction and restored when the frontend
/// is dropped. A quit request seen while draining input restores the
/// terminal and exits the process; the simulation never observes it.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    input_handler: InputHandler,
    metrics: SessionMetrics,
    clock: TickClock,
    restored: bool,
}

impl TuiFrontend {
    pub fn new(config: &DepotConfig) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self {
            terminal,
            renderer: Renderer::new(RenderTheme::default(), !config.trained),
            input_handler: InputHandler::new(),
            metrics: SessionMetrics::new(),
            clock: TickClock::new(config.ticks_per_second),
            restored: false,
        })
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Frontend for TuiFrontend {
    fn pump(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO).context("Failed to poll input")? {
            let event = event::read().context("Failed to read input")?;

            if let Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if self.input_handler.handle_key_event(key) == KeyAction::Quit {
                    let _ = self.restore();
                    std::process::exit(0);
                }
            }
        }

        Ok(())
    }

    fn present(&mut self, state: &DepotState) -> Result<()> {
        self.metrics.update();
        self.terminal
            .draw(|frame| self.renderer.render(frame, state, &self.metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn wait_tick(&mut self) {
        self.clock.wait();
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
