use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{DepotState, EndCause, Position};
use crate::metrics::SessionMetrics;

/// Styles for the depot display, owned by the renderer
#[derive(Debug, Clone)]
pub struct RenderTheme {
    pub drone: Style,
    pub trail: Style,
    pub cargo: Style,
    pub rack: Style,
    pub door: Style,
    pub floor: Style,
}

impl Default for RenderTheme {
    fn default() -> Self {
        Self {
            drone: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            trail: Style::default().fg(Color::Green),
            cargo: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            rack: Style::default().fg(Color::DarkGray),
            door: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            floor: Style::default().fg(Color::DarkGray),
        }
    }
}

pub struct Renderer {
    theme: RenderTheme,
    /// The item counter is hidden in the evaluation layout
    show_counter: bool,
}

impl Renderer {
    pub fn new(theme: RenderTheme, show_counter: bool) -> Self {
        Self {
            theme,
            show_counter,
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &DepotState, metrics: &SessionMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Depot area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the depot grid horizontally
        let depot_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.done {
            let flight_over = self.render_flight_over(depot_area, state);
            frame.render_widget(flight_over, depot_area);
        } else {
            let grid = self.render_grid(depot_area, state);
            frame.render_widget(grid, depot_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &DepotState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.height / state.cell {
            let mut spans = Vec::new();

            for x in 0..state.width / state.cell {
                let pos = Position::new(x * state.cell, y * state.cell);

                let cell = if pos == state.drone.head() {
                    Span::styled("■ ", self.theme.drone)
                } else if state.drone.trail.contains(&pos) {
                    Span::styled("□ ", self.theme.trail)
                } else if pos == state.cargo {
                    // the door only shows when the return pick sits on it
                    if pos == state.door {
                        Span::styled("▒ ", self.theme.door)
                    } else {
                        Span::styled("O ", self.theme.cargo)
                    }
                } else if state.is_rack(pos) {
                    Span::styled("▓ ", self.theme.rack)
                } else {
                    Span::styled(". ", self.theme.floor)
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Depot "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        state: &DepotState,
        metrics: &SessionMetrics,
    ) -> Paragraph<'_> {
        if !self.show_counter {
            return Paragraph::new("").alignment(Alignment::Center);
        }

        let text = vec![Line::from(vec![
            Span::styled("Items: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Steps: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.frames.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_flight_over(&self, _area: Rect, state: &DepotState) -> Paragraph<'_> {
        let cause = match state.end {
            Some(EndCause::LeftGrid) => "Left the depot grid",
            Some(EndCause::Stalled) => "Stalled out",
            Some(EndCause::QuotaMet) => "Pick quota met",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "FLIGHT OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                cause,
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Items found: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderTheme::default(), true)
    }
}
