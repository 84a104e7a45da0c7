use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use std::collections::HashSet;

use crate::game::{Cell, CollisionKind, Grid, Snapshot, Status};
use crate::metrics::SessionMetrics;

const HEAD: &str = "■ ";
const BODY: &str = "□ ";
const FOOD: &str = "● ";
const EMPTY: &str = "· ";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &SessionMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let (width, height) = board_size(snapshot.grid);
        let board = centered(chunks[1], width, height);
        frame.render_widget(self.render_grid(snapshot), board);

        if snapshot.is_game_over() {
            let panel = centered(chunks[1], 34, 8);
            frame.render_widget(Clear, panel);
            frame.render_widget(self.render_game_over(snapshot), panel);
        }

        frame.render_widget(self.render_controls(snapshot), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let body: HashSet<Cell> = snapshot.body.iter().skip(1).copied().collect();
        let crashed = matches!(snapshot.status, Status::GameOver(_));

        let head_style = Style::default()
            .fg(if crashed { Color::Red } else { Color::Cyan })
            .add_modifier(Modifier::BOLD);
        let body_style = Style::default().fg(Color::Green);
        let food_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let empty_style = Style::default().fg(Color::DarkGray);

        let lines: Vec<Line> = (0..snapshot.grid.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..snapshot.grid.columns)
                    .map(|column| {
                        let cell = Cell::new(column, row);
                        if cell == head {
                            Span::styled(HEAD, head_style)
                        } else if body.contains(&cell) {
                            Span::styled(BODY, body_style)
                        } else if cell == snapshot.food {
                            Span::styled(FOOD, food_style)
                        } else {
                            Span::styled(EMPTY, empty_style)
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &SessionMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.max(snapshot.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.body.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let (title, color, cause) = match snapshot.status {
            Status::Won => ("YOU WIN", Color::Green, "The board is full"),
            Status::GameOver(CollisionKind::Wall) => ("GAME OVER", Color::Red, "Hit the wall"),
            Status::GameOver(CollisionKind::SelfCollision) => {
                ("GAME OVER", Color::Red, "Bit your own tail")
            }
            Status::Playing => ("", Color::White, ""),
        };

        let text = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(" or ", Style::default().fg(Color::Gray)),
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                Span::styled("Esc", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = if snapshot.is_game_over() {
            Line::from(vec![
                Span::styled("R/Enter", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Esc/Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Esc/Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal size of the bordered board: two characters per cell, saturating on huge grids
fn board_size(grid: Grid) -> (u16, u16) {
    let cells = |n: i32| u16::try_from(n.max(0)).unwrap_or(u16::MAX);
    (
        cells(grid.columns).saturating_mul(2).saturating_add(2),
        cells(grid.rows).saturating_add(2),
    )
}

/// A `width` x `height` rect centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
