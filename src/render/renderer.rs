use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{xp_for_score, FoodKind, Phase, Snapshot, SnakeProfile, MAX_GRID_SIZE};
use crate::metrics::GameMetrics;

use super::scene::{food_glyph, SceneRenderer, SnakePalette};
use super::terminal::{to_color, TerminalSurface};

/// Session details shown around the board
pub struct Hud<'a> {
    pub profile: &'a SnakeProfile,
    pub metrics: &'a GameMetrics,
    pub training: bool,
}

pub struct Renderer {
    scene: SceneRenderer,
    cell_size: u32,
}

impl Renderer {
    pub fn new(palette: SnakePalette, cell_size: u32) -> Self {
        Self {
            scene: SceneRenderer::new(palette, cell_size),
            cell_size,
        }
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, hud), chunks[0]);

        let side = snapshot.grid_size.min(MAX_GRID_SIZE) as u16;
        let board_width = side * 2 + 2;
        let board_height = side + 2;
        let game_area = centered(chunks[1], board_width, board_height);

        if snapshot.phase == Phase::GameOver {
            let game_over = self.render_game_over(snapshot, hud.training);
            frame.render_widget(game_over, centered(chunks[1], board_width.max(44), 10));
        } else {
            frame.render_widget(self.render_grid(snapshot), game_area);

            if snapshot.phase == Phase::NotStarted {
                let overlay = centered(game_area, board_width.saturating_sub(4), 5);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_start_overlay(), overlay);
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut surface = TerminalSurface::new(snapshot.grid_size, self.cell_size);
        self.scene.draw(snapshot, &mut surface);

        let title = if snapshot.is_slowed() {
            " Snake - Slow Motion "
        } else {
            " Snake "
        };

        Paragraph::new(surface.lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot, hud: &Hud) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Snake: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.profile.name.clone(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Multiplier: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}x", hud.profile.scoring_multiplier),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if snapshot.is_slowed() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "\u{23F1} Slow Motion",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_start_overlay(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(Span::styled(
                "Press any arrow key or WASD to start",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Use arrow keys or WASD to control",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot, training: bool) -> Paragraph<'static> {
        let reward = if training {
            Line::from(Span::styled(
                "Training mode - No XP earned",
                Style::default().fg(Color::Gray),
            ))
        } else {
            Line::from(vec![
                Span::styled("XP Earned: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("+{} XP", xp_for_score(snapshot.score)),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            reward,
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to go back", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let (regular, regular_color) = food_glyph(FoodKind::Regular);
        let (golden, golden_color) = food_glyph(FoodKind::Golden);

        let text = vec![
            Line::from(vec![
                Span::styled(regular, Style::default().fg(to_color(regular_color.rgb()))),
                Span::raw(" +1 point  "),
                Span::styled(golden, Style::default().fg(to_color(golden_color.rgb()))),
                Span::raw(" +5 points  "),
                Span::raw("\u{23F1} Slow motion"),
            ]),
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to go back"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
