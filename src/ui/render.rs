//! Level rendering
//!
//! Lit tiles in full color, remembered tiles dimmed, unseen tiles blank.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

use crate::game::Game;
use crate::world::{Level, Position};

const OBSERVER_GLYPH: char = '@';
const OBSERVER_COLOR: (u8, u8, u8) = (230, 220, 160);

/// Draw the whole screen: status line on top, map below
pub fn draw(frame: &mut Frame, game: &Game) {
    // Clear the entire screen first to prevent artifacts
    frame.render_widget(Clear, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(frame.area());

    frame.render_widget(status_line(game), chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Delve ")
        .border_style(Style::default().fg(Color::Rgb(100, 90, 80)));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    frame.render_widget(LevelView::new(game.level(), game.observer()), inner);
}

fn status_line(game: &Game) -> Paragraph<'static> {
    let line = match game.prompt() {
        Some(prompt) => Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        None => {
            let pos = game.observer();
            let level = game.level();
            Line::from(vec![
                Span::styled(format!(" ({}, {}) ", pos.x, pos.y), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!(
                        " rooms {}  seen {}/{} ",
                        level.rooms().len(),
                        level.seen_count(),
                        level.tiles().len()
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(" hjklyubn move, q quit", Style::default().fg(Color::DarkGray)),
            ])
        }
    };
    Paragraph::new(line)
}

/// Map widget centered on the observer
pub struct LevelView<'a> {
    level: &'a Level,
    observer: Position,
}

impl<'a> LevelView<'a> {
    pub fn new(level: &'a Level, observer: Position) -> Self {
        Self { level, observer }
    }

    /// Top-left map coordinate shown in a viewport of the given size
    pub fn camera(&self, view_width: i32, view_height: i32) -> Position {
        let clamp = |center: i32, view: i32, extent: i32| {
            (center - view / 2).clamp(0, (extent - view).max(0))
        };
        Position::new(
            clamp(self.observer.x, view_width, self.level.width()),
            clamp(self.observer.y, view_height, self.level.height()),
        )
    }
}

impl Widget for LevelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view_width = area.width as i32;
        let view_height = area.height as i32;
        let cam = self.camera(view_width, view_height);

        for screen_y in 0..view_height {
            for screen_x in 0..view_width {
                let map_x = cam.x + screen_x;
                let map_y = cam.y + screen_y;
                let cell = &mut buf[(area.x + screen_x as u16, area.y + screen_y as u16)];

                let Some(tile) = self.level.get_tile(map_x, map_y) else {
                    cell.set_char(' ');
                    continue;
                };

                if self.level.is_visible(map_x, map_y) || tile.seen {
                    let lit = self.level.is_visible(map_x, map_y);
                    let (fr, fg, fb) = tile.fg_color(lit);
                    let (br, bg, bb) = tile.bg_color(lit);
                    cell.set_char(tile.glyph());
                    cell.set_fg(Color::Rgb(fr, fg, fb));
                    cell.set_bg(Color::Rgb(br, bg, bb));
                } else {
                    // Never seen
                    cell.set_char(' ');
                    cell.set_bg(Color::Black);
                }
            }
        }

        let screen_x = self.observer.x - cam.x;
        let screen_y = self.observer.y - cam.y;
        if (0..view_width).contains(&screen_x) && (0..view_height).contains(&screen_y) {
            let (r, g, b) = OBSERVER_COLOR;
            let cell = &mut buf[(area.x + screen_x as u16, area.y + screen_y as u16)];
            cell.set_char(OBSERVER_GLYPH);
            cell.set_fg(Color::Rgb(r, g, b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridSize;

    fn corridor_level() -> Level {
        let mut level = Level::new(GridSize::new(20, 5));
        for x in 1..19 {
            level.carve(x, 2);
        }
        level
    }

    #[test]
    fn test_camera_clamps_to_map() {
        let level = corridor_level();
        let view = LevelView::new(&level, Position::new(1, 2));
        assert_eq!(view.camera(10, 5), Position::new(0, 0));

        let view = LevelView::new(&level, Position::new(18, 2));
        assert_eq!(view.camera(10, 5), Position::new(10, 0));

        // Viewport larger than the map
        assert_eq!(view.camera(40, 10), Position::new(0, 0));
    }

    #[test]
    fn test_lit_remembered_and_unseen_cells() {
        let mut level = corridor_level();
        level.compute_fov(Position::new(2, 2), 3);
        level.compute_fov(Position::new(10, 2), 3);

        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        LevelView::new(&level, Position::new(10, 2)).render(area, &mut buf);

        assert_eq!(buf[(10, 2)].symbol(), "@");
        // Lit floor next to the observer
        assert_eq!(buf[(11, 2)].symbol(), ".");
        assert_eq!(buf[(11, 2)].fg, Color::Rgb(80, 80, 80));
        // Remembered from the first position, drawn dimmed
        assert_eq!(buf[(2, 2)].symbol(), ".");
        assert_eq!(buf[(2, 2)].fg, Color::Rgb(26, 26, 26));
        // Never seen
        assert_eq!(buf[(18, 2)].symbol(), " ");
    }
}
