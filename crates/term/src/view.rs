//! GameView: maps a session into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Grid, StateSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Screen, Unit, PASSWORD_LEN};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the view needs from a session, borrowed for one frame.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub screen: Screen,
    pub state: &'a StateSnapshot,
    pub stage: u32,
    pub is_custom: bool,
    pub password: &'a str,
    pub input: &'a str,
}

const BOARD_BG: Rgb = Rgb::new(25, 25, 35);
const PANEL_WIDTH: u16 = 16;
const PANEL_HEIGHT: u16 = 7;
const OVERLAY_HEIGHT: u16 = 3;

/// A lightweight terminal renderer for the puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render one frame into an existing framebuffer, resizing it to the
    /// viewport first.
    pub fn render_into(&self, view: &SessionView<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        match view.screen {
            Screen::Title => self.draw_title(fb, viewport),
            Screen::UsePassword => self.draw_menu(
                fb,
                viewport,
                "MORDICUS",
                &["1  ENTER PASSWORD", "2  NEW GAME"],
            ),
            Screen::InputPassword => {
                let entry = password_entry(view.input);
                self.draw_menu(
                    fb,
                    viewport,
                    "PASSWORD",
                    &[entry.as_str(), "", "ENTER to play", "ESC for stage 1"],
                );
            }
            Screen::End => {
                let score = format!("FINAL SCORE {}", view.state.score);
                self.draw_menu(fb, viewport, "THE END", &[score.as_str()]);
            }
            Screen::Level | Screen::Retry | Screen::Complete | Screen::GameOver => {
                self.draw_level(fb, view, viewport)
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, view: &SessionView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(view, viewport, &mut fb);
        fb
    }

    fn draw_title(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        self.draw_menu(
            fb,
            viewport,
            "MORDICUS",
            &[
                "push, collect, survive",
                "",
                "@ you   o coin   b banana",
                "R B gorillas   S satiated",
                "g push block   # wall",
                "^ > v < arrows",
                "",
                "SPACE to start   Q to quit",
            ],
        );
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport, title: &str, lines: &[&str]) {
        let heading = CellStyle::text(Rgb::new(255, 210, 80)).bold();
        let body = CellStyle::default();

        let total = lines.len() as u16 + 2;
        let mut y = viewport.height.saturating_sub(total) / 2;
        fb.put_centered(0, y, viewport.width, title, heading);
        y = y.saturating_add(2);
        for line in lines {
            fb.put_centered(0, y, viewport.width, line, body);
            y = y.saturating_add(1);
        }
    }

    fn draw_level(&self, fb: &mut FrameBuffer, view: &SessionView<'_>, viewport: Viewport) {
        let grid = &view.state.grid;
        let frame_w = clamp_u16(grid.width())
            .saturating_mul(self.cell_w)
            .saturating_add(2);
        let frame_h = clamp_u16(grid.height()).saturating_add(2);
        let content_h = frame_h.max(PANEL_HEIGHT);

        let total_w = frame_w.saturating_add(2 + PANEL_WIDTH);
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport
            .height
            .saturating_sub(content_h.saturating_add(OVERLAY_HEIGHT))
            / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);
        self.draw_grid(fb, grid, start_x.saturating_add(1), start_y.saturating_add(1));
        self.draw_side_panel(fb, view, start_x.saturating_add(frame_w).saturating_add(2), start_y);

        let overlay: &[&str] = match view.screen {
            Screen::Retry => &["CAUGHT!", "SPACE to retry"],
            Screen::Complete => &["STAGE CLEAR", "1 replay  2 next"],
            Screen::GameOver => &["GAME OVER", "SPACE for title"],
            _ => &[],
        };
        let style = CellStyle::text(Rgb::new(255, 255, 255)).bold();
        let overlay_y = start_y.saturating_add(content_h).saturating_add(1);
        for (i, line) in overlay.iter().enumerate() {
            fb.put_centered(0, overlay_y.saturating_add(i as u16), viewport.width, line, style);
        }
    }

    /// Cells past the framebuffer edge are skipped.
    fn draw_grid(&self, fb: &mut FrameBuffer, grid: &Grid, x0: u16, y0: u16) {
        for (row, units) in grid.rows().enumerate() {
            let y = y0.saturating_add(clamp_u16(row));
            if y >= fb.height() {
                break;
            }
            for (col, &unit) in units.iter().enumerate() {
                let x = x0.saturating_add(clamp_u16(col).saturating_mul(self.cell_w));
                if x >= fb.width() {
                    break;
                }
                let (text, style) = unit_cell(unit);
                for (dx, ch) in text.chars().cycle().take(self.cell_w as usize).enumerate() {
                    fb.put_char(x.saturating_add(dx as u16), y, ch, style);
                }
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::text(Rgb::new(200, 200, 200));

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x.saturating_add(dx), y, '─', style);
            fb.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y.saturating_add(dy), '│', style);
            fb.put_char(right, y.saturating_add(dy), '│', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, view: &SessionView<'_>, x: u16, y: u16) {
        let label = CellStyle::default().bold();
        let value = CellStyle::text(Rgb::new(200, 200, 200));
        let state = view.state;

        let stage = if view.is_custom {
            format!("C{}", view.stage)
        } else {
            view.stage.to_string()
        };
        let rows: [(&str, String); 5] = [
            ("STAGE", stage),
            ("LIVES", state.lives.to_string()),
            ("SCORE", state.score.to_string()),
            ("BONUS", state.bonus.to_string()),
            ("PASSWORD", view.password.to_string()),
        ];

        for (i, (name, text)) in rows.iter().enumerate() {
            let cy = y.saturating_add(i as u16);
            fb.put_str(x, cy, name, label);
            fb.put_str(x.saturating_add(9), cy, text, value);
        }
        fb.put_str(x, y.saturating_add(PANEL_HEIGHT - 1), "ESC give up", value.dim());
    }
}

/// Text and style of one board cell, repeated to fill the cell width.
fn unit_cell(unit: Unit) -> (&'static str, CellStyle) {
    let on_board = |fg: Rgb| CellStyle::text(fg).on(BOARD_BG);
    match unit {
        Unit::Empty => ("· ", on_board(Rgb::new(80, 80, 95)).dim()),
        Unit::Player => ("@ ", on_board(Rgb::new(255, 230, 120)).bold()),
        Unit::Coin => ("o ", on_board(Rgb::new(250, 200, 40))),
        Unit::Banana => ("b ", on_board(Rgb::new(240, 230, 90))),
        Unit::RedGorilla => ("R ", on_board(Rgb::new(230, 70, 70)).bold()),
        Unit::BlueGorilla => ("B ", on_board(Rgb::new(90, 140, 240)).bold()),
        Unit::SatiatedBlueGorilla => ("S ", on_board(Rgb::new(90, 140, 240)).dim()),
        Unit::GreenBlock => ("▓", on_board(Rgb::new(90, 200, 110))),
        Unit::RedBlock => ("█", on_board(Rgb::new(200, 60, 60))),
        Unit::ArrowUp | Unit::ArrowRight | Unit::ArrowDown | Unit::ArrowLeft => {
            let text = match unit {
                Unit::ArrowUp => "^ ",
                Unit::ArrowRight => "> ",
                Unit::ArrowDown => "v ",
                _ => "< ",
            };
            (text, on_board(Rgb::new(120, 220, 220)).bold())
        }
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Typed password padded with underscores.
fn password_entry(input: &str) -> String {
    let typed = input.chars().count();
    let mut entry = input.to_string();
    entry.extend(std::iter::repeat('_').take(PASSWORD_LEN.saturating_sub(typed)));
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str) -> StateSnapshot {
        StateSnapshot::new(Grid::parse(text).unwrap(), 4, 120, 995)
    }

    fn view<'a>(screen: Screen, state: &'a StateSnapshot, input: &'a str) -> SessionView<'a> {
        SessionView {
            screen,
            state,
            stage: 3,
            is_custom: false,
            password: "915729",
            input,
        }
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn level_draws_board_two_columns_per_cell() {
        let state = snapshot("# @ o\n. b R");
        let fb = GameView::default().render(&view(Screen::Level, &state, ""), Viewport::new(40, 20));
        let text = screen_text(&fb);

        assert!(text.contains("│██@ o │"), "{text}");
        assert!(text.contains("│· b R │"), "{text}");
    }

    #[test]
    fn level_side_panel_shows_counters() {
        let state = snapshot("@ o");
        let fb = GameView::default().render(&view(Screen::Level, &state, ""), Viewport::new(40, 20));
        let text = screen_text(&fb);

        for needle in ["STAGE", "LIVES", "SCORE", "BONUS", "PASSWORD", "915729", "995", "120"] {
            assert!(text.contains(needle), "missing {needle} in\n{text}");
        }
    }

    #[test]
    fn overlays_follow_screen() {
        let state = snapshot("@ o");
        let gv = GameView::default();
        let vp = Viewport::new(50, 20);

        assert!(screen_text(&gv.render(&view(Screen::Retry, &state, ""), vp)).contains("CAUGHT!"));
        assert!(screen_text(&gv.render(&view(Screen::Complete, &state, ""), vp)).contains("STAGE CLEAR"));
        assert!(screen_text(&gv.render(&view(Screen::GameOver, &state, ""), vp)).contains("GAME OVER"));
        assert!(!screen_text(&gv.render(&view(Screen::Level, &state, ""), vp)).contains("CAUGHT!"));
    }

    #[test]
    fn password_screen_pads_input() {
        let state = snapshot("@");
        let fb = GameView::default().render(&view(Screen::InputPassword, &state, "12"), Viewport::new(40, 12));
        assert!(screen_text(&fb).contains("12____"));
        assert_eq!(password_entry("123456"), "123456");
    }

    #[test]
    fn very_wide_grid_is_clipped() {
        let state = StateSnapshot::new(Grid::filled(40_000, 2, Unit::Coin), 5, 0, 0);
        let fb = GameView::default().render(&view(Screen::Retry, &state, ""), Viewport::new(40, 20));
        assert_eq!(fb.width(), 40);
        assert!(screen_text(&fb).contains("│o o o"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let state = snapshot("@ o b\n. . .\nR B S");
        let gv = GameView::default();
        for screen in [Screen::Title, Screen::Level, Screen::End, Screen::Complete] {
            let fb = gv.render(&view(screen, &state, ""), Viewport::new(3, 2));
            assert_eq!(fb.width(), 3);
        }
    }
}
