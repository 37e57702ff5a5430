use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::components::Vector2;
use crate::constants::{TILE_HEIGHT, TILE_WIDTH};

const CELL_W: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Pacman,
    Ghost,
    Pellet,
    PowerPellet,
    Wall,
}

/// Drawing target for the maze and everything on it, in pixel coordinates.
pub trait Surface {
    fn draw_line(&mut self, from: Vector2, to: Vector2);
    fn draw_point(&mut self, at: Vector2);
    fn draw_glyph(&mut self, at: Vector2, glyph: Glyph);

    fn draw_portal(&mut self, from: Vector2, to: Vector2) {
        self.draw_line(from, to);
    }
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    text: &'static str,
    color: Color,
}

const EMPTY: Cell = Cell {
    text: "  ",
    color: Color::Reset,
};

/// Where the HUD line and the board land inside the terminal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    left: u16,
    top: u16,
}

/// Character-cell surface, one cell per maze tile, redrawn by diffing
/// against the previous frame.
pub struct TerminalSurface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    last: Vec<Cell>,
    last_hud: String,
    // None until the first frame fits, and again after the window shrinks.
    layout: Option<Layout>,
}

impl TerminalSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
            last: vec![EMPTY; width * height],
            last_hud: String::new(),
            layout: None,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Terminal columns and rows taken by the HUD line plus the board.
    pub fn footprint(&self) -> (u16, u16) {
        let cols = u16::try_from(self.width * CELL_W).unwrap_or(u16::MAX);
        let rows = u16::try_from(self.height + 1).unwrap_or(u16::MAX);
        (cols, rows)
    }

    fn layout_for(&self, term: (u16, u16)) -> Option<Layout> {
        let (cols, rows) = self.footprint();
        Some(Layout {
            left: term.0.checked_sub(cols)? / 2,
            top: term.1.checked_sub(rows)? / 2,
        })
    }

    fn tile_of(&self, at: Vector2) -> Option<(usize, usize)> {
        let col = (at.x / TILE_WIDTH as f32).round();
        let row = (at.y / TILE_HEIGHT as f32).round();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    fn put(&mut self, col: usize, row: usize, cell: Cell) {
        self.cells[row * self.width + col] = cell;
    }

    fn put_if_empty(&mut self, col: usize, row: usize, cell: Cell) {
        let idx = row * self.width + col;
        if self.cells[idx] == EMPTY {
            self.cells[idx] = cell;
        }
    }

    pub fn present<W: Write>(&mut self, out: &mut W, hud: &str) -> io::Result<()> {
        let term = terminal::size()?;
        self.present_in(out, hud, term)
    }

    fn present_in<W: Write>(&mut self, out: &mut W, hud: &str, term: (u16, u16)) -> io::Result<()> {
        let Some(layout) = self.layout_for(term) else {
            let (cols, rows) = self.footprint();
            queue!(
                out,
                Clear(ClearType::All),
                MoveTo(0, 0),
                Print(format!(
                    "Resize the terminal to at least {cols}x{rows} (now {}x{}).",
                    term.0, term.1
                ))
            )?;
            self.layout = None;
            return out.flush();
        };

        let full = self.layout != Some(layout);
        if full {
            queue!(out, Clear(ClearType::All))?;
            self.layout = Some(layout);
        }
        if full || hud != self.last_hud {
            queue!(
                out,
                MoveTo(layout.left, layout.top),
                SetForegroundColor(Color::White),
                Print(pad_to(hud, self.width * CELL_W))
            )?;
            self.last_hud = hud.to_owned();
        }

        // Changed cells are written as runs so the cursor only moves at gaps.
        for row in 0..self.height {
            let base = row * self.width;
            let dirty = |col: usize| full || self.cells[base + col] != self.last[base + col];
            let mut col = 0;
            while col < self.width {
                if !dirty(col) {
                    col += 1;
                    continue;
                }
                let x = layout.left + (col * CELL_W) as u16;
                let y = layout.top + 1 + row as u16;
                queue!(out, MoveTo(x, y))?;
                while col < self.width && dirty(col) {
                    let cell = self.cells[base + col];
                    queue!(out, SetForegroundColor(cell.color), Print(pad_to(cell.text, CELL_W)))?;
                    col += 1;
                }
            }
        }
        queue!(out, ResetColor)?;
        self.last.copy_from_slice(&self.cells);
        out.flush()
    }
}

// Pads with spaces up to `width` display columns; longer text is left alone.
fn pad_to(text: &str, width: usize) -> String {
    let shown = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(shown)))
}

impl Surface for TerminalSurface {
    fn draw_line(&mut self, from: Vector2, to: Vector2) {
        let (Some((c0, r0)), Some((c1, r1))) = (self.tile_of(from), self.tile_of(to)) else {
            return;
        };
        let link = Cell {
            text: if r0 == r1 { "──" } else { "│" },
            color: Color::DarkGrey,
        };
        if r0 == r1 {
            for col in c0.min(c1) + 1..c0.max(c1) {
                self.put_if_empty(col, r0, link);
            }
        } else if c0 == c1 {
            for row in r0.min(r1) + 1..r0.max(r1) {
                self.put_if_empty(c0, row, link);
            }
        }
    }

    fn draw_point(&mut self, at: Vector2) {
        if let Some((col, row)) = self.tile_of(at) {
            self.put(
                col,
                row,
                Cell {
                    text: "┼",
                    color: Color::Grey,
                },
            );
        }
    }

    fn draw_glyph(&mut self, at: Vector2, glyph: Glyph) {
        let cell = match glyph {
            Glyph::Pacman => Cell {
                text: "😃",
                color: Color::Yellow,
            },
            Glyph::Ghost => Cell {
                text: "👻",
                color: Color::Red,
            },
            Glyph::Pellet => Cell {
                text: "· ",
                color: Color::White,
            },
            Glyph::PowerPellet => Cell {
                text: "● ",
                color: Color::Magenta,
            },
            Glyph::Wall => Cell {
                text: "██",
                color: Color::Blue,
            },
        };
        if let Some((col, row)) = self.tile_of(at) {
            self.put(col, row, cell);
        }
    }

    // Portals wrap around the board; a straight line would cross the maze.
    fn draw_portal(&mut self, _from: Vector2, _to: Vector2) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_at(surface: &TerminalSurface, col: usize, row: usize) -> &'static str {
        surface.cells[row * surface.width + col].text
    }

    #[test]
    fn test_lines_fill_between_points() {
        let mut surface = TerminalSurface::new(5, 3);
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(4.0 * TILE_WIDTH as f32, 0.0);
        surface.draw_line(a, b);
        surface.draw_point(a);
        surface.draw_point(b);
        assert_eq!(text_at(&surface, 0, 0), "┼");
        assert_eq!(text_at(&surface, 2, 0), "──");
        assert_eq!(text_at(&surface, 4, 0), "┼");
        assert_eq!(text_at(&surface, 2, 1), "  ");
    }

    #[test]
    fn test_glyph_overwrites_and_clear_resets() {
        let mut surface = TerminalSurface::new(3, 3);
        let at = Vector2::new(TILE_WIDTH as f32, TILE_HEIGHT as f32);
        surface.draw_point(at);
        surface.draw_glyph(at, Glyph::Ghost);
        assert_eq!(text_at(&surface, 1, 1), "👻");
        surface.clear();
        assert_eq!(text_at(&surface, 1, 1), "  ");
    }

    #[test]
    fn test_off_board_is_ignored() {
        let mut surface = TerminalSurface::new(2, 2);
        surface.draw_glyph(Vector2::new(-40.0, 0.0), Glyph::Wall);
        surface.draw_glyph(Vector2::new(400.0, 0.0), Glyph::Wall);
        assert!(surface.cells.iter().all(|c| *c == EMPTY));
    }

    #[test]
    fn test_layout_centers_board_below_hud() {
        let surface = TerminalSurface::new(10, 5);
        assert_eq!(surface.footprint(), (20, 6));
        assert_eq!(
            surface.layout_for((40, 16)),
            Some(Layout { left: 10, top: 5 })
        );
        assert_eq!(surface.layout_for((20, 6)), Some(Layout { left: 0, top: 0 }));
        assert_eq!(surface.layout_for((19, 30)), None);
        assert_eq!(surface.layout_for((80, 5)), None);
    }

    #[test]
    fn test_small_terminal_asks_for_resize() {
        let mut surface = TerminalSurface::new(10, 5);
        let mut out = Vec::new();
        surface.present_in(&mut out, "Score: 0", (12, 4)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("at least 20x6 (now 12x4)"));
        assert!(!text.contains("Score"));
    }

    #[test]
    fn test_unchanged_frame_writes_only_changes() {
        let mut surface = TerminalSurface::new(4, 2);
        surface.draw_glyph(Vector2::ZERO, Glyph::Wall);
        let mut first = Vec::new();
        surface.present_in(&mut first, "hud", (8, 3)).unwrap();
        let first = String::from_utf8(first).unwrap();
        assert!(first.contains("hud"));
        assert!(first.contains("██"));

        let mut second = Vec::new();
        surface.present_in(&mut second, "hud", (8, 3)).unwrap();
        let second = String::from_utf8(second).unwrap();
        assert!(!second.contains("hud"));
        assert!(!second.contains("██"));

        surface.draw_glyph(Vector2::new(TILE_WIDTH as f32, 0.0), Glyph::Ghost);
        let mut third = Vec::new();
        surface.present_in(&mut third, "hud", (8, 3)).unwrap();
        let third = String::from_utf8(third).unwrap();
        assert!(third.contains("👻"));
        assert!(!third.contains("██"));

        // A resize repaints everything.
        let mut resized = Vec::new();
        surface.present_in(&mut resized, "hud", (10, 5)).unwrap();
        let resized = String::from_utf8(resized).unwrap();
        assert!(resized.contains("hud"));
        assert!(resized.contains("██"));
    }

    #[test]
    fn test_pad_to_uses_display_width() {
        assert_eq!(pad_to("│", 2), "│ ");
        assert_eq!(pad_to("👻", 2), "👻");
        assert_eq!(pad_to("wide text", 4), "wide text");
    }
}
