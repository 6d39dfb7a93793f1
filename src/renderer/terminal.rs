//! Terminal renderer - rasterizes the logical screen onto character cells
//!
//! Primitives are drawn into a cell buffer; `present` writes the whole
//! buffer with crossterm commands and flushes.

use std::io::{BufWriter, Stdout, Write, stdout};

use crossterm::{QueueableCommand, cursor, style, terminal};
use glam::Vec2;

use super::{Color, Renderer, TextAnchor};
use crate::Rect;
use crate::platform::PlatformError;

const FILL: char = '█';
/// Used when a circle is smaller than a cell
const DOT: char = '•';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Color::rgb(255, 255, 255),
};

pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Logical screen size being mapped onto the grid
    screen: Vec2,
    cols: u16,
    rows: u16,
    background: Color,
    cells: Vec<Cell>,
    /// Re-query the terminal size every frame
    follow_terminal_size: bool,
}

impl TerminalRenderer<BufWriter<Stdout>> {
    /// Renderer on stdout that tracks the terminal's size
    pub fn stdout(screen: Vec2) -> Result<Self, PlatformError> {
        let (cols, rows) = terminal::size()?;
        let mut renderer = Self::new(BufWriter::new(stdout()), screen, cols, rows);
        renderer.follow_terminal_size = true;
        Ok(renderer)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, screen: Vec2, cols: u16, rows: u16) -> Self {
        Self {
            out,
            screen,
            cols,
            rows,
            background: Color::rgb(0, 0, 0),
            cells: vec![BLANK; usize::from(cols) * usize::from(rows)],
            follow_terminal_size: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Characters of one grid row (for inspection)
    pub fn row_text(&self, row: u16) -> String {
        let start = usize::from(row) * usize::from(self.cols);
        self.cells[start..start + usize::from(self.cols)]
            .iter()
            .map(|cell| cell.glyph)
            .collect()
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; usize::from(cols) * usize::from(rows)];
    }

    /// Cells per logical pixel on each axis
    fn cell_scale(&self) -> Vec2 {
        Vec2::new(
            f32::from(self.cols) / self.screen.x,
            f32::from(self.rows) / self.screen.y,
        )
    }

    fn put(&mut self, col: i32, row: i32, glyph: char, color: Color) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        let index = row as usize * usize::from(self.cols) + col as usize;
        self.cells[index] = Cell { glyph, color };
    }

    fn put_str(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, glyph) in text.chars().enumerate() {
            self.put(col + i as i32, row, glyph, color);
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, color: Color) {
        if self.follow_terminal_size {
            if let Ok((cols, rows)) = terminal::size() {
                if (cols, rows) != (self.cols, self.rows) {
                    self.resize(cols, rows);
                }
            }
        }
        self.background = color;
        self.cells.fill(BLANK);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let scale = self.cell_scale();
        let c = center * scale;
        let r = Vec2::splat(radius) * scale;
        if !c.is_finite() {
            return;
        }

        let mut filled = false;
        if r.x > 0.0 && r.y > 0.0 {
            let (min, max) = ((c - r).floor(), (c + r).ceil());
            for row in min.y as i32..max.y as i32 {
                for col in min.x as i32..max.x as i32 {
                    let cell_center = Vec2::new(col as f32 + 0.5, row as f32 + 0.5);
                    let d = (cell_center - c) / r;
                    if d.length_squared() <= 1.0 {
                        self.put(col, row, FILL, color);
                        filled = true;
                    }
                }
            }
        }
        if !filled {
            self.put(c.x.floor() as i32, c.y.floor() as i32, DOT, color);
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let scale = self.cell_scale();
        let min = (rect.min * scale).floor();
        let max = (rect.max() * scale).ceil() - Vec2::ONE;
        let (c0, r0, c1, r1) = (min.x as i32, min.y as i32, max.x as i32, max.y as i32);
        if c1 <= c0 || r1 <= r0 {
            return;
        }

        for col in c0 + 1..c1 {
            self.put(col, r0, '─', color);
            self.put(col, r1, '─', color);
        }
        for row in r0 + 1..r1 {
            self.put(c0, row, '│', color);
            self.put(c1, row, '│', color);
        }
        self.put(c0, r0, '┌', color);
        self.put(c1, r0, '┐', color);
        self.put(c0, r1, '└', color);
        self.put(c1, r1, '┘', color);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, color: Color) {
        let cell = (pos * self.cell_scale()).floor();
        let width = text.chars().count() as i32;
        let col = match anchor {
            TextAnchor::TopLeft => cell.x as i32,
            TextAnchor::Center => cell.x as i32 - width / 2,
        };
        self.put_str(col, cell.y as i32, text, color);
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        let bg = self.background;
        self.out.queue(style::SetBackgroundColor(style::Color::Rgb {
            r: bg.r,
            g: bg.g,
            b: bg.b,
        }))?;

        let cols = usize::from(self.cols);
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = usize::from(row) * cols;
            let line = &self.cells[start..start + cols];

            // One color change per run of same-colored cells
            let mut run = String::new();
            let mut run_color = line.first().map(|cell| cell.color);
            for cell in line {
                if Some(cell.color) != run_color {
                    if let Some(color) = run_color {
                        write_run(&mut self.out, &run, color)?;
                    }
                    run.clear();
                    run_color = Some(cell.color);
                }
                run.push(cell.glyph);
            }
            if let Some(color) = run_color {
                write_run(&mut self.out, &run, color)?;
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

fn write_run<W: Write>(out: &mut W, text: &str, color: Color) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }))?;
    out.queue(style::Print(text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        // 10 logical pixels per cell on both axes
        TerminalRenderer::new(Vec::new(), Vec2::new(800.0, 600.0), 80, 60)
    }

    #[test]
    fn test_circle_fills_cells() {
        let mut r = renderer();
        r.clear(Color::rgb(0, 0, 0));
        r.draw_circle(Vec2::new(400.0, 300.0), 20.0, Color::rgb(255, 0, 0));
        assert_eq!(r.row_text(30).chars().filter(|&c| c == FILL).count(), 4);
        assert!(r.row_text(25).trim().is_empty());
    }

    #[test]
    fn test_tiny_circle_is_a_dot() {
        let mut r = renderer();
        r.clear(Color::rgb(0, 0, 0));
        r.draw_circle(Vec2::new(402.0, 302.0), 1.0, Color::rgb(255, 255, 255));
        assert_eq!(r.row_text(30).trim(), DOT.to_string());
    }

    #[test]
    fn test_offscreen_drawing_is_clipped() {
        let mut r = renderer();
        r.clear(Color::rgb(0, 0, 0));
        r.draw_circle(Vec2::new(-5000.0, 300.0), 50.0, Color::rgb(255, 0, 0));
        r.draw_text(
            "far away",
            Vec2::new(9000.0, 9000.0),
            TextAnchor::TopLeft,
            Color::rgb(1, 1, 1),
        );
        assert!((0..60).all(|row| r.row_text(row).trim().is_empty()));
    }

    #[test]
    fn test_rect_and_centered_text() {
        let mut r = renderer();
        r.clear(Color::rgb(0, 0, 0));
        r.draw_rect(Rect::new(200.0, 250.0, 400.0, 60.0), Color::rgb(255, 255, 255));
        r.draw_text(
            "ABCD",
            Vec2::new(400.0, 280.0),
            TextAnchor::Center,
            Color::rgb(255, 255, 255),
        );

        let top = r.row_text(25);
        assert_eq!(top.chars().position(|c| c == '┌'), Some(20));
        assert_eq!(top.chars().position(|c| c == '┐'), Some(59));
        assert!(r.row_text(28).contains("ABCD"));
        assert!(r.row_text(30).contains('┘'));
    }

    #[test]
    fn test_present_writes_frame() {
        let mut r = renderer();
        r.clear(Color::rgb(0, 0, 0));
        r.draw_text(
            "Score: 300",
            Vec2::new(10.0, 10.0),
            TextAnchor::TopLeft,
            Color::rgb(255, 255, 255),
        );
        r.present().unwrap();
        let written = String::from_utf8_lossy(r.writer());
        assert!(written.contains("Score: 300"));
    }
}
