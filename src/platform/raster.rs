//! Braille rasterizer for draw commands
//!
//! Each terminal cell is a 2x4 braille dot block, so a `cols` x `rows` area
//! gives `2*cols` x `4*rows` addressable dots. The world is scaled to fill the
//! area; text is placed on the cell grid and replaces any dots in its cells,
//! taking their color as its background so labels read over filled shapes.

use glam::Vec2;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::renderer::{Align, DrawCmd, colors};
use crate::settings::ColorMode;

const BRAILLE_BASE: u32 = 0x2800;

/// RGB values of the 16-color palette
const PALETTE: [(u8, u8, u8); colors::PALETTE_SIZE] = [
    (0x00, 0x00, 0x00),
    (0x2b, 0x33, 0x5f),
    (0x7e, 0x20, 0x72),
    (0x19, 0x95, 0x9c),
    (0x8b, 0x48, 0x52),
    (0x39, 0x5c, 0x98),
    (0xa9, 0xc1, 0xff),
    (0xee, 0xee, 0xee),
    (0xd4, 0x18, 0x6c),
    (0xd3, 0x84, 0x41),
    (0xe9, 0xc3, 0x5b),
    (0x70, 0xc6, 0xa9),
    (0x76, 0x96, 0xde),
    (0xa3, 0xa3, 0xa3),
    (0xff, 0x97, 0x98),
    (0xed, 0xc7, 0xb0),
];

/// Closest ANSI color per palette entry
const ANSI: [Color; colors::PALETTE_SIZE] = [
    Color::Black,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
    Color::Blue,
    Color::LightBlue,
    Color::White,
    Color::LightRed,
    Color::Yellow,
    Color::LightYellow,
    Color::LightGreen,
    Color::LightBlue,
    Color::Gray,
    Color::LightMagenta,
    Color::LightRed,
];

/// Terminal color for a palette index (out-of-range indices wrap)
pub fn palette(index: u8, mode: ColorMode) -> Color {
    let i = usize::from(index) % colors::PALETTE_SIZE;
    match mode {
        ColorMode::Rgb => {
            let (r, g, b) = PALETTE[i];
            Color::Rgb(r, g, b)
        }
        ColorMode::Ansi => ANSI[i],
    }
}

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

/// Bresenham line between two dots, endpoints included
fn line_dots(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut dots = Vec::new();
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut cx, mut cy) = (x0, y0);
    loop {
        dots.push((cx, cy));
        if cx == x1 && cy == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cx += sx;
        }
        if e2 <= dx {
            err += dx;
            cy += sy;
        }
    }
    dots
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Dots { bits: u8, color: u8 },
    Glyph { ch: char, color: u8, bg: Option<u8> },
}

/// Character grid being drawn into
#[derive(Debug, Clone)]
pub struct BrailleGrid {
    cols: usize,
    rows: usize,
    /// World units to dots
    scale: Vec2,
    cells: Vec<Cell>,
}

impl BrailleGrid {
    pub fn new(cols: u16, rows: u16, world: Vec2) -> Self {
        let (cols, rows) = (usize::from(cols), usize::from(rows));
        let scale = Vec2::new(
            (cols * 2) as f32 / world.x.max(1.0),
            (rows * 4) as f32 / world.y.max(1.0),
        );
        Self {
            cols,
            rows,
            scale,
            cells: vec![Cell::Empty; cols * rows],
        }
    }

    fn to_dot(&self, p: Vec2) -> (i32, i32) {
        let d = p * self.scale;
        (d.x.floor() as i32, d.y.floor() as i32)
    }

    fn to_cell(&self, p: Vec2) -> (i32, i32) {
        let d = p * self.scale;
        ((d.x / 2.0).floor() as i32, (d.y / 4.0).floor() as i32)
    }

    fn set_dot(&mut self, bx: i32, by: i32, color: u8) {
        if bx < 0 || by < 0 {
            return;
        }
        let (bx, by) = (bx as usize, by as usize);
        let (cx, cy) = (bx / 2, by / 4);
        if cx >= self.cols || cy >= self.rows {
            return;
        }
        let bit = braille_bit(bx % 2, by % 4);
        let cell = &mut self.cells[cy * self.cols + cx];
        *cell = match *cell {
            Cell::Empty => Cell::Dots { bits: bit, color },
            // The latest color wins for the whole cell
            Cell::Dots { bits, .. } => Cell::Dots {
                bits: bits | bit,
                color,
            },
            glyph @ Cell::Glyph { .. } => glyph,
        };
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: u8) {
        let (x0, y0) = self.to_dot(from);
        let (x1, y1) = self.to_dot(to);
        for (x, y) in line_dots(x0, y0, x1, y1) {
            self.set_dot(x, y, color);
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: u8) {
        let extent = radius * self.scale.max_element();
        let steps = ((extent * std::f32::consts::TAU).ceil() as usize).max(8);
        for i in 0..steps {
            let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
            let (x, y) = self.to_dot(center + Vec2::from_angle(angle) * radius);
            self.set_dot(x, y, color);
        }
    }

    fn filled_circle(&mut self, center: Vec2, radius: f32, color: u8) {
        let (x0, y0) = self.to_dot(center - Vec2::splat(radius));
        let (x1, y1) = self.to_dot(center + Vec2::splat(radius));
        let r_sq = radius * radius;
        for by in y0..=y1 {
            for bx in x0..=x1 {
                let dot_center = (Vec2::new(bx as f32, by as f32) + 0.5) / self.scale;
                if dot_center.distance_squared(center) <= r_sq {
                    self.set_dot(bx, by, color);
                }
            }
        }
        // Anything smaller than a dot still shows up
        let (cx, cy) = self.to_dot(center);
        self.set_dot(cx, cy, color);
    }

    fn text(&mut self, pos: Vec2, text: &str, color: u8, align: Align) {
        let (cx, cy) = self.to_cell(pos);
        if cy < 0 || cy as usize >= self.rows {
            return;
        }
        let len = text.chars().count() as i32;
        let start = match align {
            Align::Left => cx,
            Align::Center => cx - len / 2,
            Align::Right => cx - len,
        };
        let row = cy as usize * self.cols;
        for (i, ch) in text.chars().enumerate() {
            let x = start + i as i32;
            if x < 0 || x as usize >= self.cols {
                continue;
            }
            let cell = &mut self.cells[row + x as usize];
            let bg = match *cell {
                Cell::Dots { color, .. } => Some(color),
                Cell::Glyph { bg, .. } => bg,
                Cell::Empty => None,
            };
            *cell = if ch == ' ' {
                Cell::Empty
            } else {
                Cell::Glyph { ch, color, bg }
            };
        }
    }

    pub fn draw(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => self.circle(*center, *radius, *color),
            DrawCmd::FilledCircle {
                center,
                radius,
                color,
            } => self.filled_circle(*center, *radius, *color),
            DrawCmd::Line { from, to, color } => self.line(*from, *to, *color),
            DrawCmd::Text {
                pos,
                text,
                color,
                align,
            } => self.text(*pos, text, *color, *align),
        }
    }

    /// Character shown in a cell
    pub fn char_at(&self, col: usize, row: usize) -> char {
        match self.cells.get(row * self.cols + col) {
            Some(Cell::Dots { bits, .. }) => {
                char::from_u32(BRAILLE_BASE + u32::from(*bits)).unwrap_or(' ')
            }
            Some(Cell::Glyph { ch, .. }) => *ch,
            Some(Cell::Empty) | None => ' ',
        }
    }

    /// Foreground and background palette indices of a cell
    fn colors_at(&self, col: usize, row: usize) -> (u8, u8) {
        match self.cells.get(row * self.cols + col) {
            Some(Cell::Dots { color, .. }) => (*color, colors::BACKGROUND),
            Some(Cell::Glyph { color, bg, .. }) => (*color, bg.unwrap_or(colors::BACKGROUND)),
            Some(Cell::Empty) | None => (colors::BACKGROUND, colors::BACKGROUND),
        }
    }

    /// Convert to styled lines, one per row
    pub fn into_lines(self, mode: ColorMode) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..self.cols)
                    .map(|col| {
                        let (fg, bg) = self.colors_at(col, row);
                        let style = Style::default()
                            .fg(palette(fg, mode))
                            .bg(palette(bg, mode));
                        Span::styled(String::from(self.char_at(col, row)), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Rasterize a whole frame into a `cols` x `rows` character grid
pub fn rasterize(cmds: &[DrawCmd], world: Vec2, cols: u16, rows: u16) -> BrailleGrid {
    let mut grid = BrailleGrid::new(cols, rows, world);
    for cmd in cmds {
        grid.draw(cmd);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(320.0, 240.0);

    fn is_braille(ch: char) -> bool {
        (BRAILLE_BASE..BRAILLE_BASE + 0x100).contains(&(ch as u32))
    }

    #[test]
    fn test_line_dots_endpoints() {
        let dots = line_dots(0, 0, 5, 2);
        assert_eq!(dots.first(), Some(&(0, 0)));
        assert_eq!(dots.last(), Some(&(5, 2)));
        assert_eq!(dots.len(), 6);
    }

    #[test]
    fn test_single_dot_bits() {
        // 160x60 cells gives 320x240 dots: one dot per world unit
        let mut grid = BrailleGrid::new(160, 60, WORLD);
        grid.set_dot(3, 7, 5);
        assert_eq!(grid.char_at(1, 1), char::from_u32(BRAILLE_BASE + 0x80).unwrap());
        grid.set_dot(2, 4, 5);
        assert_eq!(grid.char_at(1, 1), char::from_u32(BRAILLE_BASE + 0x81).unwrap());
    }

    #[test]
    fn test_out_of_bounds_dots_ignored() {
        let mut grid = BrailleGrid::new(10, 10, WORLD);
        grid.set_dot(-1, 0, 5);
        grid.set_dot(0, 1000, 5);
        assert!((0..10).all(|r| (0..10).all(|c| grid.char_at(c, r) == ' ')));
    }

    #[test]
    fn test_text_alignment_and_priority() {
        let mut grid = BrailleGrid::new(160, 60, WORLD);
        grid.draw(&DrawCmd::FilledCircle {
            center: Vec2::new(160.0, 120.0),
            radius: 6.0,
            color: 8,
        });
        grid.draw(&DrawCmd::Text {
            pos: Vec2::new(160.0, 120.0),
            text: "B".to_string(),
            color: 7,
            align: Align::Center,
        });
        assert_eq!(grid.char_at(80, 30), 'B');
        assert!(is_braille(grid.char_at(79, 30)));
        // Dark label sits on the disc's color
        grid.draw(&DrawCmd::Text {
            pos: Vec2::new(160.0, 120.0),
            text: "L".to_string(),
            color: 0,
            align: Align::Center,
        });
        assert_eq!(grid.colors_at(80, 30), (0, 8));

        grid.draw(&DrawCmd::Text {
            pos: Vec2::new(316.0, 2.0),
            text: "Score: 5".to_string(),
            color: 11,
            align: Align::Right,
        });
        let row: String = (150..158).map(|c| grid.char_at(c, 0)).collect();
        assert_eq!(row, "Score: 5");
        assert_eq!(grid.colors_at(150, 0), (11, colors::BACKGROUND));
    }

    #[test]
    fn test_rasterize_scene_fills_rows() {
        let cmds = vec![
            DrawCmd::Circle {
                center: Vec2::new(50.0, 50.0),
                radius: 8.0,
                color: 5,
            },
            DrawCmd::Line {
                from: Vec2::new(0.0, 0.0),
                to: Vec2::new(319.0, 239.0),
                color: 7,
            },
        ];
        let grid = rasterize(&cmds, WORLD, 80, 24);
        let lines = grid.into_lines(ColorMode::Rgb);
        assert_eq!(lines.len(), 24);
        assert!(lines.iter().all(|l| l.spans.len() == 80));
    }

    #[test]
    fn test_palette_modes() {
        assert_eq!(palette(7, ColorMode::Rgb), Color::Rgb(0xee, 0xee, 0xee));
        assert_eq!(palette(0, ColorMode::Ansi), Color::Black);
        assert_eq!(palette(16, ColorMode::Rgb), palette(0, ColorMode::Rgb));
    }
}
