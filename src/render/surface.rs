//! Cell surfaces and compositing.
//!
//! A [`Surface`] is a rectangular grid of styled cells. Every app owns one
//! for its contents and the runtime owns one for the shared screen; blitting
//! clips at the target edges so windows may be dragged partially off-screen.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::core::color::Color;
use crate::core::geometry::{Point, Rect, Size};

/// Marker stored in the cell covered by the preceding double-width glyph.
pub const CONTINUATION: char = '\0';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    #[must_use]
    pub const fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Surface {
    /// A surface filled with blank cells of the given background.
    #[must_use]
    pub fn new(size: Size, bg: Color) -> Self {
        let width = size.w.max(0);
        let height = size.h.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::blank(bg); (width * height) as usize],
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn fill(&mut self, bg: Color) {
        self.cells.fill(Cell::blank(bg));
    }

    pub fn fill_rect(&mut self, rect: Rect, bg: Color) {
        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                self.set(x, y, Cell::blank(bg));
            }
        }
    }

    /// Draw one row of text starting at `(x, y)`.
    ///
    /// Walks grapheme clusters and advances by display width; double-width
    /// glyphs occupy their cell plus a continuation cell. A `None` background
    /// keeps whatever background the cell already has.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Option<Color>) {
        let mut cursor = x;
        for grapheme in text.graphemes(true) {
            let width = grapheme.width() as i32;
            if width == 0 {
                continue;
            }
            if cursor >= self.width {
                break;
            }
            let ch = grapheme.chars().next().unwrap_or(' ');
            let cell_bg = match (bg, self.get(cursor, y)) {
                (Some(color), _) => color,
                (None, Some(existing)) => existing.bg,
                (None, None) => Color::BLACK,
            };
            self.set(cursor, y, Cell { ch, fg, bg: cell_bg });
            if width > 1 {
                let cont_bg = match (bg, self.get(cursor + 1, y)) {
                    (Some(color), _) => color,
                    (None, Some(existing)) => existing.bg,
                    (None, None) => Color::BLACK,
                };
                self.set(
                    cursor + 1,
                    y,
                    Cell {
                        ch: CONTINUATION,
                        fg,
                        bg: cont_bg,
                    },
                );
            }
            cursor += width;
        }
    }

    /// Copy `src` onto this surface with its top-left corner at `at`,
    /// clipping at the edges.
    pub fn blit(&mut self, src: &Surface, at: Point) {
        for sy in 0..src.height {
            let ty = at.y + sy;
            if ty < 0 || ty >= self.height {
                continue;
            }
            for sx in 0..src.width {
                let tx = at.x + sx;
                if tx < 0 || tx >= self.width {
                    continue;
                }
                let cell = src.cells[(sy * src.width + sx) as usize];
                self.cells[(ty * self.width + tx) as usize] = cell;
            }
        }
    }

    /// Rows as plain text (continuation cells skipped), for tests and the
    /// headless display.
    #[must_use]
    pub fn rows_text(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let mut row = String::new();
                for x in 0..self.width {
                    let cell = &self.cells[(y * self.width + x) as usize];
                    if cell.ch != CONTINUATION {
                        row.push(cell.ch);
                    }
                }
                row.trim_end().to_string()
            })
            .collect()
    }

    /// Raw cell row, used by displays when repainting.
    #[must_use]
    pub fn row(&self, y: i32) -> &[Cell] {
        let start = (y * self.width) as usize;
        &self.cells[start..start + self.width as usize]
    }
}
