//! Surface-backed text node with change-keyed redraw caching.

use unicode_width::UnicodeWidthStr;

use crate::core::color::Color;
use crate::core::geometry::{Point, Size};
use crate::render::Surface;

/// One row of text on an owned backing surface.
///
/// The backing surface is repainted only when the text differs from the last
/// rendered string; rendering the same content every frame is a blit.
#[derive(Clone, Debug)]
pub struct TextNode {
    size: Size,
    text: String,
    fg: Color,
    bg: Color,
    center: bool,
    canvas: Surface,
    rendered: Option<String>,
    rebuilds: usize,
}

impl TextNode {
    #[must_use]
    pub fn new(size: Size, text: impl Into<String>) -> Self {
        let bg = Color::BLACK;
        Self {
            size,
            text: text.into(),
            fg: Color::WHITE,
            bg,
            center: false,
            canvas: Surface::new(size, bg),
            rendered: None,
            rebuilds: 0,
        }
    }

    #[must_use]
    pub fn colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self.canvas = Surface::new(self.size, bg);
        self.rendered = None;
        self
    }

    /// Center the text within the node bounds instead of top-left alignment.
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.center = true;
        self.rendered = None;
        self
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// How many times the backing surface has been repainted.
    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    fn ensure_rendered(&mut self) {
        if self.rendered.as_deref() == Some(self.text.as_str()) {
            return;
        }
        self.canvas.fill(self.bg);
        let (x, y) = if self.center {
            let text_width = self.text.width() as i32;
            (
                ((self.size.w - text_width) / 2).max(0),
                (self.size.h / 2).max(0),
            )
        } else {
            (0, 0)
        };
        self.canvas.draw_text(x, y, &self.text, self.fg, Some(self.bg));
        self.rendered = Some(self.text.clone());
        self.rebuilds += 1;
    }

    pub(crate) fn render(&mut self, target: &mut Surface, at: Point) {
        self.ensure_rendered();
        target.blit(&self.canvas, at);
    }
}
