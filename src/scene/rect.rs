//! Flat-colored rectangle node.

use crate::core::color::Color;
use crate::core::geometry::{Point, Rect, Size};
use crate::render::Surface;

#[derive(Clone, Copy, Debug)]
pub struct RectNode {
    pub size: Size,
    pub color: Color,
}

impl RectNode {
    #[must_use]
    pub const fn new(size: Size, color: Color) -> Self {
        Self { size, color }
    }

    pub(crate) fn render(&self, target: &mut Surface, at: Point) {
        target.fill_rect(Rect::at(at, self.size), self.color);
    }
}
