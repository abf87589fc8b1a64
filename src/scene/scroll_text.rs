//! Scrollable multi-line text node.
//!
//! Content layout and scrolling are decoupled: the off-screen composite of
//! all lines is rebuilt only when the text changes, while scroll ticks just
//! re-blit a shifted window of it.

use crate::core::color::Color;
use crate::core::geometry::{Point, Size};
use crate::core::input::InputSnapshot;
use crate::render::Surface;

#[derive(Clone, Debug)]
pub struct ScrollTextNode {
    size: Size,
    text: String,
    fg: Color,
    bg: Color,
    line_height: i32,
    speed: i32,
    scroll: i32,
    line_count: i32,
    composite: Surface,
    view: Surface,
    rendered_text: Option<String>,
    rendered_scroll: Option<i32>,
    rebuilds: usize,
}

impl ScrollTextNode {
    #[must_use]
    pub fn new(size: Size, text: impl Into<String>) -> Self {
        let bg = Color::BLACK;
        Self {
            size,
            text: text.into(),
            fg: Color::WHITE,
            bg,
            line_height: 1,
            speed: 1,
            scroll: 0,
            line_count: 0,
            composite: Surface::new(Size::new(size.w, 0), bg),
            view: Surface::new(size, bg),
            rendered_text: None,
            rendered_scroll: None,
            rebuilds: 0,
        }
    }

    #[must_use]
    pub fn colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self.view = Surface::new(self.size, bg);
        self.rendered_text = None;
        self
    }

    #[must_use]
    pub fn line_height(mut self, line_height: i32) -> Self {
        self.line_height = line_height.max(1);
        self.rendered_text = None;
        self
    }

    #[must_use]
    pub fn speed(mut self, speed: i32) -> Self {
        self.speed = speed.max(1);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn scroll_offset(&self) -> i32 {
        self.scroll
    }

    /// Apply a wheel delta directly (what `update` does for live input).
    pub fn scroll_by(&mut self, wheel_delta: i32) {
        self.scroll -= wheel_delta * self.speed * self.line_height;
        self.clamp_scroll();
    }

    /// How many times the line composite has been rebuilt.
    #[must_use]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    fn clamp_scroll(&mut self) {
        let max = (self.line_height * self.line_count - self.size.h).max(0);
        self.scroll = self.scroll.clamp(0, max);
    }

    pub(crate) fn update(&mut self, input: &InputSnapshot) {
        if input.scroll != 0 {
            self.scroll_by(input.scroll);
        }
    }

    pub(crate) fn render(&mut self, target: &mut Surface, at: Point) {
        let text_changed = self.rendered_text.as_deref() != Some(self.text.as_str());
        if text_changed {
            let lines: Vec<&str> = self.text.split('\n').collect();
            self.line_count = lines.len() as i32;
            self.composite = Surface::new(
                Size::new(self.size.w, self.line_height * self.line_count),
                self.bg,
            );
            for (i, line) in lines.iter().enumerate() {
                self.composite
                    .draw_text(0, i as i32 * self.line_height, line, self.fg, Some(self.bg));
            }
            self.rebuilds += 1;
            self.clamp_scroll();
        }

        if text_changed || self.rendered_scroll != Some(self.scroll) {
            self.view.fill(self.bg);
            self.view.blit(&self.composite, Point::new(0, -self.scroll));
            self.rendered_text = Some(self.text.clone());
            self.rendered_scroll = Some(self.scroll);
        }

        target.blit(&self.view, at);
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollTextNode;
    use crate::core::color::Color;
    use crate::core::geometry::{Point, Size};
    use crate::render::Surface;

    fn numbered(count: usize) -> String {
        (0..count)
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn scroll_is_clamped_to_content_range() {
        let mut target = Surface::new(Size::new(4, 3), Color::BLACK);
        let mut node = ScrollTextNode::new(Size::new(4, 3), numbered(10));
        node.render(&mut target, Point::new(0, 0));

        node.scroll_by(5);
        assert_eq!(node.scroll_offset(), 0, "scrolling up from the top clamps");

        node.scroll_by(-100);
        assert_eq!(node.scroll_offset(), 7, "10 lines minus 3 visible");

        node.render(&mut target, Point::new(0, 0));
        assert_eq!(target.rows_text(), vec!["7", "8", "9"]);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut target = Surface::new(Size::new(4, 5), Color::BLACK);
        let mut node = ScrollTextNode::new(Size::new(4, 5), "a\nb");
        node.render(&mut target, Point::new(0, 0));
        node.scroll_by(-3);
        assert_eq!(node.scroll_offset(), 0);
    }

    #[test]
    fn composite_rebuilds_only_on_text_change() {
        let mut target = Surface::new(Size::new(4, 3), Color::BLACK);
        let mut node = ScrollTextNode::new(Size::new(4, 3), numbered(10));

        node.render(&mut target, Point::new(0, 0));
        node.set_text(numbered(10));
        node.render(&mut target, Point::new(0, 0));
        assert_eq!(node.rebuild_count(), 1, "identical content is cached");

        node.scroll_by(-1);
        node.render(&mut target, Point::new(0, 0));
        assert_eq!(node.rebuild_count(), 1, "scrolling does not re-layout");
        assert_eq!(target.rows_text(), vec!["1", "2", "3"]);

        node.set_text(numbered(12));
        node.render(&mut target, Point::new(0, 0));
        assert_eq!(node.rebuild_count(), 2);
    }
}
