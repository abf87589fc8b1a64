//! Clickable text node bound to a typed action.

use crate::core::geometry::{Point, Rect};
use crate::core::input::InputSnapshot;
use crate::render::Surface;
use crate::scene::text::TextNode;
use crate::scene::tree::ActionId;

/// A [`TextNode`] that fires its action when a click begins inside its
/// bounds. Hit-testing runs in the owning app's local coordinate space.
#[derive(Clone, Debug)]
pub struct ButtonNode {
    pub label: TextNode,
    action: Option<ActionId>,
    pressed: bool,
}

impl ButtonNode {
    #[must_use]
    pub fn new(label: TextNode, action: ActionId) -> Self {
        Self {
            label,
            action: Some(action),
            pressed: false,
        }
    }

    /// Whether the button fired during the last update.
    #[must_use]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub(crate) fn update(
        &mut self,
        input: &InputSnapshot,
        global: Point,
        local_mouse: Point,
    ) -> Option<ActionId> {
        self.pressed = input.click_started
            && Rect::at(global, self.label.size()).contains(local_mouse);
        if self.pressed {
            self.action
        } else {
            None
        }
    }

    pub(crate) fn render(&mut self, target: &mut Surface, at: Point) {
        self.label.render(target, at);
    }
}
