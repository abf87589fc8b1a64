//! Scrollable text viewer window.
//!
//! A node-tree app: a scroll view body under a toolbar strip. Loads its
//! text from the app's backing folder when present.

use crate::core::color::Color;
use crate::core::geometry::{Point, Size};
use crate::runtime::app::{App, NodeApp};
use crate::runtime::catalog::AppSeed;
use crate::runtime::context::OsContext;
use crate::runtime::window::Window;
use crate::scene::{NodeId, NodeKind, RectNode, ScrollTextNode};

const WINDOW_SIZE: Size = Size::new(50, 16);
const TOOLBAR_HEIGHT: i32 = 1;

/// Blob read from the app's backing folder at startup.
pub const CONTENT_FILE: &str = "notes.txt";

pub struct ViewerApp {
    name: String,
    node: NodeApp,
    body: NodeId,
}

impl ViewerApp {
    #[must_use]
    pub fn new(seed: &AppSeed) -> Self {
        let bg = Color::gray(30);
        let win = Window::centered(&seed.name, WINDOW_SIZE, seed.screen, bg);
        let mut node = NodeApp::new(win);
        let size = node.win.panel.size();

        let text = seed
            .store
            .load_text(CONTENT_FILE)
            .unwrap_or_else(|_| sample_text());
        let body = node.tree.add(
            None,
            Point::new(0, TOOLBAR_HEIGHT),
            NodeKind::ScrollText(
                ScrollTextNode::new(Size::new(size.w, size.h - TOOLBAR_HEIGHT), text)
                    .colors(Color::WHITE, bg),
            ),
        );
        node.tree.add(
            None,
            Point::new(0, 0),
            NodeKind::Rect(RectNode::new(Size::new(size.w, TOOLBAR_HEIGHT), Color::gray(10))),
        );

        Self {
            name: seed.name.clone(),
            node,
            body,
        }
    }

    pub fn show_text(&mut self, text: impl Into<String>) {
        if let Some(body) = self.node.tree.scroll_text_mut(self.body) {
            body.set_text(text);
        }
    }

    #[must_use]
    pub fn scroll_offset(&mut self) -> i32 {
        self.node
            .tree
            .scroll_text_mut(self.body)
            .map(|body| body.scroll_offset())
            .unwrap_or(0)
    }
}

fn sample_text() -> String {
    (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join("\n")
}

impl App for ViewerApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_window(&mut self) -> Option<&mut Window> {
        Some(&mut self.node.win)
    }

    fn update(&mut self, ctx: &mut OsContext) {
        self.node.update(&ctx.input);
        self.node.tree.drain_actions();
    }

    fn render(&mut self, ctx: &mut OsContext) {
        let screen_size = ctx.screen_size();
        self.node.render_to(&mut ctx.screen, screen_size);
    }
}
