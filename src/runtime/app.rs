//! Application lifecycle interface.

use crate::core::color::Color;
use crate::core::geometry::{Point, Rect, Size};
use crate::core::input::InputSnapshot;
use crate::render::Surface;
use crate::runtime::context::{AppMessage, OsContext, OsEvent};
use crate::runtime::window::Window;
use crate::scene::SceneTree;

/// Result of asking the runtime to start an app by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Started,
    AlreadyRunning,
    NotFound,
}

/// One running program inside the shell.
///
/// Lifecycle: constructed by the catalog, `on_run` after registration,
/// `update`/`render` once per frame while eligible, `on_close` on removal.
/// Window-like apps expose their chrome through [`App::as_window`]; the
/// runtime drives focus, dragging, and minimize/close hit-testing through
/// that probe, so plain panels never pay for chrome state.
pub trait App {
    fn name(&self) -> &str;

    fn on_run(&mut self, _ctx: &mut OsContext) {}

    fn on_close(&mut self, _ctx: &mut OsContext) {}

    fn update(&mut self, _ctx: &mut OsContext) {}

    fn render(&mut self, _ctx: &mut OsContext) {}

    /// Window chrome capability probe.
    fn as_window(&mut self) -> Option<&mut Window> {
        None
    }

    /// Lifecycle broadcast hook (started / minimized / closed).
    fn on_event(&mut self, _event: &OsEvent, _ctx: &mut OsContext) {}

    /// Directed message hook (see [`AppMessage`]).
    fn on_message(&mut self, _message: &AppMessage, _ctx: &mut OsContext) {}
}

/// Chromeless drawable app state: an owned surface at a position.
///
/// Panels update every frame regardless of window focus and are the base of
/// full-screen shell layers like the desktop.
#[derive(Clone, Debug)]
pub struct Panel {
    pub pos: Point,
    pub surface: Surface,
    pub visible: bool,
    pub bg: Color,
}

impl Panel {
    #[must_use]
    pub fn new(size: Size, bg: Color) -> Self {
        Self {
            pos: Point::default(),
            surface: Surface::new(size, bg),
            visible: true,
            bg,
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.surface.size()
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size())
    }

    pub fn center_on(&mut self, screen: Size) {
        let size = self.size();
        self.pos = Point::new((screen.w - size.w) / 2, (screen.h - size.h) / 2);
    }

    /// Pointer position in this panel's coordinate space.
    #[must_use]
    pub fn local_mouse(&self, input: &InputSnapshot) -> Point {
        input.mouse - self.pos
    }

    pub fn render_to(&self, screen: &mut Surface) {
        if self.visible {
            screen.blit(&self.surface, self.pos);
        }
    }
}

/// A window whose contents are a scene-graph node tree.
///
/// Embedded by apps that compose their surface from nodes; the render pass
/// fills the body, paints the tree over it, then lets the window draw its
/// chrome on the screen — so nodes always paint between background and
/// chrome.
pub struct NodeApp {
    pub win: Window,
    pub tree: SceneTree,
}

impl NodeApp {
    #[must_use]
    pub fn new(win: Window) -> Self {
        Self {
            win,
            tree: SceneTree::new(),
        }
    }

    pub fn update(&mut self, input: &InputSnapshot) {
        let local_mouse = self.win.local_mouse(input);
        self.tree.update(input, local_mouse);
    }

    pub fn render_to(&mut self, screen: &mut Surface, screen_size: Size) {
        self.win.panel.surface.fill(self.win.panel.bg);
        self.tree.render(&mut self.win.panel.surface);
        self.win.render_to(screen, screen_size);
    }
}
