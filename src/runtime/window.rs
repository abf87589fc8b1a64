//! Window chrome: title bar, drag, minimize/close hit-zones.

use crate::core::color::Color;
use crate::core::geometry::{Point, Rect, Size};
use crate::core::input::InputSnapshot;
use crate::render::Surface;
use crate::runtime::app::Panel;

/// Title-bar height in cells.
pub const CHROME_HEIGHT: i32 = 1;

/// Width of the close/minimize hit-zones. The original chrome used square
/// buttons one chrome-height wide; on a cell grid the equivalent block is
/// three cells (`[x]` / `[-]`).
pub const BUTTON_WIDTH: i32 = 3;

#[derive(Clone, Copy, Debug)]
pub struct ChromeTheme {
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub close_bg: Color,
    pub minimize_bg: Color,
}

impl Default for ChromeTheme {
    fn default() -> Self {
        Self {
            bar_bg: Color::gray(200),
            bar_fg: Color::BLACK,
            close_bg: Color::new(255, 0, 0),
            minimize_bg: Color::new(255, 200, 0),
        }
    }
}

/// What a click on (or near) a window landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChromeHit {
    Close,
    Minimize,
    TitleBar,
    Body,
    Miss,
}

/// Chrome state for a window app.
///
/// `focused` is the window-app "can update" flag: the runtime's focus
/// protocol keeps it true for at most one window at a time. A minimized
/// window stays registered but is neither rendered nor updated and does not
/// hit-test.
pub struct Window {
    pub panel: Panel,
    pub title: String,
    pub focused: bool,
    pub minimized: bool,
    pub can_minimize: bool,
    pub theme: ChromeTheme,
    drag: Option<Point>,
}

impl Window {
    #[must_use]
    pub fn new(title: impl Into<String>, size: Size, bg: Color) -> Self {
        Self {
            panel: Panel::new(size, bg),
            title: title.into(),
            focused: false,
            minimized: false,
            can_minimize: true,
            theme: ChromeTheme::default(),
            drag: None,
        }
    }

    /// A window centered on the screen, the default placement for new apps.
    #[must_use]
    pub fn centered(title: impl Into<String>, size: Size, screen: Size, bg: Color) -> Self {
        let mut win = Self::new(title, size, bg);
        win.panel.center_on(screen);
        win
    }

    #[must_use]
    pub fn pos(&self) -> Point {
        self.panel.pos
    }

    #[must_use]
    pub fn body_rect(&self) -> Rect {
        self.panel.rect()
    }

    #[must_use]
    pub fn chrome_rect(&self) -> Rect {
        let body = self.body_rect();
        Rect::new(body.x, body.y - CHROME_HEIGHT, body.w, CHROME_HEIGHT)
    }

    /// Chrome and body together.
    #[must_use]
    pub fn full_rect(&self) -> Rect {
        let body = self.body_rect();
        Rect::new(body.x, body.y - CHROME_HEIGHT, body.w, body.h + CHROME_HEIGHT)
    }

    #[must_use]
    pub fn local_mouse(&self, input: &InputSnapshot) -> Point {
        self.panel.local_mouse(input)
    }

    /// Classify a click position against the chrome.
    ///
    /// Close is the rightmost button block of the title bar; minimize the
    /// block immediately left of it, present only when minimizing is
    /// supported. Minimized windows never hit.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> ChromeHit {
        if self.minimized {
            return ChromeHit::Miss;
        }
        let body = self.body_rect();
        if self.chrome_rect().contains(point) {
            if point.x >= body.x + body.w - BUTTON_WIDTH {
                return ChromeHit::Close;
            }
            if self.can_minimize && point.x >= body.x + body.w - 2 * BUTTON_WIDTH {
                return ChromeHit::Minimize;
            }
            return ChromeHit::TitleBar;
        }
        if body.contains(point) {
            return ChromeHit::Body;
        }
        ChromeHit::Miss
    }

    /// Start tracking a drag from the current pointer position.
    pub fn begin_drag(&mut self, mouse: Point) {
        self.drag = Some(mouse - self.panel.pos);
    }

    #[must_use]
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Track the pointer while the button is held; releasing the button ends
    /// the drag unconditionally.
    pub fn track_drag(&mut self, input: &InputSnapshot) {
        if let Some(grab) = self.drag {
            self.panel.pos = input.mouse - grab;
            if !input.mouse_down {
                self.drag = None;
            }
        }
    }

    pub fn minimize(&mut self) {
        self.minimized = true;
        self.focused = false;
    }

    pub fn restore(&mut self) {
        self.minimized = false;
    }

    /// Blit the body and draw the chrome row above it. Full-screen windows
    /// skip chrome, matching the original's untabbed full-surface windows.
    pub fn render_to(&mut self, screen: &mut Surface, screen_size: Size) {
        if self.minimized {
            return;
        }
        screen.blit(&self.panel.surface, self.panel.pos);
        if self.panel.size() == screen_size {
            return;
        }

        let bar = self.chrome_rect();
        screen.fill_rect(bar, self.theme.bar_bg);
        screen.draw_text(
            bar.x + 1,
            bar.y,
            &self.title,
            self.theme.bar_fg,
            Some(self.theme.bar_bg),
        );

        let close_x = bar.x + bar.w - BUTTON_WIDTH;
        screen.fill_rect(
            Rect::new(close_x, bar.y, BUTTON_WIDTH, CHROME_HEIGHT),
            self.theme.close_bg,
        );
        screen.draw_text(close_x, bar.y, "[x]", self.theme.bar_fg, Some(self.theme.close_bg));

        if self.can_minimize {
            let min_x = close_x - BUTTON_WIDTH;
            screen.fill_rect(
                Rect::new(min_x, bar.y, BUTTON_WIDTH, CHROME_HEIGHT),
                self.theme.minimize_bg,
            );
            screen.draw_text(min_x, bar.y, "[-]", self.theme.bar_fg, Some(self.theme.minimize_bg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChromeHit, Window, BUTTON_WIDTH};
    use crate::core::color::Color;
    use crate::core::geometry::{Point, Size};
    use crate::core::input::InputSnapshot;

    fn window_at(x: i32, y: i32) -> Window {
        let mut win = Window::new("test", Size::new(20, 10), Color::gray(50));
        win.panel.pos = Point::new(x, y);
        win
    }

    #[test]
    fn hit_zones_partition_the_title_bar() {
        let win = window_at(5, 5);
        // Bar row is y = 4; close zone is the rightmost block.
        assert_eq!(win.hit_test(Point::new(5 + 20 - 1, 4)), ChromeHit::Close);
        assert_eq!(
            win.hit_test(Point::new(5 + 20 - BUTTON_WIDTH, 4)),
            ChromeHit::Close
        );
        assert_eq!(
            win.hit_test(Point::new(5 + 20 - BUTTON_WIDTH - 1, 4)),
            ChromeHit::Minimize
        );
        assert_eq!(win.hit_test(Point::new(6, 4)), ChromeHit::TitleBar);
        assert_eq!(win.hit_test(Point::new(6, 5)), ChromeHit::Body);
        assert_eq!(win.hit_test(Point::new(4, 4)), ChromeHit::Miss);
        assert_eq!(win.hit_test(Point::new(6, 3)), ChromeHit::Miss);
    }

    #[test]
    fn minimize_zone_folds_into_the_drag_area_when_unsupported() {
        let mut win = window_at(0, 1);
        win.can_minimize = false;
        assert_eq!(
            win.hit_test(Point::new(20 - BUTTON_WIDTH - 1, 0)),
            ChromeHit::TitleBar
        );
    }

    #[test]
    fn minimized_windows_do_not_hit() {
        let mut win = window_at(0, 1);
        win.minimize();
        assert_eq!(win.hit_test(Point::new(5, 5)), ChromeHit::Miss);
        assert!(!win.focused);
    }

    #[test]
    fn drag_tracks_pointer_minus_grab_offset_until_release() {
        let mut win = window_at(10, 10);
        let mut input = InputSnapshot::new();

        input.move_mouse(Point::new(12, 9));
        input.press_mouse();
        win.begin_drag(input.mouse);

        input.move_mouse(Point::new(20, 15));
        win.track_drag(&input);
        assert_eq!(win.pos(), Point::new(18, 16));
        assert!(win.dragging());

        input.release_mouse();
        input.move_mouse(Point::new(30, 30));
        win.track_drag(&input);
        assert!(!win.dragging());
        let pos = win.pos();
        win.track_drag(&input);
        assert_eq!(win.pos(), pos, "released drag no longer tracks");
    }
}
