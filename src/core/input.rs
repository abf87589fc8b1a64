//! Per-frame input snapshot.
//!
//! One snapshot is owned by the runtime context and refreshed once per frame:
//! the display backend feeds decoded events between frames, `begin_frame`
//! clears the edge-triggered fields, and applications read it read-only.

use std::collections::HashSet;

use crate::core::geometry::Point;

/// Non-text keys the shell reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Tab,
    Delete,
}

/// Keyboard/mouse/scroll/text state for the current frame.
///
/// `keys_pressed`, `text`, `click_started`, and `scroll` are this-frame edge
/// state; `keys_down` and `mouse_down` are held state that survives frames.
#[derive(Debug, Default, Clone)]
pub struct InputSnapshot {
    keys_pressed: HashSet<Key>,
    keys_down: HashSet<Key>,
    pub text: String,
    pub mouse: Point,
    pub mouse_down: bool,
    pub click_started: bool,
    pub scroll: i32,
    pub quit: bool,
}

impl InputSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear edge-triggered state at the top of a frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.text.clear();
        self.click_started = false;
        self.scroll = 0;
    }

    pub fn press_key(&mut self, key: Key) {
        self.keys_pressed.insert(key);
        self.keys_down.insert(key);
    }

    pub fn release_key(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn move_mouse(&mut self, to: Point) {
        self.mouse = to;
    }

    pub fn press_mouse(&mut self) {
        if !self.mouse_down {
            self.click_started = true;
        }
        self.mouse_down = true;
    }

    pub fn release_mouse(&mut self) {
        self.mouse_down = false;
    }

    pub fn add_scroll(&mut self, delta: i32) {
        self.scroll += delta;
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether `key` went down this frame.
    #[must_use]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether `key` is currently held.
    #[must_use]
    pub fn down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
