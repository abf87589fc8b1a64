//! Scripted in-memory display for tests.

use std::collections::VecDeque;
use std::io;

use crate::core::geometry::{Point, Size};
use crate::core::input::{InputSnapshot, Key};
use crate::platform::Display;
use crate::render::Surface;

/// One scripted raw event.
#[derive(Clone, Debug)]
pub enum ScriptEvent {
    Key(Key),
    Text(String),
    MouseMove(Point),
    MouseDown,
    MouseUp,
    Scroll(i32),
    Quit,
}

/// Fixed-size display that replays one scripted frame of events per pump
/// and captures every presented screen as text rows. When the script runs
/// out it requests quit, so `start` terminates deterministically.
pub struct HeadlessDisplay {
    size: Size,
    frames: VecDeque<Vec<ScriptEvent>>,
    last_frame: Vec<String>,
    presented: usize,
}

impl HeadlessDisplay {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            frames: VecDeque::new(),
            last_frame: Vec::new(),
            presented: 0,
        }
    }

    pub fn script_frame(&mut self, events: Vec<ScriptEvent>) {
        self.frames.push_back(events);
    }

    /// Text rows of the most recently presented screen.
    #[must_use]
    pub fn last_frame(&self) -> &[String] {
        &self.last_frame
    }

    #[must_use]
    pub fn presented_frames(&self) -> usize {
        self.presented
    }
}

impl Display for HeadlessDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn pump(&mut self, input: &mut InputSnapshot) -> io::Result<()> {
        let Some(events) = self.frames.pop_front() else {
            input.request_quit();
            return Ok(());
        };
        for event in events {
            match event {
                ScriptEvent::Key(key) => {
                    input.press_key(key);
                    input.release_key(key);
                }
                ScriptEvent::Text(text) => input.push_text(&text),
                ScriptEvent::MouseMove(to) => input.move_mouse(to),
                ScriptEvent::MouseDown => input.press_mouse(),
                ScriptEvent::MouseUp => input.release_mouse(),
                ScriptEvent::Scroll(delta) => input.add_scroll(delta),
                ScriptEvent::Quit => input.request_quit(),
            }
        }
        Ok(())
    }

    fn present(&mut self, screen: &Surface) -> io::Result<()> {
        self.last_frame = screen.rows_text();
        self.presented += 1;
        Ok(())
    }
}
