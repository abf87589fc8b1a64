//! Display backends.
//!
//! Raw event capture and presentation live behind [`Display`]; the runtime
//! never touches a terminal directly.

use std::io;

use crate::core::geometry::Size;
use crate::core::input::InputSnapshot;
use crate::render::Surface;

pub mod headless;
pub mod term_display;

pub use headless::{HeadlessDisplay, ScriptEvent};
pub use term_display::TermDisplay;

/// A fixed-resolution display plus its raw input source.
pub trait Display {
    fn size(&self) -> Size;

    /// Feed pending raw events into the snapshot. Called once per frame
    /// after `begin_frame`.
    fn pump(&mut self, input: &mut InputSnapshot) -> io::Result<()>;

    /// Present the composited screen.
    fn present(&mut self, screen: &Surface) -> io::Result<()>;
}
