//! Runtime context passed to every app hook.
//!
//! The original global process state (shared clock, input snapshot, logical
//! screen) lives here as an explicit object owned by the runtime, with its
//! lifecycle tied to the runtime's own start/stop. Apps read input read-only
//! and request list mutations exclusively through [`OsCommand`]s; they never
//! touch the app list directly.

use std::time::Duration;

use blob_store::Store;

use crate::core::color::Color;
use crate::core::geometry::{Rect, Size};
use crate::core::input::InputSnapshot;
use crate::logging::DiagnosticLog;
use crate::render::Surface;
use crate::runtime::app::App;

/// Shared frame clock, advanced once per frame by the elapsed frame time.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    elapsed: Duration,
    dt: Duration,
    frame: u64,
}

impl FrameClock {
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        self.dt = dt;
        self.frame += 1;
    }

    /// Total time since the runtime started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Duration of the last frame.
    #[must_use]
    pub fn dt(&self) -> Duration {
        self.dt
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// List mutations an app may request; drained by the runtime after the
/// update pass of the same frame.
pub enum OsCommand {
    /// Start a catalog app by name.
    Run(String),
    /// Register an ad-hoc app instance (dialogs).
    Spawn(Box<dyn App>),
    Close(String),
    Focus(String),
    Minimize(String),
    /// Un-minimize and focus.
    Restore(String),
    /// Deliver a message to a named app next drain.
    Post(AppMessage),
    /// Stop the frame loop and unwind every app.
    Exit,
}

/// Lifecycle notifications broadcast to every live app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OsEvent {
    Started(String),
    Minimized(String),
    Closed(String),
}

/// Typed reply channel between apps (prompt dialogs report back this way).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppMessage {
    pub to: String,
    pub topic: String,
    pub body: String,
}

/// Per-frame snapshot of a live window, for read-only hit checks by panels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowInfo {
    pub name: String,
    /// Chrome and body together.
    pub rect: Rect,
    pub minimized: bool,
}

pub struct OsContext {
    pub screen: Surface,
    pub input: InputSnapshot,
    pub clock: FrameClock,
    /// Root of the sandboxed filesystem.
    pub store: Store,
    pub diag: DiagnosticLog,
    /// Window snapshots refreshed at the top of every update pass.
    pub windows: Vec<WindowInfo>,
    commands: Vec<OsCommand>,
}

impl OsContext {
    #[must_use]
    pub fn new(screen_size: Size, store: Store) -> Self {
        Self {
            screen: Surface::new(screen_size, Color::BLACK),
            input: InputSnapshot::new(),
            clock: FrameClock::default(),
            store,
            diag: DiagnosticLog::new(),
            windows: Vec::new(),
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen.size()
    }

    /// Queue a runtime command for this frame's drain.
    pub fn request(&mut self, command: OsCommand) {
        self.commands.push(command);
    }

    pub(crate) fn drain_commands(&mut self) -> Vec<OsCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Whether the pointer is inside any non-minimized window.
    #[must_use]
    pub fn mouse_over_window(&self) -> bool {
        self.windows
            .iter()
            .any(|info| !info.minimized && info.rect.contains(self.input.mouse))
    }
}
