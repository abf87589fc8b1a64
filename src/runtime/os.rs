//! The shell runtime: ordered app list, frame loop, focus and click routing.

use std::io;
use std::time::{Duration, Instant};

use crate::config::EnvConfig;
use crate::core::color::Color;
use crate::core::geometry::Size;
use crate::platform::Display;
use crate::runtime::app::{App, RunOutcome};
use crate::runtime::catalog::{AppCatalog, AppSeed, APP_MANIFEST};
use crate::runtime::context::{OsCommand, OsContext, OsEvent, WindowInfo};
use crate::runtime::window::ChromeHit;

/// Folder under the store root holding per-app backing folders.
pub const APPS_DIR: &str = "apps";

/// Commands queued during a drain may queue more; the drain re-runs up to
/// this many passes before deferring the rest to the next frame.
const COMMAND_DRAIN_PASSES: usize = 4;

const DEFAULT_FPS: u32 = 60;

struct AppEntry {
    /// Registration sequence; click dispatch and shutdown order key off
    /// this, not the list position that focus re-stacking mutates.
    seq: u64,
    app: Box<dyn App>,
}

/// Owns the ordered list of live apps (back-to-front) and the shared
/// context, and drives the frame loop.
///
/// z-order is purely list position: later entries update and paint later.
/// Exactly one window app may hold the focus flag at a time; panels are
/// unaffected by the focus protocol.
pub struct OsRuntime {
    ctx: OsContext,
    catalog: AppCatalog,
    entries: Vec<AppEntry>,
    next_seq: u64,
    background: Option<Color>,
    fps: u32,
    autostart: Option<String>,
    exiting: bool,
    pending_messages: Vec<crate::runtime::context::AppMessage>,
}

impl OsRuntime {
    #[must_use]
    pub fn new(screen: Size, store: blob_store::Store, catalog: AppCatalog) -> Self {
        Self {
            ctx: OsContext::new(screen, store),
            catalog,
            entries: Vec::new(),
            next_seq: 0,
            background: None,
            fps: EnvConfig::from_env().fps.unwrap_or(DEFAULT_FPS),
            autostart: None,
            exiting: false,
            pending_messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// App started automatically when the frame loop begins.
    #[must_use]
    pub fn with_autostart(mut self, name: impl Into<String>) -> Self {
        self.autostart = Some(name.into());
        self
    }

    #[must_use]
    pub fn context(&self) -> &OsContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut OsContext {
        &mut self.ctx
    }

    #[must_use]
    pub fn app_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.app.name().to_string())
            .collect()
    }

    #[must_use]
    pub fn is_running(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn exiting(&self) -> bool {
        self.exiting
    }

    /// Chrome access for a running window app (panels return `None`).
    pub fn window_of(&mut self, name: &str) -> Option<&mut crate::runtime::window::Window> {
        let idx = self.position(name)?;
        self.entries[idx].app.as_window()
    }

    /// Name of the window currently holding focus, if any.
    #[must_use]
    pub fn focused_app(&mut self) -> Option<String> {
        for idx in 0..self.entries.len() {
            let name = self.entries[idx].app.name().to_string();
            if let Some(win) = self.entries[idx].app.as_window() {
                if win.focused {
                    return Some(name);
                }
            }
        }
        None
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.app.name() == name)
    }

    /// Start a catalog app by name.
    ///
    /// A duplicate name is rejected without side effects; an unknown name
    /// reports `NotFound`. On success the app lands at the front of the
    /// paint order, its run hook fires, and every live app observes
    /// [`OsEvent::Started`].
    pub fn run(&mut self, name: &str) -> RunOutcome {
        if self.is_running(name) {
            self.ctx.diag.warn(format!("{name} is currently running"));
            return RunOutcome::AlreadyRunning;
        }
        if !self.catalog.contains(name) {
            self.ctx.diag.warn(format!("could not find app {name} to run"));
            return RunOutcome::NotFound;
        }

        let app_store = match self.ctx.store.subdir(&format!("{APPS_DIR}/{name}")) {
            Ok(store) => store,
            Err(err) => {
                self.ctx
                    .diag
                    .warn(format!("could not prepare backing folder for {name}: {err}"));
                return RunOutcome::NotFound;
            }
        };
        if !AppCatalog::is_installed(&app_store) {
            if let Err(err) = AppCatalog::write_manifest(&app_store, name) {
                self.ctx
                    .diag
                    .warn(format!("could not write manifest for {name}: {err}"));
            }
        }

        let seed = AppSeed {
            name: name.to_string(),
            screen: self.ctx.screen_size(),
            store: app_store,
            catalog_names: self.catalog.names(),
        };
        let app = match self.catalog.resolve(name) {
            Some(factory) => factory(&seed),
            None => return RunOutcome::NotFound,
        };
        self.register(app);
        RunOutcome::Started
    }

    /// Register an ad-hoc app instance (dialogs and other un-cataloged
    /// programs). Its backing folder is created without an install manifest,
    /// so it is scratch state cleaned up on close.
    pub fn spawn(&mut self, app: Box<dyn App>) -> RunOutcome {
        let name = app.name().to_string();
        if self.is_running(&name) {
            self.ctx.diag.warn(format!("{name} is currently running"));
            return RunOutcome::AlreadyRunning;
        }
        if let Err(err) = self.ctx.store.subdir(&format!("{APPS_DIR}/{name}")) {
            self.ctx
                .diag
                .warn(format!("could not prepare backing folder for {name}: {err}"));
        }
        self.register(app);
        RunOutcome::Started
    }

    fn register(&mut self, app: Box<dyn App>) {
        let name = app.name().to_string();
        self.ctx.diag.note(format!("running {name}"));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(AppEntry { seq, app });

        let idx = self.entries.len() - 1;
        self.entries[idx].app.on_run(&mut self.ctx);
        if self.entries[idx].app.as_window().is_some() {
            self.focus(&name);
        }
        self.broadcast(&OsEvent::Started(name));
    }

    /// Make `name` the single updating window and move it to the paint
    /// front. Every other window loses its focus flag.
    pub fn focus(&mut self, name: &str) {
        let Some(idx) = self.position(name) else {
            return;
        };
        for entry in &mut self.entries {
            if let Some(win) = entry.app.as_window() {
                win.focused = false;
            }
        }
        let entry = self.entries.remove(idx);
        self.entries.push(entry);
        if let Some(win) = self.entries.last_mut().and_then(|e| e.app.as_window()) {
            win.focused = true;
        }
    }

    /// Run the close hook, remove the app, and delete its backing folder
    /// when it holds no install manifest.
    pub fn close(&mut self, name: &str) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        let mut entry = self.entries.remove(idx);
        self.ctx.diag.note(format!("closing {name}"));
        entry.app.on_close(&mut self.ctx);

        let folder = format!("{APPS_DIR}/{name}");
        if !self.ctx.store.exists(&format!("{folder}/{APP_MANIFEST}")) {
            match self.ctx.store.delete(&folder) {
                Ok(_) => {}
                Err(err) => self
                    .ctx
                    .diag
                    .warn(format!("could not clean up {folder}: {err}")),
            }
        }
        self.broadcast(&OsEvent::Closed(name.to_string()));
        true
    }

    /// Minimize a window that supports it and notify observers.
    pub fn minimize(&mut self, name: &str) {
        let Some(idx) = self.position(name) else {
            return;
        };
        let minimized = match self.entries[idx].app.as_window() {
            Some(win) if win.can_minimize && !win.minimized => {
                win.minimize();
                true
            }
            _ => false,
        };
        if minimized {
            self.ctx.diag.note(format!("minimizing {name}"));
            self.broadcast(&OsEvent::Minimized(name.to_string()));
        }
    }

    /// External restore path (the taskbar): make the window visible again
    /// and hand it focus.
    pub fn restore(&mut self, name: &str) {
        let Some(idx) = self.position(name) else {
            return;
        };
        let restored = match self.entries[idx].app.as_window() {
            Some(win) if win.minimized => {
                win.restore();
                true
            }
            _ => false,
        };
        if restored {
            self.focus(name);
        }
    }

    fn refresh_windows(&mut self) {
        self.ctx.windows.clear();
        for entry in &mut self.entries {
            let name = entry.app.name().to_string();
            if let Some(win) = entry.app.as_window() {
                self.ctx.windows.push(WindowInfo {
                    name,
                    rect: win.full_rect(),
                    minimized: win.minimized,
                });
            }
        }
    }

    /// Route a fresh click through every window's chrome, in registration
    /// order. A hit anywhere on a window focuses it; the title bar splits
    /// into close/minimize/drag zones.
    fn dispatch_click(&mut self) {
        let mut order: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|entry| (entry.seq, entry.app.name().to_string()))
            .collect();
        order.sort_by_key(|(seq, _)| *seq);

        let mouse = self.ctx.input.mouse;
        for (_, name) in order {
            let Some(idx) = self.position(&name) else {
                continue; // closed earlier in this dispatch
            };
            let hit = match self.entries[idx].app.as_window() {
                Some(win) => win.hit_test(mouse),
                None => continue,
            };
            match hit {
                ChromeHit::Miss => {}
                ChromeHit::Body => self.focus(&name),
                ChromeHit::Close => {
                    self.focus(&name);
                    self.close(&name);
                }
                ChromeHit::Minimize => {
                    self.focus(&name);
                    self.minimize(&name);
                }
                ChromeHit::TitleBar => {
                    self.focus(&name);
                    if let Some(win) = self.entries.last_mut().and_then(|e| e.app.as_window()) {
                        win.begin_drag(mouse);
                    }
                }
            }
        }
    }

    fn track_drags(&mut self) {
        let input = self.ctx.input.clone();
        for entry in &mut self.entries {
            if let Some(win) = entry.app.as_window() {
                if win.focused && !win.minimized {
                    win.track_drag(&input);
                }
            }
        }
    }

    /// One logical tick: advance the clock, route clicks and drags, update
    /// eligible apps in list order, then drain queued commands and deliver
    /// messages. The caller refreshes the input snapshot beforehand.
    pub fn update(&mut self, dt: Duration) {
        self.ctx.clock.advance(dt);
        self.refresh_windows();

        if self.ctx.input.click_started {
            self.dispatch_click();
            self.refresh_windows();
        }
        self.track_drags();

        let mut idx = 0;
        while idx < self.entries.len() {
            let updatable = match self.entries[idx].app.as_window() {
                Some(win) => win.focused && !win.minimized,
                None => true,
            };
            if updatable {
                self.entries[idx].app.update(&mut self.ctx);
            }
            idx += 1;
        }

        self.drain_commands();
        self.deliver_messages();
        self.drain_commands();
    }

    /// Paint pass: background, then apps back-to-front.
    pub fn render(&mut self) {
        if let Some(bg) = self.background {
            self.ctx.screen.fill(bg);
        }
        for idx in 0..self.entries.len() {
            self.entries[idx].app.render(&mut self.ctx);
        }
    }

    /// update + render, for test drivers that feed input by hand.
    pub fn step(&mut self, dt: Duration) {
        self.update(dt);
        self.render();
    }

    fn drain_commands(&mut self) {
        for _ in 0..COMMAND_DRAIN_PASSES {
            let commands = self.ctx.drain_commands();
            if commands.is_empty() {
                return;
            }
            for command in commands {
                self.apply(command);
            }
        }
        let leftover = self.ctx.drain_commands();
        if leftover.is_empty() {
            return;
        }
        for command in leftover {
            self.ctx.request(command);
        }
        self.ctx
            .diag
            .warn("command queue did not settle; deferring to next frame");
    }

    fn apply(&mut self, command: OsCommand) {
        match command {
            OsCommand::Run(name) => {
                self.run(&name);
            }
            OsCommand::Spawn(app) => {
                self.spawn(app);
            }
            OsCommand::Close(name) => {
                self.close(&name);
            }
            OsCommand::Focus(name) => self.focus(&name),
            OsCommand::Minimize(name) => self.minimize(&name),
            OsCommand::Restore(name) => self.restore(&name),
            OsCommand::Post(message) => self.pending_messages.push(message),
            OsCommand::Exit => self.exiting = true,
        }
    }

    fn deliver_messages(&mut self) {
        let messages = std::mem::take(&mut self.pending_messages);
        for message in messages {
            match self.position(&message.to) {
                Some(idx) => self.entries[idx].app.on_message(&message, &mut self.ctx),
                None => self
                    .ctx
                    .diag
                    .warn(format!("dropping message for unknown app {}", message.to)),
            }
        }
    }

    fn broadcast(&mut self, event: &OsEvent) {
        for idx in 0..self.entries.len() {
            self.entries[idx].app.on_event(event, &mut self.ctx);
        }
    }

    /// Unwind every live app, most recently started first.
    pub fn shutdown(&mut self) {
        while let Some(name) = self
            .entries
            .iter()
            .max_by_key(|entry| entry.seq)
            .map(|entry| entry.app.name().to_string())
        {
            self.close(&name);
        }
        self.ctx.diag.note("shell stopped");
    }

    /// Fixed-rate frame loop against a display backend. Returns after a quit
    /// request or [`OsCommand::Exit`], once every app has been unwound.
    pub fn start<D: Display>(&mut self, display: &mut D) -> io::Result<()> {
        if let Some(name) = self.autostart.clone() {
            self.run(&name);
        }

        let frame_budget = Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)));
        let mut last = Instant::now();
        while !self.exiting {
            self.ctx.input.begin_frame();
            display.pump(&mut self.ctx.input)?;
            if self.ctx.input.quit {
                break;
            }

            let now = Instant::now();
            let dt = now.duration_since(last);
            last = now;

            self.update(dt);
            self.render();
            display.present(&self.ctx.screen)?;

            std::thread::sleep(frame_budget.saturating_sub(last.elapsed()));
        }
        self.shutdown();
        Ok(())
    }
}
