//! Runtime orchestration.

pub mod app;
pub mod catalog;
pub mod context;
pub mod os;
pub mod window;

pub use app::{App, NodeApp, Panel, RunOutcome};
pub use catalog::{AppCatalog, AppFactory, AppManifest, AppSeed, APP_MANIFEST};
pub use context::{AppMessage, FrameClock, OsCommand, OsContext, OsEvent, WindowInfo};
pub use os::{OsRuntime, APPS_DIR};
pub use window::{ChromeHit, ChromeTheme, Window, BUTTON_WIDTH, CHROME_HEIGHT};
