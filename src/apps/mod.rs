//! Built-in apps and the reusable menu/prompt mechanisms they share.

pub mod desktop;
pub mod files;
pub mod menu;
pub mod prompt;
pub mod viewer;

pub use desktop::{DesktopApp, PowerApp};
pub use files::{FilesApp, FilesCmd};
pub use menu::{MenuApp, MenuBranch, MenuCommand, MenuEntry, MenuNav, MenuPane, BACK_LABEL};
pub use prompt::PromptApp;
pub use viewer::ViewerApp;

use crate::runtime::catalog::AppCatalog;

/// Catalog with the stock shell apps registered.
#[must_use]
pub fn builtin_catalog() -> AppCatalog {
    let mut catalog = AppCatalog::new();
    catalog.register("desktop", |seed| Box::new(DesktopApp::new(seed)));
    catalog.register("power off", |seed| Box::new(PowerApp::new(&seed.name)));
    catalog.register("files", |seed| Box::new(FilesApp::new(seed)));
    catalog.register("notes", |seed| Box::new(ViewerApp::new(seed)));
    catalog
}
