//! slate_os: a deterministic single-display windowing shell.
//!
//! Invariant: single screen writer — apps paint only their own surfaces;
//! the runtime composites them onto the shared screen back-to-front.
//!
//! # Public API Overview
//! - Register app factories in an [`AppCatalog`] and drive them with
//!   [`Shell`] (run / focus / minimize / close by name).
//! - Compose app contents from the scene graph ([`SceneTree`] and its node
//!   kinds) over cell [`Surface`]s.
//! - Reuse the menu-tree, prompt, and stock shell apps in [`apps`].
//! - Present through a [`platform::Display`]: a real terminal
//!   ([`TermDisplay`]) or the scripted [`HeadlessDisplay`].
//!
//! # Runtime Alias
//! [`Shell`] is a type alias for `runtime::os::OsRuntime`.

pub mod config;
pub mod logging;

pub mod apps;
pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod scene;

/// Geometry and input primitives.
pub use crate::core::color::Color;
pub use crate::core::geometry::{Point, Rect, Size};
pub use crate::core::input::{InputSnapshot, Key};

/// Cell rendering substrate.
pub use crate::render::{Cell, Surface};

/// Scene graph.
pub use crate::scene::{
    ActionId, ButtonNode, NodeId, NodeKind, RectNode, ScrollTextNode, SceneTree, TextNode,
};

/// App runtime types.
pub use crate::runtime::{
    App, AppCatalog, AppMessage, AppSeed, ChromeHit, NodeApp, OsCommand, OsContext, OsEvent,
    OsRuntime, Panel, RunOutcome, Window, WindowInfo,
};

/// Display backends.
pub use crate::platform::{Display, HeadlessDisplay, TermDisplay};

/// Process-wide diagnostics buffer.
pub use crate::logging::DiagnosticLog;

/// Alias for the main runtime type.
pub type Shell = crate::runtime::os::OsRuntime;
