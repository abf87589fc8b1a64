//! Retained-mode scene graph.
//!
//! Each app owns a [`SceneTree`]: an arena of nodes addressed by [`NodeId`],
//! visited own-work-first then children in insertion order, so update order
//! and paint order are identical (first added paints first, last added on
//! top). Button activations surface as typed [`ActionId`]s drained by the
//! owning app rather than captured closures.

pub mod button;
pub mod rect;
pub mod scroll_text;
pub mod text;
pub mod tree;

pub use button::ButtonNode;
pub use rect::RectNode;
pub use scroll_text::ScrollTextNode;
pub use text::TextNode;
pub use tree::{ActionId, Node, NodeId, NodeKind, SceneTree};
