//! Rendering substrate.

pub mod surface;

pub use surface::{Cell, Surface, CONTINUATION};
