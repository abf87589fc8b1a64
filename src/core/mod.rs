//! Core types shared by every layer.

pub mod color;
pub mod geometry;
pub mod input;
