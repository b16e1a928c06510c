//! Core types for the streetform editor engine.
//!
//! This crate provides the foundational types used throughout streetform:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Viewport`]
//! - Color representation: [`Color`]
//! - Draw commands and the [`Canvas`] abstraction for the measurement overlay

mod canvas;
mod color;
mod draw;
mod geometry;

pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use draw::{BoxStyle, DrawCommand, StrokeStyle, TextAlign, TextStyle};
pub use geometry::{Point, Rect, Size, Viewport};
