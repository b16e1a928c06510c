//! Measurement overlay for the streetform editor.
//!
//! [`MeasureDisplay`] paints a scaled ruler and per-segment/per-gap size
//! labels from a snapshot of the layout, through the [`Canvas`] abstraction.
//!
//! [`Canvas`]: streetform_core::Canvas

mod display;
mod theme;

pub use display::MeasureDisplay;
pub use theme::MeasureTheme;
