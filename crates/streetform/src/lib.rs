//! streetform: the segment-layout engine behind an interactive
//! street-profile editor.
//!
//! The engine keeps an ordered sequence of non-overlapping segments along a
//! single horizontal axis, validates candidate placements during drags,
//! snaps the preview onto nearby boundaries and repaints a scaled
//! measurement overlay after every structural change.
//!
//! This crate re-exports the public API of the engine crates and adds
//! [`ProfileEditor`], the glue wiring raw drag events to the layout.

mod editor;

pub use editor::{
    DragSource, DropResult, ProfileEditor, ProfileEvent, DEFAULT_STREET_SIZE, ZOOM_RANGE,
};

pub use streetform_core::{
    BoxStyle, Canvas, Color, ColorParseError, DrawCommand, Point, Rect, RecordingCanvas, Size,
    StrokeStyle, TextAlign, TextStyle, Viewport,
};
pub use streetform_layout::{
    does_fit, EntryId, FitCandidate, FitResult, PlacedEntry, Placeholder, ResizeLimits, Segment,
    SegmentId, SegmentLayout, SegmentProfile, POINTER_OFFSET_X, SNAP_TOLERANCE, TOUCH_TOLERANCE,
};
pub use streetform_measure::{MeasureDisplay, MeasureTheme};
