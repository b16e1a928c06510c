//! Segment layout engine for the streetform editor.
//!
//! This crate owns the hard part of the editor: an ordered sequence of
//! non-overlapping intervals along a single horizontal axis, with
//! interactive insertion, removal and reordering, a pure collision query,
//! and a drag preview with snapping.
//!
//! - [`Segment`] / [`SegmentProfile`]: the physical records, in centimeters
//! - [`SegmentLayout`]: placed entries in pixel space, sorted by position
//! - [`does_fit`]: the collision query feeding the preview
//! - [`Placeholder`]: the transient drag preview

mod fit;
mod list;
mod placeholder;
mod segment;

pub use fit::{does_fit, FitCandidate, FitResult, TOUCH_TOLERANCE};
pub use list::{EntryId, PlacedEntry, ResizeLimits, SegmentLayout};
pub use placeholder::{Placeholder, POINTER_OFFSET_X, SNAP_TOLERANCE};
pub use segment::{Segment, SegmentId, SegmentProfile};
