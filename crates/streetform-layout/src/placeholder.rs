//! The transient drag preview.
//!
//! While a drag is in flight the placeholder is the only thing that moves;
//! the layout itself is read-only until the drop commits. The preview
//! clamps to the container, queries the collision test on every pointer
//! move and magnetically locks onto nearby boundaries.

use crate::fit::{does_fit, FitCandidate, FitResult};
use crate::list::{EntryId, SegmentLayout};
use streetform_core::Viewport;

/// Distance in pixels below which the preview snaps onto a boundary.
pub const SNAP_TOLERANCE: f32 = 20.0;

/// Horizontal offset of the preview's left edge from the pointer.
pub const POINTER_OFFSET_X: f32 = -20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePreview {
    left: f32,
    width: f32,
    is_connector: bool,
    origin: Option<EntryId>,
    droppable: bool,
}

/// Drag preview over the layout.
///
/// Lifecycle: inactive → [`activate`](Placeholder::activate) on drag-enter →
/// repeated [`update_pos`](Placeholder::update_pos) while dragging →
/// [`deactivate`](Placeholder::deactivate) on drag-leave or after the drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    preview: Option<ActivePreview>,
    snap_tolerance: f32,
    pointer_offset: f32,
}

impl Default for Placeholder {
    fn default() -> Self {
        Self::new()
    }
}

impl Placeholder {
    /// Create an inactive placeholder with the default snap tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            preview: None,
            snap_tolerance: SNAP_TOLERANCE,
            pointer_offset: POINTER_OFFSET_X,
        }
    }

    /// Override the snap tolerance.
    #[must_use]
    pub const fn snap_tolerance(mut self, tolerance: f32) -> Self {
        self.snap_tolerance = tolerance;
        self
    }

    /// Override the pointer offset.
    #[must_use]
    pub const fn pointer_offset(mut self, offset: f32) -> Self {
        self.pointer_offset = offset;
        self
    }

    /// Whether a drag is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.preview.is_some()
    }

    /// The preview's left edge in pixels. Meaningless while inactive.
    #[must_use]
    pub fn left(&self) -> f32 {
        self.preview.map_or(0.0, |p| p.left)
    }

    /// The preview's width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.preview.map_or(0.0, |p| p.width)
    }

    /// Whether the current position may be committed.
    #[must_use]
    pub fn is_droppable(&self) -> bool {
        self.preview.is_some_and(|p| p.droppable)
    }

    /// The entry being repositioned, if the drag started on a placed entry.
    #[must_use]
    pub fn origin(&self) -> Option<EntryId> {
        self.preview.and_then(|p| p.origin)
    }

    /// Whether the dragged element is a coupling element.
    #[must_use]
    pub fn is_connector(&self) -> bool {
        self.preview.is_some_and(|p| p.is_connector)
    }

    /// Begin a drag with a stand-in of the given width.
    ///
    /// `origin` names the placed entry the drag started on, so the
    /// collision test ignores it; `None` for a fresh element from the
    /// catalog.
    pub fn activate(&mut self, width: f32, is_connector: bool, origin: Option<EntryId>) {
        self.preview = Some(ActivePreview {
            left: 0.0,
            width,
            is_connector,
            origin,
            droppable: false,
        });
    }

    /// End the drag and discard the preview.
    pub fn deactivate(&mut self) {
        self.preview = None;
    }

    /// Track a pointer move. No-op while inactive.
    ///
    /// `pointer_x` is container-local. The preview's left edge follows the
    /// pointer (with the configured offset), clamped into the container,
    /// then the collision test decides droppability. When the shorter of
    /// the two gaps is within the snap tolerance, the preview shifts onto
    /// that boundary; the layout itself is never touched.
    ///
    /// Returns the fit result driving the blocked/allowed cue.
    pub fn update_pos(
        &mut self,
        pointer_x: f32,
        layout: &SegmentLayout,
        viewport: Viewport,
    ) -> Option<FitResult> {
        let offset = self.pointer_offset;
        let tolerance = self.snap_tolerance;
        let preview = self.preview.as_mut()?;

        let left = viewport.clamp_x(pointer_x + offset, preview.width);
        preview.left = left;

        let candidate = FitCandidate {
            left,
            width: preview.width,
            entry: preview.origin,
            is_connector: preview.is_connector,
        };
        let result = does_fit(layout, candidate, viewport);
        preview.droppable = result.fits;

        // shortest distance to the nearest boundary wins
        let snap = if result.left_gap < result.right_gap {
            -result.left_gap
        } else {
            result.right_gap
        };
        if snap.abs() < tolerance {
            preview.left += snap;
        }

        Some(result)
    }
}
