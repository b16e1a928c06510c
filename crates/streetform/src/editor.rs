//! Editor glue: owns the profile, the layout, the drag preview and the
//! measurement overlay, and turns raw drag events into layout commands.
//!
//! All work runs on discrete input events; during an active drag only the
//! preview moves and the layout is read-only until the drop commits. Every
//! mutation completes before a redraw can observe it, so the overlay always
//! sees a consistent layout.

use serde::{Deserialize, Serialize};
use streetform_core::{Canvas, Viewport};
use streetform_layout::{
    EntryId, Placeholder, Segment, SegmentId, SegmentLayout, SegmentProfile,
};
use streetform_measure::MeasureDisplay;

/// Street length assumed when the profile is empty, in centimeters.
pub const DEFAULT_STREET_SIZE: f32 = 1000.0;

/// Zoom bounds in percent.
pub const ZOOM_RANGE: std::ops::RangeInclusive<u32> = 50..=200;

/// What entered the container when a drag began.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A fresh element from the catalog; the record is cloned into the
    /// profile when the drop commits.
    Resource {
        /// Template record of the dragged catalog element
        segment: Segment,
    },
    /// An entry already placed in this container.
    Placed {
        /// The entry being repositioned
        entry: EntryId,
    },
}

/// Structural notification produced by a committed mutation.
///
/// The embedding application consumes these to persist or revalidate the
/// full profile; the engine itself never talks to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileEvent {
    /// A new entry was inserted
    Inserted {
        /// The new entry
        entry: EntryId,
        /// Its segment record
        segment: SegmentId,
    },
    /// An entry was moved to a new position
    Moved {
        /// The moved entry
        entry: EntryId,
        /// Its segment record
        segment: SegmentId,
    },
    /// An entry was resized
    Resized {
        /// The resized entry
        entry: EntryId,
        /// Its segment record
        segment: SegmentId,
    },
    /// An entry and its segment record were deleted
    Deleted {
        /// The removed segment record
        segment: SegmentId,
    },
}

/// Result of releasing a drag over the container.
#[derive(Debug, Clone, PartialEq)]
pub struct DropResult {
    /// Whether the drop was committed into the layout
    pub committed: bool,
    /// Notifications for the embedding application
    pub events: Vec<ProfileEvent>,
}

/// The interactive editor over one street profile.
pub struct ProfileEditor {
    profile: SegmentProfile,
    layout: SegmentLayout,
    placeholder: Placeholder,
    measure: MeasureDisplay,
    viewport: Viewport,
    base_width: f32,
    street_size: f32,
    zoom: u32,
    admin_mode: bool,
    pending: Option<DragSource>,
    needs_redraw: bool,
}

impl ProfileEditor {
    /// Create an editor over an empty profile.
    #[must_use]
    pub fn new(street_size: f32, viewport: Viewport) -> Self {
        Self::with_profile(SegmentProfile::new(), street_size, viewport)
    }

    /// Create an editor over an existing profile.
    ///
    /// A non-positive `street_size` falls back to the profile's own extent,
    /// or [`DEFAULT_STREET_SIZE`] if that is empty too.
    #[must_use]
    pub fn with_profile(profile: SegmentProfile, street_size: f32, viewport: Viewport) -> Self {
        let street_size = if street_size > 0.0 {
            street_size.max(profile.street_size())
        } else if profile.street_size() > 0.0 {
            profile.street_size()
        } else {
            DEFAULT_STREET_SIZE
        };

        let mut measure = MeasureDisplay::new(street_size);
        measure.resize(viewport);

        let mut editor = Self {
            profile,
            layout: SegmentLayout::new(),
            placeholder: Placeholder::new(),
            measure,
            viewport,
            base_width: viewport.width,
            street_size,
            zoom: 100,
            admin_mode: false,
            pending: None,
            needs_redraw: true,
        };
        editor.layout.change_scale(editor.pixel_ratio());
        editor.rebuild();
        editor
    }

    /// Enable admin mode: fixed entries become movable and the overlay
    /// shows the full raster grid.
    #[must_use]
    pub fn admin_mode(mut self, admin: bool) -> Self {
        self.admin_mode = admin;
        self.measure = MeasureDisplay::new(self.street_size).show_raster(admin);
        self.measure.resize(self.viewport);
        self.needs_redraw = true;
        self
    }

    /// The profile being edited.
    #[must_use]
    pub fn profile(&self) -> &SegmentProfile {
        &self.profile
    }

    /// The placed entries in pixel space.
    #[must_use]
    pub fn layout(&self) -> &SegmentLayout {
        &self.layout
    }

    /// The drag preview.
    #[must_use]
    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// Current container geometry.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Physical street length in centimeters.
    #[must_use]
    pub fn street_size(&self) -> f32 {
        self.street_size
    }

    /// Current zoom in percent.
    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Whether a mutation happened since the last draw.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Pixels per centimeter at the current container width.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.viewport.pixel_ratio(self.street_size)
    }

    /// Re-derive the layout from the profile records.
    pub fn rebuild(&mut self) {
        let ratio = self.pixel_ratio();
        self.layout.clear();
        for (id, segment) in self.profile.iter() {
            self.layout.insert(
                id,
                segment.start_pos * ratio,
                segment.size * ratio,
                segment.is_connector,
            );
        }
        self.needs_redraw = true;
    }

    /// A drag entered the container.
    ///
    /// Fixed entries are not movable outside admin mode; such drags are
    /// ignored. Returns whether a drag is now in flight.
    pub fn drag_enter(&mut self, source: DragSource, pointer_x: f32) -> bool {
        let (width, is_connector, origin) = match &source {
            DragSource::Resource { segment } => {
                (segment.size * self.pixel_ratio(), segment.is_connector, None)
            }
            DragSource::Placed { entry } => {
                let Some(placed) = self.layout.get(*entry) else {
                    return false;
                };
                let fixed = self
                    .profile
                    .get(placed.segment)
                    .is_some_and(|segment| segment.fixed);
                if fixed && !self.admin_mode {
                    return false;
                }
                (placed.width, placed.is_connector, Some(*entry))
            }
        };

        self.placeholder.activate(width, is_connector, origin);
        self.placeholder
            .update_pos(pointer_x, &self.layout, self.viewport);
        self.pending = Some(source);
        true
    }

    /// The pointer moved while dragging. No-op without an active drag.
    pub fn drag_move(&mut self, pointer_x: f32) {
        self.placeholder
            .update_pos(pointer_x, &self.layout, self.viewport);
    }

    /// The drag left the container without dropping.
    pub fn drag_leave(&mut self) {
        self.placeholder.deactivate();
        self.pending = None;
    }

    /// The drag was released over the container.
    ///
    /// Commits into the layout only while the preview is droppable; a
    /// blocked drop reverts without touching profile or layout. Returns
    /// `None` when no drag was in flight.
    pub fn drop(&mut self) -> Option<DropResult> {
        let source = self.pending.take()?;
        let droppable = self.placeholder.is_droppable();
        let left = self.placeholder.left();
        self.placeholder.deactivate();

        if !droppable {
            return Some(DropResult {
                committed: false,
                events: Vec::new(),
            });
        }

        let ratio = self.pixel_ratio();
        let events = match source {
            DragSource::Resource { segment } => {
                let mut record = segment;
                record.start_pos = if ratio > 0.0 { left / ratio } else { 0.0 };
                let segment_id = self.profile.add(record);
                let entry = self.layout.insert(
                    segment_id,
                    left,
                    record.size * ratio,
                    record.is_connector,
                );
                vec![ProfileEvent::Inserted {
                    entry,
                    segment: segment_id,
                }]
            }
            DragSource::Placed { entry } => {
                self.layout.apply_drag_result(entry, left);
                let Some(placed) = self.layout.get(entry) else {
                    return Some(DropResult {
                        committed: false,
                        events: Vec::new(),
                    });
                };
                let segment_id = placed.segment;
                if let Some(segment) = self.profile.get_mut(segment_id) {
                    segment.start_pos = if ratio > 0.0 { left / ratio } else { 0.0 };
                }
                vec![ProfileEvent::Moved {
                    entry,
                    segment: segment_id,
                }]
            }
        };

        self.needs_redraw = true;
        Some(DropResult {
            committed: true,
            events,
        })
    }

    /// Remove an entry and cascade-delete its segment record.
    ///
    /// Unknown ids are a no-op returning `None`.
    pub fn delete_entry(&mut self, entry: EntryId) -> Option<ProfileEvent> {
        let placed = self.layout.remove(entry)?;
        self.profile.remove(placed.segment);
        self.needs_redraw = true;
        Some(ProfileEvent::Deleted {
            segment: placed.segment,
        })
    }

    /// Resize an entry, bounded by its neighbors and the container.
    ///
    /// The growing edge is capped at the respective resize limit; layout
    /// and segment record are updated together.
    pub fn resize_entry(
        &mut self,
        entry: EntryId,
        new_left: f32,
        new_width: f32,
    ) -> Option<ProfileEvent> {
        let limits = self.layout.resize_limits(entry, self.viewport.width)?;
        let placed = *self.layout.get(entry)?;

        let left_handle = (new_left - placed.left).abs() > f32::EPSILON;
        let max_width = if left_handle {
            limits.max_width_left
        } else {
            limits.max_width_right
        };
        let width = new_width.min(max_width).max(0.0);
        // a capped left handle keeps the right edge anchored
        let left = if left_handle {
            placed.right() - width
        } else {
            placed.left
        };

        self.layout.apply_resize_result(entry, left, width);
        let ratio = self.pixel_ratio();
        let segment_id = placed.segment;
        if let Some(segment) = self.profile.get_mut(segment_id) {
            if ratio > 0.0 {
                segment.start_pos = left / ratio;
                segment.size = width / ratio;
            }
        }
        self.needs_redraw = true;
        Some(ProfileEvent::Resized {
            entry,
            segment: segment_id,
        })
    }

    /// Change the zoom level (percent, clamped to [`ZOOM_RANGE`]).
    ///
    /// Rescales the container width and every placed entry; physical
    /// positions are unchanged.
    pub fn set_zoom(&mut self, percent: u32) {
        let percent = percent.clamp(*ZOOM_RANGE.start(), *ZOOM_RANGE.end());
        if percent == self.zoom {
            return;
        }
        self.zoom = percent;
        self.viewport.width = self.base_width * percent as f32 / 100.0;
        self.layout.change_scale(self.pixel_ratio());
        self.measure.resize(self.viewport);
        self.needs_redraw = true;
    }

    /// Change the physical street width (admin control).
    pub fn set_street_size(&mut self, street_size: f32) {
        if street_size <= 0.0 {
            return;
        }
        self.street_size = street_size;
        self.measure.set_street_size(street_size);
        self.layout.change_scale(self.pixel_ratio());
        self.needs_redraw = true;
    }

    /// The container itself was resized.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.base_width = viewport.width * 100.0 / self.zoom as f32;
        self.layout.change_scale(self.pixel_ratio());
        self.measure.resize(viewport);
        self.needs_redraw = true;
    }

    /// Repaint the overlay. Clears the redraw flag.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.measure.draw(&self.layout, &self.profile, canvas);
        self.needs_redraw = false;
    }

    /// Remove every entry and segment record.
    pub fn clear(&mut self) {
        self.layout.clear();
        self.profile.clear();
        self.needs_redraw = true;
    }
}
