//! The ordered segment layout.
//!
//! Entries live in an arena keyed by stable opaque ids; their placement
//! order is a separate index sorted ascending by `left`. Neighbors are
//! derived from the index, so no entry ever holds a dangling link and no
//! partially-linked state is observable mid-operation.

use crate::segment::SegmentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a placed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl EntryId {
    /// Create a new entry ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A segment placed in the layout, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntry {
    /// Stable id of this entry
    pub id: EntryId,
    /// The segment record this entry places
    pub segment: SegmentId,
    /// Left edge in pixels
    pub left: f32,
    /// Width in pixels
    pub width: f32,
    /// Whether the placed segment is a coupling element
    pub is_connector: bool,
}

impl PlacedEntry {
    /// Right edge in pixels.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Maximum widths available when resizing an entry toward either side,
/// bounded by its neighbors or the container edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    /// Maximum width when dragging the left handle outward
    pub max_width_left: f32,
    /// Maximum width when dragging the right handle outward
    pub max_width_right: f32,
}

/// Position-sorted collection of placed entries.
///
/// Invariant: the order index is ascending by `left` after every operation,
/// and committed non-connector entries never overlap.
#[derive(Debug, Clone)]
pub struct SegmentLayout {
    entries: HashMap<EntryId, PlacedEntry>,
    order: Vec<EntryId>,
    next_id: u64,
    pixel_ratio: f32,
}

impl Default for SegmentLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentLayout {
    /// Create an empty layout with a pixel ratio of 1 px/cm.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
            pixel_ratio: 1.0,
        }
    }

    /// Current pixel ratio (px per cm).
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Number of placed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no entries are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a new entry, keeping the order ascending by `left`.
    ///
    /// The entry is spliced before the first entry whose left edge is at or
    /// beyond the new one, or appended if there is none.
    pub fn insert(
        &mut self,
        segment: SegmentId,
        left: f32,
        width: f32,
        is_connector: bool,
    ) -> EntryId {
        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            PlacedEntry {
                id,
                segment,
                left,
                width,
                is_connector,
            },
        );
        let at = self.insertion_index(left);
        self.order.insert(at, id);
        id
    }

    /// Remove an entry. Unknown ids are a no-op returning `None`.
    pub fn remove(&mut self, id: EntryId) -> Option<PlacedEntry> {
        let entry = self.entries.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(entry)
    }

    /// Reposition an entry after a committed drag and restore the order.
    ///
    /// This is the explicit command the editor issues instead of the entry
    /// reporting its own movement. Returns `false` for unknown ids.
    pub fn apply_drag_result(&mut self, id: EntryId, new_left: f32) -> bool {
        if !self.entries.contains_key(&id) {
            return false;
        }
        self.order.retain(|other| *other != id);
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.left = new_left;
        }
        let at = self.insertion_index(new_left);
        self.order.insert(at, id);
        true
    }

    /// Apply a committed resize and restore the order. Returns `false` for
    /// unknown ids.
    pub fn apply_resize_result(&mut self, id: EntryId, new_left: f32, new_width: f32) -> bool {
        if !self.entries.contains_key(&id) {
            return false;
        }
        self.order.retain(|other| *other != id);
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.left = new_left;
            entry.width = new_width;
        }
        let at = self.insertion_index(new_left);
        self.order.insert(at, id);
        true
    }

    /// Maximum widths for resizing an entry toward either side.
    ///
    /// The left handle may grow until the previous entry's right edge (or
    /// the container's left edge), the right handle until the next entry's
    /// left edge (or the container's right edge).
    #[must_use]
    pub fn resize_limits(&self, id: EntryId, container_width: f32) -> Option<ResizeLimits> {
        let index = self.order.iter().position(|other| *other == id)?;
        let entry = self.entries.get(&id)?;

        let space_left = match index.checked_sub(1).and_then(|i| self.entry_at(i)) {
            Some(prev) => entry.left - prev.right(),
            None => entry.left,
        };
        let space_right = match self.entry_at(index + 1) {
            Some(next) => next.left - entry.right(),
            None => container_width - entry.right(),
        };

        Some(ResizeLimits {
            max_width_left: space_left + entry.width,
            max_width_right: space_right + entry.width,
        })
    }

    /// Get the entry at a position in the order. Out-of-range indices
    /// return `None`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&PlacedEntry> {
        self.entry_at(index)
    }

    /// Look up an entry by id. Unknown ids return `None`.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&PlacedEntry> {
        self.entries.get(&id)
    }

    /// Find the entry placing a given segment.
    #[must_use]
    pub fn entry_for_segment(&self, segment: SegmentId) -> Option<EntryId> {
        self.order
            .iter()
            .find(|id| {
                self.entries
                    .get(id)
                    .is_some_and(|entry| entry.segment == segment)
            })
            .copied()
    }

    /// First entry in placement order.
    #[must_use]
    pub fn first(&self) -> Option<&PlacedEntry> {
        self.entry_at(0)
    }

    /// Last entry in placement order.
    #[must_use]
    pub fn last(&self) -> Option<&PlacedEntry> {
        self.order.len().checked_sub(1).and_then(|i| self.entry_at(i))
    }

    /// Iterate over entries in ascending-`left` order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedEntry> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Rescale every entry by `new_ratio / old_ratio` and adopt the new
    /// pixel ratio. Must be called on any zoom or street-width change.
    pub fn change_scale(&mut self, new_pixel_ratio: f32) {
        if new_pixel_ratio <= 0.0 || self.pixel_ratio <= 0.0 {
            return;
        }
        let factor = new_pixel_ratio / self.pixel_ratio;
        self.pixel_ratio = new_pixel_ratio;
        for entry in self.entries.values_mut() {
            entry.left *= factor;
            entry.width *= factor;
        }
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn entry_at(&self, index: usize) -> Option<&PlacedEntry> {
        self.order.get(index).and_then(|id| self.entries.get(id))
    }

    /// Index of the first entry whose left edge is at or beyond `left`.
    fn insertion_index(&self, left: f32) -> usize {
        self.order.partition_point(|id| {
            self.entries
                .get(id)
                .is_some_and(|entry| entry.left < left)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segment_id(n: u64) -> SegmentId {
        SegmentId::new(n)
    }

    fn lefts(layout: &SegmentLayout) -> Vec<f32> {
        layout.iter().map(|e| e.left).collect()
    }

    fn is_sorted(layout: &SegmentLayout) -> bool {
        lefts(layout).windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut layout = SegmentLayout::new();
        layout.insert(segment_id(0), 300.0, 100.0, false);
        layout.insert(segment_id(1), 0.0, 200.0, false);
        layout.insert(segment_id(2), 550.0, 50.0, false);
        layout.insert(segment_id(3), 210.0, 80.0, false);

        assert_eq!(lefts(&layout), vec![0.0, 210.0, 300.0, 550.0]);
    }

    #[test]
    fn test_insert_into_empty_becomes_sole_entry() {
        let mut layout = SegmentLayout::new();
        let id = layout.insert(segment_id(0), 120.0, 60.0, false);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.first().map(|e| e.id), Some(id));
        assert_eq!(layout.last().map(|e| e.id), Some(id));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut layout = SegmentLayout::new();
        layout.insert(segment_id(0), 0.0, 100.0, false);
        assert!(layout.remove(EntryId::new(999)).is_none());
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn test_remove_then_lookup_misses() {
        let mut layout = SegmentLayout::new();
        let id = layout.insert(segment_id(0), 0.0, 100.0, false);
        let removed = layout.remove(id).expect("present");
        assert_eq!(removed.width, 100.0);
        assert!(layout.get(id).is_none());
        assert!(layout.at(0).is_none());
    }

    #[test]
    fn test_apply_drag_result_resorts() {
        let mut layout = SegmentLayout::new();
        let a = layout.insert(segment_id(0), 0.0, 100.0, false);
        layout.insert(segment_id(1), 200.0, 100.0, false);
        layout.insert(segment_id(2), 400.0, 100.0, false);

        assert!(layout.apply_drag_result(a, 600.0));
        assert_eq!(lefts(&layout), vec![200.0, 400.0, 600.0]);
        assert_eq!(layout.last().map(|e| e.id), Some(a));
    }

    #[test]
    fn test_apply_drag_result_unknown_id() {
        let mut layout = SegmentLayout::new();
        assert!(!layout.apply_drag_result(EntryId::new(7), 100.0));
    }

    #[test]
    fn test_apply_resize_result() {
        let mut layout = SegmentLayout::new();
        let a = layout.insert(segment_id(0), 100.0, 100.0, false);
        assert!(layout.apply_resize_result(a, 80.0, 140.0));
        let entry = layout.get(a).expect("present");
        assert_eq!(entry.left, 80.0);
        assert_eq!(entry.width, 140.0);
    }

    #[test]
    fn test_resize_limits_between_neighbors() {
        let mut layout = SegmentLayout::new();
        layout.insert(segment_id(0), 0.0, 200.0, false);
        let mid = layout.insert(segment_id(1), 300.0, 100.0, false);
        layout.insert(segment_id(2), 500.0, 100.0, false);

        let limits = layout.resize_limits(mid, 1000.0).expect("present");
        // 100 px of space to the previous entry, 100 px to the next
        assert_eq!(limits.max_width_left, 200.0);
        assert_eq!(limits.max_width_right, 200.0);
    }

    #[test]
    fn test_resize_limits_at_edges() {
        let mut layout = SegmentLayout::new();
        let only = layout.insert(segment_id(0), 150.0, 100.0, false);
        let limits = layout.resize_limits(only, 1000.0).expect("present");
        assert_eq!(limits.max_width_left, 250.0);
        assert_eq!(limits.max_width_right, 850.0);
    }

    #[test]
    fn test_at_and_get() {
        let mut layout = SegmentLayout::new();
        let id = layout.insert(segment_id(4), 10.0, 20.0, false);
        assert_eq!(layout.at(0).map(|e| e.id), Some(id));
        assert!(layout.at(1).is_none());
        assert_eq!(layout.get(id).map(|e| e.segment), Some(segment_id(4)));
    }

    #[test]
    fn test_entry_for_segment() {
        let mut layout = SegmentLayout::new();
        layout.insert(segment_id(1), 0.0, 50.0, false);
        let id = layout.insert(segment_id(2), 100.0, 50.0, false);
        assert_eq!(layout.entry_for_segment(segment_id(2)), Some(id));
        assert!(layout.entry_for_segment(segment_id(9)).is_none());
    }

    #[test]
    fn test_change_scale_rescales_geometry() {
        let mut layout = SegmentLayout::new();
        let a = layout.insert(segment_id(0), 100.0, 200.0, false);
        layout.change_scale(2.0);

        let entry = layout.get(a).expect("present");
        assert_eq!(entry.left, 200.0);
        assert_eq!(entry.width, 400.0);
        assert_eq!(layout.pixel_ratio(), 2.0);
    }

    #[test]
    fn test_clear() {
        let mut layout = SegmentLayout::new();
        layout.insert(segment_id(0), 0.0, 10.0, false);
        layout.insert(segment_id(1), 20.0, 10.0, false);
        layout.clear();
        assert!(layout.is_empty());
        assert!(layout.first().is_none());
    }

    proptest! {
        #[test]
        fn prop_order_stays_sorted(ops in proptest::collection::vec((0.0f32..1000.0, 1.0f32..100.0, proptest::bool::ANY), 1..40)) {
            let mut layout = SegmentLayout::new();
            let mut ids = Vec::new();
            for (i, (left, width, remove_one)) in ops.into_iter().enumerate() {
                let id = layout.insert(segment_id(i as u64), left, width, false);
                ids.push(id);
                if remove_one && ids.len() > 1 {
                    let victim = ids.remove(ids.len() / 2);
                    layout.remove(victim);
                }
                prop_assert!(is_sorted(&layout));
            }
        }

        #[test]
        fn prop_drag_result_preserves_order(lefts_in in proptest::collection::vec(0.0f32..1000.0, 2..20), target in 0.0f32..1000.0) {
            let mut layout = SegmentLayout::new();
            let mut ids = Vec::new();
            for (i, left) in lefts_in.iter().enumerate() {
                ids.push(layout.insert(segment_id(i as u64), *left, 10.0, false));
            }
            layout.apply_drag_result(ids[0], target);
            prop_assert!(is_sorted(&layout));
            prop_assert_eq!(layout.len(), ids.len());
        }

        #[test]
        fn prop_change_scale_roundtrip(lefts_in in proptest::collection::vec(0.0f32..1000.0, 1..20), ratio in 0.1f32..10.0) {
            let mut layout = SegmentLayout::new();
            for (i, left) in lefts_in.iter().enumerate() {
                layout.insert(segment_id(i as u64), *left, 50.0, false);
            }
            let before = lefts(&layout);
            layout.change_scale(ratio);
            layout.change_scale(1.0);
            let after = lefts(&layout);
            for (b, a) in before.iter().zip(after.iter()) {
                prop_assert!((b - a).abs() < 0.01, "left drifted: {} vs {}", b, a);
            }
        }
    }
}
