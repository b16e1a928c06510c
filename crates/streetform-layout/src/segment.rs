//! Segment records and the caller-side profile collection.
//!
//! All physical quantities are centimeters; conversion to pixels goes
//! through the layout's pixel ratio.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a segment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub u64);

impl SegmentId {
    /// Create a new segment ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A physical street-profile element placed along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Physical length in centimeters (> 0)
    pub size: f32,
    /// Physical start position in centimeters (>= 0)
    pub start_pos: f32,
    /// Immovable boundary element, excluded from the open street length
    pub fixed: bool,
    /// Near-zero-length coupling element that sits exactly between two
    /// touching neighbors
    pub is_connector: bool,
}

impl Segment {
    /// Create a movable segment of the given physical length.
    #[must_use]
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            start_pos: 0.0,
            fixed: false,
            is_connector: false,
        }
    }

    /// Set the physical start position.
    #[must_use]
    pub const fn at(mut self, start_pos: f32) -> Self {
        self.start_pos = start_pos;
        self
    }

    /// Mark as an immovable boundary element.
    #[must_use]
    pub const fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Mark as a coupling element.
    #[must_use]
    pub const fn connector(mut self, is_connector: bool) -> Self {
        self.is_connector = is_connector;
        self
    }

    /// Physical end position in centimeters.
    #[must_use]
    pub fn end_pos(&self) -> f32 {
        self.start_pos + self.size
    }
}

/// The collection of segment records making up one street profile.
///
/// The profile owns the records; the layout references them by id. It is
/// rebuilt from persisted data each session and holds no pixel state.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SegmentProfile {
    segments: HashMap<SegmentId, Segment>,
    next_id: u64,
}

impl SegmentProfile {
    /// Create an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a segment, returning its id.
    pub fn add(&mut self, segment: Segment) -> SegmentId {
        let id = SegmentId::new(self.next_id);
        self.next_id += 1;
        self.segments.insert(id, segment);
        id
    }

    /// Get a segment by id.
    #[must_use]
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// Get a mutable segment by id.
    pub fn get_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(&id)
    }

    /// Remove a segment. Unknown ids are a no-op returning `None`.
    pub fn remove(&mut self, id: SegmentId) -> Option<Segment> {
        self.segments.remove(&id)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the profile holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over all segments in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments.iter().map(|(id, segment)| (*id, segment))
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Physical street length covered by the profile: the largest end
    /// position over all segments, 0 when empty.
    #[must_use]
    pub fn street_size(&self) -> f32 {
        self.segments
            .values()
            .map(Segment::end_pos)
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_builder() {
        let s = Segment::new(200.0).at(350.0).fixed(true);
        assert_eq!(s.size, 200.0);
        assert_eq!(s.start_pos, 350.0);
        assert!(s.fixed);
        assert!(!s.is_connector);
        assert_eq!(s.end_pos(), 550.0);
    }

    #[test]
    fn test_profile_add_get_remove() {
        let mut profile = SegmentProfile::new();
        let id = profile.add(Segment::new(100.0));
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.get(id).map(|s| s.size), Some(100.0));

        assert!(profile.remove(id).is_some());
        assert!(profile.is_empty());
        // removing again is a no-op, not a fault
        assert!(profile.remove(id).is_none());
    }

    #[test]
    fn test_profile_ids_are_unique() {
        let mut profile = SegmentProfile::new();
        let a = profile.add(Segment::new(100.0));
        profile.remove(a);
        let b = profile.add(Segment::new(100.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_street_size_is_max_end_pos() {
        let mut profile = SegmentProfile::new();
        assert_eq!(profile.street_size(), 0.0);

        profile.add(Segment::new(200.0).at(0.0));
        profile.add(Segment::new(150.0).at(400.0));
        profile.add(Segment::new(100.0).at(250.0));
        assert_eq!(profile.street_size(), 550.0);
    }

    #[test]
    fn test_profile_serde_roundtrip() {
        let mut profile = SegmentProfile::new();
        profile.add(Segment::new(320.0).at(100.0).connector(false));
        let json = serde_json::to_string(&profile).expect("serialize");
        let back: SegmentProfile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.len(), 1);
        assert_eq!(back.street_size(), 420.0);
    }
}
