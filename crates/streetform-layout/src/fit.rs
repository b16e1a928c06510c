//! The collision query: can a candidate placement be committed?
//!
//! `does_fit` is a pure function of the layout, the candidate and the
//! container geometry. It never mutates anything; rejection surfaces as
//! `fits == false`, not as an error.

use crate::list::{EntryId, SegmentLayout};
use serde::{Deserialize, Serialize};
use streetform_core::Viewport;

/// Two neighbors count as touching when their boundary gap is at most this
/// many pixels; only there may a connector be placed.
pub const TOUCH_TOLERANCE: f32 = 1.0;

/// A candidate placement to test against the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitCandidate {
    /// Left edge in pixels
    pub left: f32,
    /// Width in pixels
    pub width: f32,
    /// The entry being repositioned, if any; it is skipped during the walk
    pub entry: Option<EntryId>,
    /// Whether the candidate is a coupling element
    pub is_connector: bool,
}

impl FitCandidate {
    /// Candidate for a fresh element at the given position.
    #[must_use]
    pub const fn new(left: f32, width: f32) -> Self {
        Self {
            left,
            width,
            entry: None,
            is_connector: false,
        }
    }

    /// Skip the given entry during the walk (repositioning an existing one).
    #[must_use]
    pub const fn repositioning(mut self, entry: EntryId) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Mark the candidate as a coupling element.
    #[must_use]
    pub const fn connector(mut self, is_connector: bool) -> Self {
        self.is_connector = is_connector;
        self
    }

    /// Right edge in pixels.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Outcome of a collision query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Whether the candidate can be committed at this position
    pub fits: bool,
    /// Distance to the neighbor (or container edge) on the left, in pixels
    pub left_gap: f32,
    /// Distance to the neighbor (or container edge) on the right, in pixels
    pub right_gap: f32,
}

impl FitResult {
    const BLOCKED: Self = Self {
        fits: false,
        left_gap: 0.0,
        right_gap: 0.0,
    };
}

/// One node of the gap walk: a placed entry or the left-edge sentinel.
#[derive(Debug, Clone, Copy)]
struct WalkNode {
    left: f32,
    right: f32,
    id: Option<EntryId>,
    is_connector: bool,
}

/// Test whether a candidate fits into the layout without overlap.
///
/// The walk runs over consecutive pairs (cur, next) of placed entries,
/// prefixed by a zero-width sentinel for the container's left edge; the
/// container's right edge stands in when there is no successor. The
/// candidate's own entry is invisible to the walk, and one connector per
/// side is skipped over since a connector neither blocks nor counts as a
/// neighbor.
///
/// A regular candidate fits into the unique gap containing its left edge if
/// its right edge stays clear of the next neighbor. A connector candidate
/// fits only onto a boundary whose neighbors effectively touch (within
/// [`TOUCH_TOLERANCE`]) and which no other connector already occupies.
#[must_use]
pub fn does_fit(layout: &SegmentLayout, candidate: FitCandidate, viewport: Viewport) -> FitResult {
    if candidate.width <= 0.0 {
        return FitResult::BLOCKED;
    }
    let right = candidate.right();

    if layout.is_empty() {
        if candidate.width <= viewport.width {
            return FitResult {
                fits: true,
                left_gap: candidate.left,
                right_gap: viewport.width - right,
            };
        }
        return FitResult::BLOCKED;
    }

    // Left-edge sentinel first, then the placed entries in order.
    let mut nodes = Vec::with_capacity(layout.len() + 1);
    nodes.push(WalkNode {
        left: 0.0,
        right: 0.0,
        id: None,
        is_connector: false,
    });
    nodes.extend(layout.iter().map(|entry| WalkNode {
        left: entry.left,
        right: entry.right(),
        id: Some(entry.id),
        is_connector: entry.is_connector,
    }));

    let is_own = |node: &WalkNode| node.id.is_some() && node.id == candidate.entry;

    let mut result = FitResult::BLOCKED;
    for (index, cur) in nodes.iter().enumerate() {
        if is_own(cur) || cur.is_connector {
            continue;
        }

        // Resolve the effective successor: skip one connector, the
        // candidate's own entry, and one more connector on the far side.
        let mut next = index + 1;
        if nodes.get(next).is_some_and(|n| n.is_connector) {
            next += 1;
        }
        if nodes.get(next).is_some_and(is_own) {
            next += 1;
        }
        if nodes.get(next).is_some_and(|n| n.is_connector) {
            next += 1;
        }
        let next_left = nodes.get(next).map_or(viewport.width, |n| n.left);

        if !candidate.is_connector {
            if candidate.left >= cur.right && candidate.left < next_left {
                result.fits = right <= next_left;
                result.left_gap = candidate.left - cur.right;
                result.right_gap = next_left - right;
                // the order is sorted, no later pair can match
                break;
            }
        } else if right >= cur.right && candidate.left <= next_left {
            let touching = (next_left - cur.right).abs() <= TOUCH_TOLERANCE;
            let occupied = boundary_has_connector(&nodes, index + 1, next, candidate.entry);
            if touching && !occupied {
                result.fits = true;
                result.left_gap = (candidate.left - cur.right) / 2.0;
                result.right_gap = (next_left - right) / 2.0;
            }
        }
    }

    result
}

/// Whether a connector other than the candidate's own entry sits between
/// the walk positions `from..to` (the nodes skipped while resolving the
/// successor). Two connectors may never share a boundary.
fn boundary_has_connector(
    nodes: &[WalkNode],
    from: usize,
    to: usize,
    own: Option<EntryId>,
) -> bool {
    nodes[from..to.min(nodes.len())]
        .iter()
        .any(|node| node.is_connector && node.id != own)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentId;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 200.0);

    fn layout_with(entries: &[(f32, f32)]) -> SegmentLayout {
        let mut layout = SegmentLayout::new();
        for (i, (left, width)) in entries.iter().enumerate() {
            layout.insert(SegmentId::new(i as u64), *left, *width, false);
        }
        layout
    }

    #[test]
    fn test_empty_layout_fits_within_container() {
        let layout = SegmentLayout::new();
        let result = does_fit(&layout, FitCandidate::new(100.0, 200.0), VIEWPORT);
        assert!(result.fits);
        assert_eq!(result.left_gap, 100.0);
        assert_eq!(result.right_gap, 700.0);
    }

    #[test]
    fn test_empty_layout_rejects_oversized() {
        let layout = SegmentLayout::new();
        let result = does_fit(&layout, FitCandidate::new(0.0, 1200.0), VIEWPORT);
        assert!(!result.fits);
    }

    #[test]
    fn test_degenerate_width_never_fits() {
        let layout = SegmentLayout::new();
        assert!(!does_fit(&layout, FitCandidate::new(0.0, 0.0), VIEWPORT).fits);
        assert!(!does_fit(&layout, FitCandidate::new(0.0, -10.0), VIEWPORT).fits);
    }

    #[test]
    fn test_fits_into_gap_between_entries() {
        let layout = layout_with(&[(0.0, 200.0), (300.0, 200.0)]);
        let result = does_fit(&layout, FitCandidate::new(220.0, 60.0), VIEWPORT);
        assert!(result.fits);
        assert_eq!(result.left_gap, 20.0);
        assert_eq!(result.right_gap, 20.0);
    }

    #[test]
    fn test_rejects_overflowing_gap() {
        let layout = layout_with(&[(0.0, 200.0), (300.0, 200.0)]);
        let result = does_fit(&layout, FitCandidate::new(220.0, 100.0), VIEWPORT);
        assert!(!result.fits);
        // gaps still reported for snapping
        assert_eq!(result.left_gap, 20.0);
        assert_eq!(result.right_gap, -20.0);
    }

    #[test]
    fn test_gap_arithmetic_adds_up() {
        let layout = layout_with(&[(0.0, 200.0), (500.0, 100.0)]);
        // gap is [200, 500), width 300
        let candidate = FitCandidate::new(250.0, 120.0);
        let result = does_fit(&layout, candidate, VIEWPORT);
        assert!(result.fits);
        assert!((result.left_gap + result.right_gap + candidate.width - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_fits_after_last_entry() {
        let layout = layout_with(&[(0.0, 200.0)]);
        let result = does_fit(&layout, FitCandidate::new(800.0, 150.0), VIEWPORT);
        assert!(result.fits);
        assert_eq!(result.left_gap, 600.0);
        assert_eq!(result.right_gap, 50.0);
    }

    #[test]
    fn test_rejects_candidate_poking_past_container() {
        let layout = layout_with(&[(0.0, 200.0)]);
        let result = does_fit(&layout, FitCandidate::new(900.0, 150.0), VIEWPORT);
        assert!(!result.fits);
        assert_eq!(result.right_gap, -50.0);
    }

    #[test]
    fn test_repositioned_entry_skips_itself() {
        let mut layout = SegmentLayout::new();
        let own = layout.insert(SegmentId::new(0), 100.0, 200.0, false);
        layout.insert(SegmentId::new(1), 400.0, 100.0, false);

        // moving slightly within its own footprint must not collide with itself
        let candidate = FitCandidate::new(150.0, 200.0).repositioning(own);
        let result = does_fit(&layout, candidate, VIEWPORT);
        assert!(result.fits);
    }

    #[test]
    fn test_connector_fits_on_touching_boundary() {
        let mut layout = SegmentLayout::new();
        layout.insert(SegmentId::new(0), 0.0, 500.0, false);
        layout.insert(SegmentId::new(1), 501.0, 200.0, false);

        let candidate = FitCandidate::new(495.0, 10.0).connector(true);
        let result = does_fit(&layout, candidate, VIEWPORT);
        assert!(result.fits);
    }

    #[test]
    fn test_connector_rejected_on_open_gap() {
        let mut layout = SegmentLayout::new();
        layout.insert(SegmentId::new(0), 0.0, 500.0, false);
        layout.insert(SegmentId::new(1), 510.0, 200.0, false);

        let candidate = FitCandidate::new(495.0, 10.0).connector(true);
        assert!(!does_fit(&layout, candidate, VIEWPORT).fits);
    }

    #[test]
    fn test_connector_gaps_are_half_residual() {
        let mut layout = SegmentLayout::new();
        layout.insert(SegmentId::new(0), 0.0, 500.0, false);
        layout.insert(SegmentId::new(1), 500.5, 200.0, false);

        let candidate = FitCandidate::new(496.0, 10.0).connector(true);
        let result = does_fit(&layout, candidate, VIEWPORT);
        assert!(result.fits);
        assert!((result.left_gap - (496.0 - 500.0) / 2.0).abs() < 0.001);
        assert!((result.right_gap - (500.5 - 506.0) / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_second_connector_on_same_boundary_rejected() {
        let mut layout = SegmentLayout::new();
        layout.insert(SegmentId::new(0), 0.0, 500.0, false);
        layout.insert(SegmentId::new(1), 500.0, 4.0, true);
        layout.insert(SegmentId::new(2), 500.5, 200.0, false);

        let candidate = FitCandidate::new(498.0, 6.0).connector(true);
        assert!(!does_fit(&layout, candidate, VIEWPORT).fits);
    }

    #[test]
    fn test_repositioning_connector_on_own_boundary_allowed() {
        let mut layout = SegmentLayout::new();
        layout.insert(SegmentId::new(0), 0.0, 500.0, false);
        let own = layout.insert(SegmentId::new(1), 500.0, 4.0, true);
        layout.insert(SegmentId::new(2), 500.5, 200.0, false);

        let candidate = FitCandidate::new(498.0, 6.0)
            .connector(true)
            .repositioning(own);
        assert!(does_fit(&layout, candidate, VIEWPORT).fits);
    }

    #[test]
    fn test_connector_between_entries_does_not_block_fit() {
        let mut layout = SegmentLayout::new();
        layout.insert(SegmentId::new(0), 0.0, 200.0, false);
        layout.insert(SegmentId::new(1), 200.0, 2.0, true);
        layout.insert(SegmentId::new(2), 201.0, 200.0, false);

        // the gap after the second real entry is what counts
        let result = does_fit(&layout, FitCandidate::new(500.0, 100.0), VIEWPORT);
        assert!(result.fits);
        assert_eq!(result.left_gap, 500.0 - 401.0);
    }

    #[test]
    fn test_connector_fits_in_empty_layout() {
        let layout = SegmentLayout::new();
        let result = does_fit(&layout, FitCandidate::new(10.0, 5.0).connector(true), VIEWPORT);
        assert!(result.fits);
    }
}
