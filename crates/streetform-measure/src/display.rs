//! The measurement overlay.
//!
//! Paints a scaled ruler across the open street length and, in a lower
//! strip, a bracket with a size label for every placed segment plus a
//! secondary bracket for every gap wider than the tolerance. The whole
//! overlay is recomputed and repainted on every call; nothing is drawn
//! incrementally.

use crate::theme::MeasureTheme;
use streetform_core::{Canvas, Color, Point, Rect, Size, StrokeStyle, Viewport};
use streetform_layout::{PlacedEntry, SegmentLayout, SegmentProfile};

/// Physical distance between ruler ticks, in centimeters.
const TICK_STEP_CM: f32 = 10.0;

/// Every this many ticks, the tick grows and gets a meter numeral.
const MAJOR_TICK_EVERY: u32 = 10;

/// Vertical position of the ruler baseline.
const BASELINE_Y: f32 = 13.0;

/// Height of the lower info strip.
const INFO_STRIP_HEIGHT: f32 = 50.0;

/// Fixed dimensions of the size label boxes.
const LABEL_BOX: Size = Size::new(50.0, 20.0);

/// Renderer for the measurement overlay.
///
/// Holds only sizing state; segment data is read from the layout and the
/// profile on every draw.
#[derive(Debug, Clone)]
pub struct MeasureDisplay {
    street_size: f32,
    margin_top: f32,
    margin_bottom: f32,
    gap_tolerance: f32,
    show_raster: bool,
    canvas_size: Size,
    theme: MeasureTheme,
}

impl MeasureDisplay {
    /// Create a display for a street of the given physical length (cm).
    #[must_use]
    pub fn new(street_size: f32) -> Self {
        Self {
            street_size,
            margin_top: 0.0,
            margin_bottom: 0.0,
            gap_tolerance: 1.0,
            show_raster: false,
            canvas_size: Size::ZERO,
            theme: MeasureTheme::default(),
        }
    }

    /// Extend every tick into a full-height grid line (admin view).
    #[must_use]
    pub const fn show_raster(mut self, show: bool) -> Self {
        self.show_raster = show;
        self
    }

    /// Override the gap tolerance in pixels.
    #[must_use]
    pub const fn gap_tolerance(mut self, tolerance: f32) -> Self {
        self.gap_tolerance = tolerance;
        self
    }

    /// Override the theme.
    #[must_use]
    pub fn theme(mut self, theme: MeasureTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Current physical street length in centimeters.
    #[must_use]
    pub fn street_size(&self) -> f32 {
        self.street_size
    }

    /// Adopt a new physical street length (admin width change).
    pub fn set_street_size(&mut self, street_size: f32) {
        self.street_size = street_size;
    }

    /// Current canvas size in pixels.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Recompute the canvas dimensions from the container.
    ///
    /// Call before the first draw and after every container resize.
    pub fn resize(&mut self, viewport: Viewport) {
        self.canvas_size = Size::new(viewport.width, viewport.height);
    }

    /// Repaint the whole overlay from the current layout.
    pub fn draw(
        &self,
        layout: &SegmentLayout,
        profile: &SegmentProfile,
        canvas: &mut dyn Canvas,
    ) {
        self.draw_scaling_line(layout, profile, canvas);
        self.draw_info_line(layout, profile, canvas);
    }

    /// Upper ruler: baseline over the open street length, ticks every
    /// [`TICK_STEP_CM`], meter numerals at major ticks, centered total.
    fn draw_scaling_line(
        &self,
        layout: &SegmentLayout,
        profile: &SegmentProfile,
        canvas: &mut dyn Canvas,
    ) {
        let ratio = layout.pixel_ratio();
        let theme = &self.theme;

        canvas.clear(Rect::from_size(self.canvas_size));

        // fixed boundary entries at either extreme shrink the open length
        let is_fixed = |entry: &PlacedEntry| {
            profile
                .get(entry.segment)
                .is_some_and(|segment| segment.fixed)
        };
        let street_start = match layout.first() {
            Some(first) if is_fixed(first) => profile
                .get(first.segment)
                .map_or(0.0, |segment| segment.end_pos()),
            _ => 0.0,
        };
        let street_end = match layout.last() {
            Some(last) if is_fixed(last) => profile
                .get(last.segment)
                .map_or(self.street_size, |segment| segment.start_pos),
            _ => self.street_size,
        };
        let open_size = street_end - street_start;
        let middle = open_size / 2.0 + street_start;
        let y = self.margin_top + BASELINE_Y;

        canvas.draw_line(
            Point::new(street_start * ratio, y),
            Point::new(street_end * ratio, y),
            StrokeStyle::solid(theme.baseline, 1.0),
        );

        let mut index: u32 = 0;
        let mut x = street_start * ratio;
        let end_x = street_end * ratio + 1.0;
        while x <= end_x {
            let major = index % MAJOR_TICK_EVERY == 0;
            let length = if major { 8.0 } else { 4.0 };
            if major {
                canvas.draw_text(
                    &format!("{}", index / MAJOR_TICK_EVERY),
                    Point::new(x, y + 13.0),
                    &theme.tick_label,
                );
            }
            canvas.draw_line(
                Point::new(x, y),
                Point::new(x, y + length),
                StrokeStyle::solid(theme.tick, 1.0),
            );
            if self.show_raster {
                let color = if major { theme.tick } else { theme.raster_minor };
                canvas.draw_line(
                    Point::new(x, y),
                    Point::new(x, self.canvas_size.height - self.margin_bottom),
                    StrokeStyle::solid(color, 1.0),
                );
            }
            index += 1;
            x += TICK_STEP_CM * ratio;
        }

        canvas.draw_text(
            &format_meters(open_size),
            Point::new(middle * ratio, y - 2.0),
            &theme.total_label,
        );
    }

    /// Lower strip: per-segment brackets with size labels, plus gap
    /// brackets for openings wider than the tolerance. Connectors are
    /// skipped transparently; gap sizes come from the segment model, not
    /// from pixel geometry, so label values never drift with rounding.
    fn draw_info_line(
        &self,
        layout: &SegmentLayout,
        profile: &SegmentProfile,
        canvas: &mut dyn Canvas,
    ) {
        let ratio = layout.pixel_ratio();
        let theme = &self.theme;
        let origin_y = self.canvas_size.height - INFO_STRIP_HEIGHT;
        let y = origin_y + 12.5;

        canvas.clear(Rect::new(
            0.0,
            origin_y,
            self.canvas_size.width,
            INFO_STRIP_HEIGHT,
        ));

        let reals: Vec<&PlacedEntry> = layout
            .iter()
            .filter(|entry| !entry.is_connector)
            .collect();

        // walk pairs (cur, next); None on the left is the container's left
        // edge, None on the right its right edge
        for index in 0..=reals.len() {
            let cur = index.checked_sub(1).map(|i| reals[i]);
            let next = reals.get(index).copied();

            let (cur_left, cur_right) = cur.map_or((0.0, 0.0), |e| (e.left, e.right()));

            if let Some(entry) = cur {
                // bracket spanning the entry, with edge ticks
                canvas.draw_line(
                    Point::new(cur_left, y),
                    Point::new(cur_right, y),
                    theme.bracket.clone(),
                );
                canvas.draw_line(
                    Point::new(cur_left, y),
                    Point::new(cur_left, origin_y),
                    theme.bracket.clone(),
                );
                canvas.draw_line(
                    Point::new(cur_right, y),
                    Point::new(cur_right, origin_y),
                    theme.bracket.clone(),
                );

                if entry.width > 0.0 {
                    let middle = entry.left + entry.width / 2.0;
                    let size_cm = profile
                        .get(entry.segment)
                        .map_or_else(|| pixels_to_cm(entry.width, ratio), |s| s.size);
                    draw_label_box(
                        canvas,
                        Point::new(middle, y),
                        &format_meters(size_cm),
                        theme.label_box_fill,
                        theme.bracket.clone(),
                        &theme.segment_label,
                    );
                }
            }

            let next_left = next.map_or(self.canvas_size.width, |e| e.left);
            let gap_px = next_left - cur_right;
            if gap_px > self.gap_tolerance {
                // gap size from the segment model, not pixels
                let cur_end_cm = cur.map_or(0.0, |e| {
                    profile
                        .get(e.segment)
                        .map_or_else(|| pixels_to_cm(e.right(), ratio), |s| s.end_pos())
                });
                let next_start_cm = next.map_or(self.street_size, |e| {
                    profile
                        .get(e.segment)
                        .map_or_else(|| pixels_to_cm(e.left, ratio), |s| s.start_pos)
                });
                let gap_cm = next_start_cm - cur_end_cm;
                let middle = cur_right + gap_px / 2.0;
                let gap_stroke = StrokeStyle::solid(theme.gap, 1.0);

                canvas.draw_line(
                    Point::new(cur_right, y - 10.0),
                    Point::new(next_left, y - 10.0),
                    gap_stroke.clone(),
                );
                canvas.draw_line(
                    Point::new(middle, y - 10.0),
                    Point::new(middle, y + 5.0),
                    gap_stroke.clone(),
                );
                draw_label_box(
                    canvas,
                    Point::new(middle, y + 15.0),
                    &format_meters(gap_cm),
                    theme.label_box_fill,
                    gap_stroke,
                    &theme.gap_label,
                );
            }
        }
    }
}

/// A fixed-size, filled and stroked box centered on `center`, with the
/// label anchored at its middle.
fn draw_label_box(
    canvas: &mut dyn Canvas,
    center: Point,
    label: &str,
    fill: Color,
    stroke: StrokeStyle,
    text: &streetform_core::TextStyle,
) {
    let bounds = Rect::new(
        center.x - LABEL_BOX.width / 2.0,
        center.y - LABEL_BOX.height / 2.0,
        LABEL_BOX.width,
        LABEL_BOX.height,
    );
    canvas.fill_rect(bounds, fill);
    canvas.stroke_rect(bounds, stroke);
    canvas.draw_text(label, Point::new(center.x, center.y + 3.0), text);
}

/// Centimeters rendered as meters with two decimals.
fn format_meters(cm: f32) -> String {
    format!("{:.2} m", cm / 100.0)
}

fn pixels_to_cm(px: f32, ratio: f32) -> f32 {
    if ratio <= 0.0 {
        0.0
    } else {
        px / ratio
    }
}
