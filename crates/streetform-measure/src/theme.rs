//! Colors and text styles of the measurement overlay.

use serde::{Deserialize, Serialize};
use streetform_core::{Color, StrokeStyle, TextAlign, TextStyle};

/// Visual styling of the measurement overlay.
///
/// Defaults match the classic grey/black ruler with white label boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureTheme {
    /// Ruler baseline color
    pub baseline: Color,
    /// Tick mark color
    pub tick: Color,
    /// Minor grid line color in raster mode
    pub raster_minor: Color,
    /// Style of the numeric meter labels along the ruler
    pub tick_label: TextStyle,
    /// Style of the centered open-length label
    pub total_label: TextStyle,
    /// Stroke of the per-segment brackets and label boxes
    pub bracket: StrokeStyle,
    /// Fill of the size label boxes
    pub label_box_fill: Color,
    /// Style of the per-segment size labels
    pub segment_label: TextStyle,
    /// Color of gap brackets and gap label boxes
    pub gap: Color,
    /// Style of the gap size labels
    pub gap_label: TextStyle,
}

impl Default for MeasureTheme {
    fn default() -> Self {
        Self {
            baseline: Color::GREY,
            tick: Color::BLACK,
            raster_minor: Color::GREY,
            tick_label: TextStyle::new(8.0, Color::GREY),
            total_label: TextStyle::new(12.0, Color::GREY).align(TextAlign::Center),
            bracket: StrokeStyle::solid(Color::BLACK, 1.0),
            label_box_fill: Color::WHITE,
            segment_label: TextStyle::new(12.0, Color::BLACK)
                .bold(true)
                .align(TextAlign::Center),
            gap: Color::GREY,
            gap_label: TextStyle::new(12.0, Color::GREY)
                .bold(true)
                .align(TextAlign::Center),
        }
    }
}
