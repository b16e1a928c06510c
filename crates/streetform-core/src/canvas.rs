//! Canvas abstraction for overlay rendering.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle, TextStyle};
use crate::{Color, Point, Rect};

/// Drawing surface for the measurement overlay.
///
/// Backends implement this against a real 2D context; tests use
/// [`RecordingCanvas`] to inspect what was painted.
pub trait Canvas {
    /// Clear a region to transparent.
    fn clear(&mut self, region: Rect);

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, style: StrokeStyle);

    /// Draw text at an anchor position.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);
}

/// A `Canvas` implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (replay commands on another surface)
/// - Diffing (compare render outputs)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// All recorded text commands, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Count the recorded line commands.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, region: Rect) {
        self.commands.push(DrawCommand::Clear { region });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            style: BoxStyle::fill(color),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, style: StrokeStyle) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            style: BoxStyle::stroke(style),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, style: StrokeStyle) {
        self.commands.push(DrawCommand::Line { from, to, style });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }
}
