use crate::{
    color::Color,
    geometry::{LayoutDirection, Point, Rect},
};

pub mod raster;
pub mod term;

/// Per-corner radii for a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn uniform(radius: f32) -> Self {
        Self { top_left: radius, top_right: radius, bottom_right: radius, bottom_left: radius }
    }

    /// Round only the corner pair on the track-start side.
    pub fn leading(radius: f32, direction: LayoutDirection) -> Self {
        match direction {
            LayoutDirection::LeftToRight => Self { top_left: radius, bottom_left: radius, ..Self::default() },
            LayoutDirection::RightToLeft => Self { top_right: radius, bottom_right: radius, ..Self::default() },
        }
    }

    /// Round only the corner pair on the track-end side.
    pub fn trailing(radius: f32, direction: LayoutDirection) -> Self {
        Self::leading(radius, direction.flipped())
    }

    /// The same radii mirrored about a vertical axis.
    pub fn mirrored(self) -> Self {
        Self {
            top_left: self.top_right,
            top_right: self.top_left,
            bottom_right: self.bottom_left,
            bottom_left: self.bottom_right,
        }
    }
}

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRoundedRect { rect: Rect, radii: CornerRadii, color: Color },
    StrokePolyline { points: Vec<Point>, width: f32, color: Color },
}

/// The drawing surface a track shape renders into.
///
/// Polyline strokes are drawn with round caps and round joins.
pub trait Surface {
    fn fill_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color);
    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color);
}

/// A surface that records commands instead of producing pixels.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for CommandRecorder {
    fn fill_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color) {
        self.commands.push(DrawCommand::FillRoundedRect { rect, radii, color });
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokePolyline { points: points.to_vec(), width, color });
    }
}
