//! Rendering module
//!
//! The frame is expressed as a handful of 2D primitives against a
//! [`Surface`]. In the browser that is a canvas 2D context; tests and the
//! headless build record the commands in a [`DrawList`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use shapes::draw_frame;

use glam::Vec2;

use crate::sim::Rect;

/// A 2D drawing target. Colors are CSS color strings.
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, width: f32, height: f32, color: &str);
    fn fill_rect(&mut self, rect: &Rect, color: &str);
    fn stroke_rect(&mut self, rect: &Rect, color: &str);
    fn fill_round_rect(&mut self, rect: &Rect, radius: f32, color: &str);
    fn fill_polygon(&mut self, points: &[Vec2], color: &str);
    fn stroke_polygon(&mut self, points: &[Vec2], color: &str);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32, color: String },
    FillRect { rect: Rect, color: String },
    StrokeRect { rect: Rect, color: String },
    FillRoundRect { rect: Rect, radius: f32, color: String },
    FillPolygon { points: Vec<Vec2>, color: String },
    StrokePolygon { points: Vec<Vec2>, color: String },
}

/// Surface that records commands instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn with the given color
    pub fn count_color(&self, color: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| match c {
                DrawCommand::Clear { color: c, .. }
                | DrawCommand::FillRect { color: c, .. }
                | DrawCommand::StrokeRect { color: c, .. }
                | DrawCommand::FillRoundRect { color: c, .. }
                | DrawCommand::FillPolygon { color: c, .. }
                | DrawCommand::StrokePolygon { color: c, .. } => c == color,
            })
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, width: f32, height: f32, color: &str) {
        // A clear wipes everything drawn before it
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            width,
            height,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, rect: &Rect, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            rect: *rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: &Rect, color: &str) {
        self.commands.push(DrawCommand::StrokeRect {
            rect: *rect,
            color: color.to_string(),
        });
    }

    fn fill_round_rect(&mut self, rect: &Rect, radius: f32, color: &str) {
        self.commands.push(DrawCommand::FillRoundRect {
            rect: *rect,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: &str) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color: color.to_string(),
        });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: &str) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color: color.to_string(),
        });
    }
}
