//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::sim::Rect;

const OUTLINE_WIDTH: f64 = 1.0;

/// Draws onto an `HtmlCanvasElement` through its 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        Ok(Self { ctx })
    }

    fn trace(&self, points: &[Vec2]) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        true
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: &Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn stroke_rect(&mut self, rect: &Rect, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(OUTLINE_WIDTH);
        self.ctx.stroke_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_round_rect(&mut self, rect: &Rect, radius: f32, color: &str) {
        let (x, y) = (rect.left() as f64, rect.top() as f64);
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0);

        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        self.ctx.line_to(x + w - r, y);
        self.ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        self.ctx.line_to(x + w, y + h - r);
        self.ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        self.ctx.line_to(x + r, y + h);
        self.ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        self.ctx.line_to(x, y + r);
        self.ctx.quadratic_curve_to(x, y, x + r, y);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: &str) {
        if self.trace(points) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill();
        }
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: &str) {
        if self.trace(points) {
            self.ctx.set_stroke_style_str(color);
            self.ctx.set_line_width(OUTLINE_WIDTH);
            self.ctx.stroke();
        }
    }
}
