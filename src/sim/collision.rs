//! Axis-aligned collision geometry
//!
//! Every entity in the playfield is an axis-aligned box, so overlap testing
//! is a pair of half-open interval checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Build a rectangle, clamping NaN positions to zero and NaN/negative sizes to zero
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        let extent = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };

        let valid_pos = x.is_finite() && y.is_finite();
        let valid_size = w.is_finite() && w >= 0.0 && h.is_finite() && h >= 0.0;
        if !valid_pos || !valid_size {
            log::warn!("Clamping invalid rect ({}, {}, {}, {})", x, y, w, h);
        }

        Self {
            pos: Vec2::new(finite(x), finite(y)),
            size: Vec2::new(extent(w), extent(h)),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal center
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Check whether two rectangles overlap
///
/// Edges that merely touch do not count as overlap.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 4.0, 10.0);
        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn test_invalid_dimensions_are_clamped() {
        let r = Rect::new(f32::NAN, 3.0, -5.0, f32::INFINITY);
        assert_eq!(r.pos, Vec2::new(0.0, 3.0));
        assert_eq!(r.size, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..100.0, ah in 0.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..100.0, bh in 0.0f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn adjacent_rects_never_overlap(
            x in -100.0f32..100.0, y in -100.0f32..100.0,
            w in 0.0f32..50.0, h in 1.0f32..50.0, w2 in 0.0f32..50.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let b = Rect::new(a.right(), y, w2, h);
            prop_assert!(!intersects(&a, &b));
        }
    }
}
