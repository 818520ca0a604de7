//! Axis-aligned rectangle geometry for walls and sand traps
//!
//! A rectangle is stored the way levels are authored: top-left corner plus
//! width and height, in level-space pixels (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle `{x, y, w, h}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Closest point on (or in) the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Open-interval containment: points on the border are outside
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    /// True if every coordinate is finite and the extents are positive
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite())
            && self.w > 0.0
            && self.h > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_outside() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(rect.closest_point(Vec2::new(0.0, 15.0)), Vec2::new(10.0, 15.0));
        assert_eq!(rect.closest_point(Vec2::new(50.0, 50.0)), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_closest_point_inside_is_identity() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let p = Vec2::new(12.0, 25.0);
        assert_eq!(rect.closest_point(p), p);
    }

    #[test]
    fn test_contains_strict_excludes_border() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_strict(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains_strict(Vec2::new(0.0, 5.0)));
        assert!(!rect.contains_strict(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_center() {
        let rect = Rect::new(380.0, 200.0, 40.0, 200.0);
        assert_eq!(rect.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_well_formed() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).is_well_formed());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 1.0).is_well_formed());
    }
}
