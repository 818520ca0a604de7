//! Collision detection and response against axis-aligned walls
//!
//! Circle-vs-rectangle: clamp the ball center onto the rectangle to find the
//! contact point, push the ball out along the contact normal, and reflect the
//! velocity if the ball is heading into the surface.

use glam::Vec2;

use super::geometry::Rect;
use super::state::Ball;
use crate::level::{Material, Wall};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the rectangle to the ball center
    pub point: Vec2,
    /// Unit normal pointing from the surface toward the ball center
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// A bounce that should be heard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    /// Ball speed after the reflection
    pub speed: f32,
    pub material: Material,
}

/// Check overlap between a ball and a rectangle
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let delta = ball_pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq >= ball_radius * ball_radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 0.0 {
        delta / dist
    } else {
        // Center is inside the rectangle: push out along the dominant axis
        dominant_axis_normal(ball_pos, rect)
    };

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: ball_radius - dist,
    }
}

/// Axis normal for a point inside a rectangle, chosen by the larger offset
/// from the rectangle center. A zero offset pushes toward +x / +y.
fn dominant_axis_normal(p: Vec2, rect: &Rect) -> Vec2 {
    let offset = p - rect.center();
    let sign = |v: f32| if v < 0.0 { -1.0 } else { 1.0 };
    if offset.x.abs() > offset.y.abs() {
        Vec2::new(sign(offset.x), 0.0)
    } else {
        Vec2::new(0.0, sign(offset.y))
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Resolve one wall against the ball in place.
///
/// Always applies the positional correction on overlap. Velocity is only
/// reflected (and damped by `bounce`) when the ball moves into the surface;
/// resting contact is silent.
pub fn resolve_wall(ball: &mut Ball, wall: &Wall, bounce: f32) -> Option<WallHit> {
    let result = ball_rect_collision(ball.pos, ball.radius, &wall.rect);
    if !result.hit {
        return None;
    }

    ball.pos += result.normal * result.penetration;

    if ball.vel.dot(result.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, result.normal) * bounce;
        Some(WallHit {
            speed: ball.vel.length(),
            material: wall.material,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, 8.0);
        ball.vel = vel;
        ball.moving = true;
        ball
    }

    #[test]
    fn test_miss_when_clear() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let result = ball_rect_collision(Vec2::new(80.0, 120.0), 8.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_touching_exactly_is_not_a_hit() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let result = ball_rect_collision(Vec2::new(92.0, 120.0), 8.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_left_face_hit() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let result = ball_rect_collision(Vec2::new(95.0, 120.0), 8.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(-1.0, 0.0));
        assert!((result.penetration - 3.0).abs() < 1e-5);
        assert_eq!(result.point, Vec2::new(100.0, 120.0));
    }

    #[test]
    fn test_corner_hit_uses_diagonal_normal() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let result = ball_rect_collision(Vec2::new(96.0, 96.0), 8.0, &rect);
        assert!(result.hit);
        let expected = Vec2::new(-1.0, -1.0).normalize();
        assert!((result.normal - expected).length() < 1e-5);
    }

    #[test]
    fn test_inside_pushes_along_dominant_axis() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        // Right of center by 40, below by 2: x dominates
        let result = ball_rect_collision(Vec2::new(90.0, 12.0), 8.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(1.0, 0.0));
        assert_eq!(result.penetration, 8.0);

        // Above center more than sideways: y dominates, pushes up
        let rect = Rect::new(0.0, 0.0, 20.0, 100.0);
        let result = ball_rect_collision(Vec2::new(11.0, 10.0), 8.0, &rect);
        assert_eq!(result.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_resolve_bounces_and_damps() {
        let wall = Wall::new(100.0, 0.0, 20.0, 600.0, Material::Wood);
        let mut ball = ball_at(Vec2::new(95.0, 300.0), Vec2::new(10.0, 2.0));

        let hit = resolve_wall(&mut ball, &wall, 0.7).expect("should bounce");
        assert_eq!(hit.material, Material::Wood);
        assert!((ball.vel.x + 7.0).abs() < 1e-5);
        assert!((ball.vel.y - 1.4).abs() < 1e-5);
        assert!((hit.speed - ball.vel.length()).abs() < 1e-6);
        assert!((ball.pos.x - 92.0).abs() < 1e-4);
    }

    #[test]
    fn test_resolve_resting_contact_is_silent() {
        let wall = Wall::new(100.0, 0.0, 20.0, 600.0, Material::Stone);
        // Overlapping but already moving away
        let mut ball = ball_at(Vec2::new(95.0, 300.0), Vec2::new(-1.0, 0.0));
        assert!(resolve_wall(&mut ball, &wall, 0.7).is_none());
        assert_eq!(ball.vel, Vec2::new(-1.0, 0.0));
        // Still pushed out
        assert!((ball.pos.x - 92.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_bounce_dissipates_normal_speed(
            vx in 0.1f32..20.0,
            vy in -20.0f32..20.0,
            y in 50.0f32..550.0,
            depth in 0.5f32..7.5,
            bounce in 0.05f32..0.99,
        ) {
            let wall = Wall::new(100.0, 0.0, 20.0, 600.0, Material::Stone);
            let mut ball = ball_at(Vec2::new(100.0 - 8.0 + depth, y), Vec2::new(vx, vy));
            let normal = Vec2::new(-1.0, 0.0);
            let before = ball.vel.dot(normal).abs();

            prop_assert!(resolve_wall(&mut ball, &wall, bounce).is_some());
            let after = ball.vel.dot(normal).abs();
            prop_assert!(after < before);
            prop_assert!(ball.vel.dot(normal) > 0.0);
        }

        #[test]
        fn prop_overlap_is_pushed_out(
            x in 60.0f32..190.0,
            y in 60.0f32..190.0,
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            // Ball center outside the block, possibly overlapping it
            let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
            prop_assume!(!(x >= 100.0 && x <= 150.0 && y >= 100.0 && y <= 150.0));
            let wall = Wall { rect, material: Material::Wood };
            let mut ball = ball_at(Vec2::new(x, y), Vec2::new(vx, vy));

            resolve_wall(&mut ball, &wall, 0.7);
            let closest = rect.closest_point(ball.pos);
            prop_assert!((ball.pos - closest).length() >= ball.radius - 1e-3);
        }
    }
}
