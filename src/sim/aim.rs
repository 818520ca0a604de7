//! Pull-back-to-shoot aiming
//!
//! A press near the ball anchors the gesture at the ball center. The shot
//! goes opposite to the drag: velocity points from the pointer back through
//! the anchor, scaled by pull length and capped at the max power.

use glam::Vec2;
use serde::Serialize;

use crate::consts::AIM_PREVIEW_SCALE;
use crate::{cartesian_to_polar, polar_to_cartesian};
use crate::tuning::Tuning;

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Ball center at press time
    pub anchor: Vec2,
    /// Latest pointer position
    pub current: Vec2,
}

impl DragGesture {
    /// Vector from the pointer back to the anchor (the shot direction)
    #[inline]
    pub fn pull(&self) -> Vec2 {
        self.anchor - self.current
    }
}

/// A committed shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub velocity: Vec2,
    pub power: f32,
}

/// Aim line data for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AimPreview {
    pub pull: Vec2,
    /// Clamped shot speed
    pub power: f32,
    /// Power as 0-100 of max
    pub percent: f32,
    /// End of the dotted aim line
    pub tip: Vec2,
}

/// Clamped shot speed for a pull length
#[inline]
pub fn shot_power(pull_len: f32, tuning: &Tuning) -> f32 {
    (pull_len * tuning.power_multiplier).min(tuning.max_power)
}

/// Tracks at most one drag gesture
#[derive(Debug, Clone, Default)]
pub struct AimController {
    gesture: Option<DragGesture>,
}

impl AimController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        self.gesture.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a gesture if `point` is within pickup range of the ball.
    /// Returns whether the press was accepted.
    pub fn press(&mut self, point: Vec2, ball_pos: Vec2, tuning: &Tuning) -> bool {
        if point.distance_squared(ball_pos) < tuning.pickup_radius_sq() {
            self.gesture = Some(DragGesture {
                anchor: ball_pos,
                current: point,
            });
            true
        } else {
            false
        }
    }

    pub fn drag(&mut self, point: Vec2) {
        if let Some(gesture) = &mut self.gesture {
            gesture.current = point;
        }
    }

    /// End the gesture. Returns a shot unless the pull was too short.
    pub fn release(&mut self, tuning: &Tuning) -> Option<Shot> {
        let gesture = self.gesture.take()?;
        let (pull_len, angle) = cartesian_to_polar(gesture.pull());
        if pull_len <= tuning.min_pull {
            log::debug!("Aim discarded, pull {:.2} below {}", pull_len, tuning.min_pull);
            return None;
        }

        let power = shot_power(pull_len, tuning);
        Some(Shot {
            velocity: polar_to_cartesian(power, angle),
            power,
        })
    }

    /// Drop the gesture without shooting
    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    /// Current clamped power, zero when idle
    pub fn power(&self, tuning: &Tuning) -> f32 {
        self.gesture
            .map(|g| shot_power(g.pull().length(), tuning))
            .unwrap_or(0.0)
    }

    /// Power meter reading in 0..=100
    pub fn power_percent(&self, tuning: &Tuning) -> f32 {
        self.power(tuning) / tuning.max_power * 100.0
    }

    /// Aim line from the ball along the pull, shortened once power is capped
    pub fn preview(&self, ball_pos: Vec2, tuning: &Tuning) -> Option<AimPreview> {
        let gesture = self.gesture?;
        let pull = gesture.pull();
        let raw = pull.length() * tuning.power_multiplier;
        let power = shot_power(pull.length(), tuning);
        let scale = if raw > 0.0 { power / raw } else { power };
        Some(AimPreview {
            pull,
            power,
            percent: power / tuning.max_power * 100.0,
            tip: ball_pos + pull * scale * AIM_PREVIEW_SCALE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_press_anchors_at_ball_center() {
        let mut aim = AimController::new();
        let ball = Vec2::new(100.0, 300.0);
        assert!(aim.press(Vec2::new(110.0, 305.0), ball, &tuning()));
        let g = aim.gesture().unwrap();
        assert_eq!(g.anchor, ball);
        assert_eq!(g.current, Vec2::new(110.0, 305.0));
    }

    #[test]
    fn test_press_far_from_ball_ignored() {
        let mut aim = AimController::new();
        assert!(!aim.press(Vec2::new(200.0, 300.0), Vec2::new(100.0, 300.0), &tuning()));
        assert!(!aim.is_active());
        // Exactly on the pickup radius is outside
        assert!(!aim.press(Vec2::new(150.0, 300.0), Vec2::new(100.0, 300.0), &tuning()));
    }

    #[test]
    fn test_pull_left_shoots_right() {
        let mut aim = AimController::new();
        let ball = Vec2::new(100.0, 300.0);
        aim.press(ball, ball, &tuning());
        aim.drag(Vec2::new(50.0, 300.0));
        let shot = aim.release(&tuning()).unwrap();
        assert!((shot.velocity.x - 7.5).abs() < 1e-4);
        assert!(shot.velocity.y.abs() < 1e-4);
        assert!((shot.power - 7.5).abs() < 1e-4);
        assert!(!aim.is_active());
    }

    #[test]
    fn test_power_is_capped() {
        let mut aim = AimController::new();
        let ball = Vec2::new(400.0, 300.0);
        aim.press(ball, ball, &tuning());
        aim.drag(Vec2::new(400.0, 0.0));
        assert_eq!(aim.power(&tuning()), 15.0);
        assert_eq!(aim.power_percent(&tuning()), 100.0);
        let shot = aim.release(&tuning()).unwrap();
        assert!((shot.velocity - Vec2::new(0.0, 15.0)).length() < 1e-4);
    }

    #[test]
    fn test_short_pull_discarded() {
        let mut aim = AimController::new();
        let ball = Vec2::new(100.0, 300.0);
        aim.press(ball, ball, &tuning());
        aim.drag(Vec2::new(97.0, 300.0));
        assert!(aim.release(&tuning()).is_none());
        assert!(!aim.is_active());
    }

    #[test]
    fn test_idle_power_is_zero() {
        let aim = AimController::new();
        assert_eq!(aim.power(&tuning()), 0.0);
        assert!(aim.preview(Vec2::ZERO, &tuning()).is_none());
    }

    #[test]
    fn test_release_without_gesture() {
        let mut aim = AimController::new();
        aim.drag(Vec2::new(1.0, 1.0));
        assert!(aim.release(&tuning()).is_none());
    }

    #[test]
    fn test_preview_tip_clamped() {
        let mut aim = AimController::new();
        let ball = Vec2::new(0.0, 0.0);
        aim.press(ball, ball, &tuning());
        // Pull of 200 -> raw 30, capped at 15, scale 0.5
        aim.drag(Vec2::new(-200.0, 0.0));
        let preview = aim.preview(ball, &tuning()).unwrap();
        assert_eq!(preview.pull, Vec2::new(200.0, 0.0));
        assert!((preview.tip.x - 500.0).abs() < 1e-3);
        assert_eq!(preview.percent, 100.0);
    }
}
