//! Mini Golf - turn-based arcade golf physics
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball integration, collisions, hole capture, game phases)
//! - `level`: Hole layouts (walls, sand traps, hole, par) and course loading
//! - `tuning`: Data-driven physics constants
//! - `scorecard`: Host-side stroke aggregation

pub mod level;
pub mod scorecard;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use level::{Course, Hole, LevelData, LevelError, Material, SandTrap, Wall};
pub use scorecard::{HoleResult, ScoreCard};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Host frame step (one physics tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Level dimensions
    pub const LEVEL_WIDTH: f32 = 800.0;
    pub const LEVEL_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;

    /// Aim line length multiplier for the presentation preview
    pub const AIM_PREVIEW_SCALE: f32 = 5.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
