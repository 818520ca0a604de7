//! Surface friction zones

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::level::SandTrap;
use crate::tuning::Tuning;

/// Terrain under the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Surface {
    #[default]
    Grass,
    Sand,
}

/// Friction to apply this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSample {
    pub surface: Surface,
    /// Per-tick velocity multiplier
    pub friction: f32,
    /// True only on the tick the ball crosses from grass into sand
    pub entered_sand: bool,
}

/// Index of the first trap strictly containing `pos`
pub fn trap_at(pos: Vec2, traps: &[SandTrap]) -> Option<usize> {
    traps.iter().position(|trap| trap.rect.contains_strict(pos))
}

/// Evaluate the zone at `pos`. `was_in_sand` is the previous tick's surface.
pub fn evaluate(pos: Vec2, traps: &[SandTrap], was_in_sand: bool, tuning: &Tuning) -> ZoneSample {
    match trap_at(pos, traps) {
        Some(_) => ZoneSample {
            surface: Surface::Sand,
            friction: tuning.friction_sand,
            entered_sand: !was_in_sand,
        },
        None => ZoneSample {
            surface: Surface::Grass,
            friction: tuning.friction_grass,
            entered_sand: false,
        },
    }
}
