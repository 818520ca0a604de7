//! Data-driven physics constants
//!
//! Defaults reproduce the arcade feel of the shipped course. A JSON file can
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::BALL_RADIUS;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Physics and effect constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-tick velocity multiplier on open grass
    pub friction_grass: f32,
    /// Per-tick velocity multiplier inside a sand trap
    pub friction_sand: f32,
    /// Fraction of velocity kept after a wall reflection
    pub wall_bounce: f32,
    /// Speed below which the ball is at rest
    pub stop_velocity: f32,
    /// Maximum shot speed (pixels per tick)
    pub max_power: f32,
    /// Pull length to shot speed factor
    pub power_multiplier: f32,
    /// Ball must be slower than this to drop into the hole
    pub capture_speed: f32,
    /// Press must land within this distance of the ball center
    pub pickup_radius: f32,
    /// Shorter pulls are discarded
    pub min_pull: f32,
    /// Particle life lost per tick
    pub particle_decay: f32,
    /// Particle velocity components are drawn from ±jitter/2
    pub particle_jitter: f32,
    pub particle_size_min: f32,
    pub particle_size_max: f32,
    pub shot_dust_count: usize,
    pub confetti_count: usize,
    /// Delay between capture and the level-complete notification
    pub completion_delay_secs: f32,
    pub ball_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction_grass: 0.975,
            friction_sand: 0.88,
            wall_bounce: 0.7,
            stop_velocity: 0.08,
            max_power: 15.0,
            power_multiplier: 0.15,
            capture_speed: 5.0,
            pickup_radius: 50.0,
            min_pull: 5.0,
            particle_decay: 0.02,
            particle_jitter: 5.0,
            particle_size_min: 2.0,
            particle_size_max: 5.0,
            shot_dust_count: 10,
            confetti_count: 50,
            completion_delay_secs: 2.0,
            ball_radius: BALL_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Squared pickup radius, compared against squared press distance
    #[inline]
    pub fn pickup_radius_sq(&self) -> f32 {
        self.pickup_radius * self.pickup_radius
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn unit_open(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v > 0.0 && v < 1.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason: "must be strictly between 0 and 1" })
            }
        }
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason: "must be positive" })
            }
        }

        unit_open("friction_grass", self.friction_grass)?;
        unit_open("friction_sand", self.friction_sand)?;
        unit_open("wall_bounce", self.wall_bounce)?;
        positive("stop_velocity", self.stop_velocity)?;
        positive("max_power", self.max_power)?;
        positive("power_multiplier", self.power_multiplier)?;
        positive("particle_decay", self.particle_decay)?;
        positive("ball_radius", self.ball_radius)?;
        positive("capture_speed", self.capture_speed)?;
        positive("pickup_radius", self.pickup_radius)?;
        positive("particle_jitter", self.particle_jitter)?;
        if !(self.min_pull >= 0.0 && self.min_pull.is_finite()) {
            return Err(TuningError::Invalid {
                field: "min_pull",
                reason: "must be zero or positive",
            });
        }
        if !(self.particle_size_min >= 0.0 && self.particle_size_max.is_finite()) {
            return Err(TuningError::Invalid {
                field: "particle_size_min",
                reason: "size range must be finite and non-negative",
            });
        }
        if self.particle_size_min > self.particle_size_max {
            return Err(TuningError::Invalid {
                field: "particle_size_min",
                reason: "must not exceed particle_size_max",
            });
        }
        if self.completion_delay_secs < 0.0 || self.completion_delay_secs.is_nan() {
            return Err(TuningError::Invalid {
                field: "completion_delay_secs",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().pickup_radius_sq(), 2500.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "friction_sand": 0.9 }"#).unwrap();
        assert_eq!(tuning.friction_sand, 0.9);
        assert_eq!(tuning.friction_grass, 0.975);
        assert_eq!(tuning.max_power, 15.0);
    }

    #[test]
    fn test_rejects_friction_of_one() {
        let err = Tuning::from_json(r#"{ "friction_grass": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "friction_grass", .. }));
    }

    #[test]
    fn test_rejects_unchecked_gates() {
        let err = Tuning::from_json(r#"{ "min_pull": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "min_pull", .. }));

        let err = Tuning::from_json(r#"{ "capture_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "capture_speed", .. }));

        let err = Tuning::from_json(r#"{ "pickup_radius": -5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "pickup_radius", .. }));

        let err = Tuning::from_json(r#"{ "particle_jitter": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "particle_jitter", .. }));
    }

    #[test]
    fn test_rejects_nan_particle_sizes() {
        let tuning = Tuning {
            particle_size_max: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
        let tuning = Tuning {
            particle_size_min: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(Tuning::from_json("{"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/nonexistent/mini-golf-tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
