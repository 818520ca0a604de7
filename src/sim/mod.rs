//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One physics step per tick
//! - Seeded RNG only
//! - Walls resolved in declaration order
//! - No rendering, audio or platform dependencies

pub mod aim;
pub mod collision;
pub mod geometry;
pub mod particles;
pub mod state;
pub mod tick;
pub mod timer;
pub mod zone;

pub use aim::{AimController, AimPreview, DragGesture, Shot};
pub use collision::{CollisionResult, WallHit, ball_rect_collision, reflect_velocity, resolve_wall};
pub use geometry::Rect;
pub use particles::{Particle, ParticleColor, ParticleSystem};
pub use state::{
    AudioCue, Ball, GameEvent, GamePhase, GameState, PhaseEvent, PointerEvent, Snapshot,
    MAX_PENDING_EVENTS,
};
pub use tick::{StepOutcome, TickInput, integrate_ball, tick};
pub use timer::{Completion, DeferredCompletion, TaskHandle};
pub use zone::{Surface, ZoneSample};
