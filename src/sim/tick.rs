//! Per-frame simulation tick
//!
//! Core game loop. Ball physics advances one step per tick (velocities are
//! pixels per tick); `dt` only drives wall-clock timers such as the delayed
//! level-complete notification.

use glam::Vec2;

use super::collision::{WallHit, resolve_wall};
use super::state::{AudioCue, GameEvent, GamePhase, GameState, PhaseEvent, PointerEvent};
use super::zone::{self, Surface};

/// Input collected between ticks, applied in order at the start of the next one
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pointer: Vec<PointerEvent>,
}

impl TickInput {
    pub fn push(&mut self, event: PointerEvent) {
        self.pointer.push(event);
    }

    pub fn clear(&mut self) {
        self.pointer.clear();
    }
}

/// What happened to the ball during one integration step
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    pub entered_sand: bool,
    /// Fell below the stop speed this tick
    pub stopped: bool,
    pub wall_hits: Vec<WallHit>,
    /// Met both capture gates this tick
    pub in_hole: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for event in &input.pointer {
        state.apply_pointer(*event);
    }

    state.time_ticks += 1;

    if state.phase == GamePhase::Moving {
        let outcome = integrate_ball(state);

        if outcome.entered_sand {
            state.push_event(GameEvent::Audio {
                cue: AudioCue::SandEnter,
            });
        }
        for hit in &outcome.wall_hits {
            log::debug!("Wall hit ({:?}) at speed {:.2}", hit.material, hit.speed);
            state.push_event(GameEvent::Audio {
                cue: AudioCue::WallHit {
                    speed: hit.speed,
                    material: hit.material,
                },
            });
        }

        if outcome.in_hole {
            state.capture();
        } else if outcome.stopped && !state.captured {
            state.transition(PhaseEvent::BallStopped);
        }
    }

    if let Some(done) = state.completion.advance(dt, state.attempt) {
        log::info!(
            "Level {} complete: {} strokes",
            done.level_id,
            done.strokes
        );
        state.push_event(GameEvent::LevelComplete {
            level_id: done.level_id,
            strokes: done.strokes,
        });
    }

    // Particles age in every phase
    let decay = state.tuning.particle_decay;
    state.particles.update(decay);
}

/// One integration step: move, friction, stop check, walls, capture check.
///
/// Friction runs before collision so reflections use the damped velocity,
/// and the stop check runs before collision so a ball that stops this tick
/// does not bounce off a wall it barely grazes.
pub fn integrate_ball(state: &mut GameState) -> StepOutcome {
    let tuning = &state.tuning;
    let level = &state.level;
    let ball = &mut state.ball;
    let mut outcome = StepOutcome::default();

    ball.pos += ball.vel;

    let sample = zone::evaluate(ball.pos, &level.traps, state.was_in_sand, tuning);
    state.was_in_sand = sample.surface == Surface::Sand;
    outcome.entered_sand = sample.entered_sand;
    ball.vel *= sample.friction;

    let speed = ball.speed();
    if speed < tuning.stop_velocity {
        ball.stop();
        outcome.stopped = true;
    }

    for wall in &level.walls {
        if let Some(hit) = resolve_wall(ball, wall, tuning.wall_bounce) {
            outcome.wall_hits.push(hit);
        }
    }

    outcome.in_hole = in_capture_range(ball.pos, level.hole.pos(), level.hole.radius)
        && speed < tuning.capture_speed;

    outcome
}

#[inline]
fn in_capture_range(ball_pos: Vec2, hole_pos: Vec2, hole_radius: f32) -> bool {
    ball_pos.distance(hole_pos) < hole_radius
}
