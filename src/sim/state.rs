//! Game state and core simulation types
//!
//! One `GameState` owns everything that changes during play: the ball, the
//! particle pool, the drag gesture, the phase and the stroke count. Level
//! geometry is held read-only for the lifetime of an attempt.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aim::{AimController, AimPreview, Shot};
use super::particles::{ParticleColor, ParticleSystem, SpawnSpec};
use super::timer::{Completion, DeferredCompletion};
use crate::level::{LevelData, Material};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest, waiting for a drag
    Aiming,
    /// Ball rolling
    Moving,
    /// Ball dropped; waiting for the host to move on
    HoleOut,
    /// Host is swapping levels
    LevelTransition,
    /// Course finished
    GameOver,
}

/// Inputs to the phase transition function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    ShotFired,
    BallStopped,
    Captured,
    TransitionStarted,
    LevelLoaded,
    CourseFinished,
    Restarted,
}

impl GamePhase {
    /// Transition table. `None` means the event is not valid in this phase.
    pub fn next(self, event: PhaseEvent) -> Option<GamePhase> {
        use GamePhase::*;
        use PhaseEvent::*;
        match (self, event) {
            (_, Restarted) => Some(Aiming),
            (Aiming, ShotFired) => Some(Moving),
            (Moving, BallStopped) => Some(Aiming),
            (Moving, Captured) => Some(HoleOut),
            (HoleOut, TransitionStarted) => Some(LevelTransition),
            (HoleOut | LevelTransition, LevelLoaded) => Some(Aiming),
            (HoleOut | LevelTransition, CourseFinished) => Some(GameOver),
            _ => None,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub moving: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            moving: false,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Zero velocity and clear the moving flag
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
        self.moving = false;
    }
}

/// Sound cues for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum AudioCue {
    Shot { power: f32 },
    WallHit { speed: f32, material: Material },
    SandEnter,
    HoleIn,
}

/// Notifications for the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged { phase: GamePhase },
    StrokeTaken { strokes: u32 },
    LevelComplete { level_id: u32, strokes: u32 },
    Audio { cue: AudioCue },
}

/// Undrained events beyond this are dropped, oldest first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Pointer input in level space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Vec2),
    Move(Vec2),
    Release,
    /// Abandon the drag without shooting
    Cancel,
}

/// Particle as seen by the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub life: f32,
    pub size: f32,
    pub color: &'static str,
}

/// Read-only view for presentation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level_id: u32,
    pub level_name: String,
    pub par: u32,
    pub strokes: u32,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    /// The ball is drawn in the cup, not on the green, once holed
    pub ball_visible: bool,
    pub particles: Vec<ParticleView>,
    pub aim: Option<AimPreview>,
    pub power_percent: f32,
}

/// Complete simulation state for one level attempt
#[derive(Debug, Clone)]
pub struct GameState {
    pub level: LevelData,
    pub tuning: Tuning,
    pub ball: Ball,
    pub particles: ParticleSystem,
    pub aim: AimController,
    pub phase: GamePhase,
    /// Strokes taken on the current level
    pub strokes: u32,
    /// Bumped on every level load or restart
    pub attempt: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) completion: DeferredCompletion,
    pub(crate) was_in_sand: bool,
    pub(crate) captured: bool,
    events: VecDeque<GameEvent>,
    overflow_warned: bool,
    rng: Pcg32,
}

impl GameState {
    /// Create a state on `level` with the given particle seed
    pub fn new(level: LevelData, tuning: Tuning, seed: u64) -> Self {
        log::info!("Level {} \"{}\" (par {})", level.id, level.name, level.par);
        let ball = Ball::new(level.start, tuning.ball_radius);
        Self {
            level,
            tuning,
            ball,
            particles: ParticleSystem::new(),
            aim: AimController::new(),
            phase: GamePhase::Aiming,
            strokes: 0,
            attempt: 0,
            time_ticks: 0,
            completion: DeferredCompletion::new(),
            was_in_sand: false,
            captured: false,
            events: VecDeque::new(),
            overflow_warned: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply a phase event. Returns false (and leaves the phase alone) if
    /// the event is not valid in the current phase.
    pub fn transition(&mut self, event: PhaseEvent) -> bool {
        match self.phase.next(event) {
            Some(phase) => {
                log::debug!("{:?} --{:?}--> {:?}", self.phase, event, phase);
                self.phase = phase;
                self.push_event(GameEvent::PhaseChanged { phase });
                true
            }
            None => {
                log::debug!("Ignoring {:?} in {:?}", event, self.phase);
                false
            }
        }
    }

    /// Host announces it is about to swap levels
    pub fn begin_transition(&mut self) -> bool {
        self.transition(PhaseEvent::TransitionStarted)
    }

    /// Load the next level after a hole-out
    pub fn next_level(&mut self, level: LevelData) -> bool {
        if self.phase.next(PhaseEvent::LevelLoaded).is_none() {
            log::warn!("Next level requested in {:?}, ignored", self.phase);
            return false;
        }
        self.reset_attempt(level);
        self.transition(PhaseEvent::LevelLoaded)
    }

    /// No levels remain. A completion still pending for the last hole
    /// keeps running and is delivered after the phase change.
    pub fn finish_course(&mut self) -> bool {
        let finished = self.transition(PhaseEvent::CourseFinished);
        if finished {
            log::info!("Course complete");
        }
        finished
    }

    /// Start `level` from scratch, from any phase
    pub fn restart(&mut self, level: LevelData) {
        self.reset_attempt(level);
        self.transition(PhaseEvent::Restarted);
    }

    /// Invalidate the current attempt before swapping in `level`
    fn reset_attempt(&mut self, level: LevelData) {
        self.completion.cancel();
        self.attempt += 1;
        log::info!(
            "Level {} \"{}\" (par {}), attempt {}",
            level.id,
            level.name,
            level.par,
            self.attempt
        );
        self.ball = Ball::new(level.start, self.tuning.ball_radius);
        self.level = level;
        self.particles.clear();
        self.aim.cancel();
        self.strokes = 0;
        self.was_in_sand = false;
        self.captured = false;
    }

    /// Handle one pointer event synchronously
    pub fn apply_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press(point) => {
                if self.phase != GamePhase::Aiming || self.aim.is_active() {
                    return;
                }
                self.aim.press(point, self.ball.pos, &self.tuning);
            }
            PointerEvent::Move(point) => self.aim.drag(point),
            PointerEvent::Release => {
                let shot = self.aim.release(&self.tuning);
                if let Some(shot) = shot.filter(|_| self.phase == GamePhase::Aiming) {
                    self.take_shot(shot);
                }
            }
            PointerEvent::Cancel => self.aim.cancel(),
        }
    }

    fn take_shot(&mut self, shot: Shot) {
        self.ball.vel = shot.velocity;
        self.ball.moving = true;
        self.strokes += 1;
        self.transition(PhaseEvent::ShotFired);
        self.push_event(GameEvent::StrokeTaken {
            strokes: self.strokes,
        });
        self.push_event(GameEvent::Audio {
            cue: AudioCue::Shot { power: shot.power },
        });
        log::debug!(
            "Stroke {} power {:.2} vel ({:.2}, {:.2})",
            self.strokes,
            shot.power,
            shot.velocity.x,
            shot.velocity.y
        );
        let count = self.tuning.shot_dust_count;
        self.spawn_particles(self.ball.pos, count, ParticleColor::Dust);
    }

    /// Freeze the ball in the cup and schedule the completion. Only the
    /// first capture of an attempt does anything.
    pub(crate) fn capture(&mut self) {
        if self.captured {
            return;
        }
        self.captured = true;
        let hole = self.level.hole.pos();
        self.ball.stop();
        self.ball.pos = hole;
        self.transition(PhaseEvent::Captured);

        let count = self.tuning.confetti_count;
        self.spawn_particles(hole, count, ParticleColor::Confetti);
        self.push_event(GameEvent::Audio {
            cue: AudioCue::HoleIn,
        });
        self.completion.schedule(
            self.attempt,
            self.tuning.completion_delay_secs,
            Completion {
                level_id: self.level.id,
                strokes: self.strokes,
            },
        );
        log::info!("Holed level {} in {} strokes", self.level.id, self.strokes);
    }

    pub fn spawn_particles(&mut self, pos: Vec2, count: usize, color: ParticleColor) {
        let spec = SpawnSpec {
            jitter: self.tuning.particle_jitter,
            size_min: self.tuning.particle_size_min,
            size_max: self.tuning.particle_size_max,
        };
        self.particles.spawn(&mut self.rng, pos, count, color, &spec);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            if !self.overflow_warned {
                log::warn!("Event queue full; dropping oldest events until drained");
                self.overflow_warned = true;
            }
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.overflow_warned = false;
        self.events.drain(..).collect()
    }

    pub fn pending_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// A completion is scheduled but has not fired yet
    pub fn completion_pending(&self) -> bool {
        self.completion.is_pending()
    }

    pub fn snapshot(&self) -> Snapshot {
        let aim = if self.phase == GamePhase::Aiming {
            self.aim.preview(self.ball.pos, &self.tuning)
        } else {
            None
        };
        Snapshot {
            phase: self.phase,
            level_id: self.level.id,
            level_name: self.level.name.clone(),
            par: self.level.par,
            strokes: self.strokes,
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius,
            ball_visible: self.phase != GamePhase::HoleOut,
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    life: p.life,
                    size: p.size,
                    color: p.color.hex(),
                })
                .collect(),
            aim,
            power_percent: self.aim.power_percent(&self.tuning),
        }
    }
}
