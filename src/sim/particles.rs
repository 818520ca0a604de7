//! Short-lived visual effect particles
//!
//! Particles never affect gameplay. They drift at their spawn velocity and
//! fade out at a constant rate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Color tag for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// White puff when the ball is struck
    Dust,
    /// Gold burst when the ball drops
    Confetti,
}

impl ParticleColor {
    pub fn hex(&self) -> &'static str {
        match self {
            ParticleColor::Dust => "#ffffff",
            ParticleColor::Confetti => "#ffd700",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    pub life: f32, // 1.0 at spawn, removed at <= 0
    pub size: f32,
}

/// Spawn parameters shared by every burst
#[derive(Debug, Clone, Copy)]
pub struct SpawnSpec {
    /// Velocity components are drawn from [-jitter/2, jitter/2)
    pub jitter: f32,
    pub size_min: f32,
    pub size_max: f32,
}

/// Unordered particle pool
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `count` particles at `pos` with random velocity and size
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        count: usize,
        color: ParticleColor,
        spec: &SpawnSpec,
    ) {
        self.particles.reserve(count);
        for _ in 0..count {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * spec.jitter,
                (rng.random::<f32>() - 0.5) * spec.jitter,
            );
            let size = spec.size_min + rng.random::<f32>() * (spec.size_max - spec.size_min);
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: 1.0,
                size,
            });
        }
    }

    /// Advance every particle one tick and drop the dead ones
    pub fn update(&mut self, decay: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.life -= decay;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SPEC: SpawnSpec = SpawnSpec {
        jitter: 5.0,
        size_min: 2.0,
        size_max: 5.0,
    };

    #[test]
    fn test_spawn_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut system = ParticleSystem::new();
        system.spawn(&mut rng, Vec2::new(10.0, 20.0), 100, ParticleColor::Confetti, &SPEC);

        assert_eq!(system.len(), 100);
        for p in system.iter() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, ParticleColor::Confetti);
            assert!(p.vel.x.abs() <= 2.5 && p.vel.y.abs() <= 2.5);
            assert!(p.size >= 2.0 && p.size < 5.0);
        }
    }

    #[test]
    fn test_update_moves_and_decays() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::new();
        system.spawn(&mut rng, Vec2::ZERO, 1, ParticleColor::Dust, &SPEC);
        let vel = system.iter().next().unwrap().vel;

        system.update(0.02);
        let p = system.iter().next().unwrap();
        assert_eq!(p.pos, vel);
        assert_eq!(p.vel, vel);
        assert!((p.life - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new();
        system.spawn(&mut rng, Vec2::ZERO, 10, ParticleColor::Dust, &SPEC);

        // 1.0 / 0.02 = 50 ticks, allow for float drift
        for _ in 0..49 {
            system.update(0.02);
        }
        assert_eq!(system.len(), 10);
        for _ in 0..2 {
            system.update(0.02);
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_same_seed_same_burst() {
        let mut a = ParticleSystem::new();
        let mut b = ParticleSystem::new();
        a.spawn(&mut Pcg32::seed_from_u64(42), Vec2::ZERO, 5, ParticleColor::Dust, &SPEC);
        b.spawn(&mut Pcg32::seed_from_u64(42), Vec2::ZERO, 5, ParticleColor::Dust, &SPEC);
        let va: Vec<_> = a.iter().map(|p| (p.vel, p.size)).collect();
        let vb: Vec<_> = b.iter().map(|p| (p.vel, p.size)).collect();
        assert_eq!(va, vb);
    }
}
