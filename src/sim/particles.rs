//! Fruit burst particles
//!
//! Purely visual: particles advance on every render signal with the real
//! elapsed time, not on simulation ticks. Storage is a dense `Vec` pruned with
//! `swap_remove`, so iteration order is not spawn order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Slack on the expiry check (seconds). Lifetimes are summed in `f32`, so
/// steps adding up to `max_life` can land a few ulps short of it.
const LIFE_TOLERANCE: f32 = 1e-4;

/// Visual variant of a burst particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fruit {
    Apple,
    Banana,
    Grapes,
    Orange,
    Strawberry,
    Watermelon,
    Pear,
    Cherries,
}

impl Fruit {
    pub const ALL: [Fruit; 8] = [
        Fruit::Apple,
        Fruit::Banana,
        Fruit::Grapes,
        Fruit::Orange,
        Fruit::Strawberry,
        Fruit::Watermelon,
        Fruit::Pear,
        Fruit::Cherries,
    ];
}

/// Rotation state for tumbling particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    /// Current angle (radians)
    pub angle: f32,
    /// Angular velocity (radians/s)
    pub angular_vel: f32,
}

/// A single burst particle (positions in cell units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds lived so far
    pub life: f32,
    /// Seconds until removal
    pub max_life: f32,
    pub fruit: Fruit,
    /// Size at spawn (cells)
    pub base_size: f32,
    pub spin: Option<Spin>,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, max_life: f32, fruit: Fruit) -> Self {
        Self {
            pos,
            vel,
            life: 0.0,
            max_life,
            fruit,
            base_size: 1.0,
            spin: None,
        }
    }

    /// Integrate one render step. Returns false once the particle has expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.life += dt;
        self.pos += self.vel * dt;
        // Drag is defined per reference frame; raise it to the frame count so
        // decay is the same at any render rate.
        self.vel *= PARTICLE_DRAG.powf(dt * REFERENCE_FPS);
        if let Some(spin) = self.spin.as_mut() {
            spin.angle += spin.angular_vel * dt;
        }
        !self.is_expired()
    }

    /// Expired once life reaches max life, within float summation error
    fn is_expired(&self) -> bool {
        self.life >= self.max_life - LIFE_TOLERANCE
    }

    /// Fraction of life used, 0..=1
    pub fn progress(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 1.0;
        }
        (self.life / self.max_life).min(1.0)
    }

    /// Opacity for rendering (fades out over life)
    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Rendered size (shrinks to 60% over life)
    pub fn size(&self) -> f32 {
        self.base_size * (1.0 - self.progress() * 0.4)
    }
}

/// Bounded collection of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::with_capacity(crate::settings::QualityPreset::default().max_particles())
    }
}

impl ParticleSystem {
    /// Create an empty system holding at most `capacity` particles
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Add one particle. Returns false when the system is full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.capacity {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Spawn a burst of `count` particles at `origin`.
    /// Returns how many were actually spawned (the rest exceed capacity).
    pub fn spawn_burst<R: Rng>(&mut self, origin: Vec2, count: usize, rng: &mut R) -> usize {
        let room = self.capacity.saturating_sub(self.particles.len());
        let count = count.min(room);

        for _ in 0..count {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
            let max_life = rng.random_range(PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE);
            let base_size = rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE);
            let fruit = Fruit::ALL[rng.random_range(0..Fruit::ALL.len())];

            let spin = Spin {
                angle: rng.random::<f32>() * std::f32::consts::TAU,
                angular_vel: rng.random_range(-PARTICLE_MAX_SPIN..PARTICLE_MAX_SPIN),
            };

            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life: 0.0,
                max_life,
                fruit,
                base_size,
                spin: Some(spin),
            });
        }

        count
    }

    /// Advance every particle by `dt` seconds and prune the expired ones
    pub fn update(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].update(dt) {
                i += 1;
            } else {
                // The swapped-in particle has not been updated yet; revisit index i
                self.particles.swap_remove(i);
            }
        }
    }
}
