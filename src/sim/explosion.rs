//! Explosion bursts spawned when the player hits a planet

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{Body, EntityId};
use super::particle::Particle;
use super::pool::Poolable;
use crate::consts::{EXPLOSION_MAX_PARTICLES, EXPLOSION_MIN_PARTICLES};

/// A pooled multi-particle burst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub body: Body,
    pub free: bool,
    /// Time since activation (ms)
    pub timer: f32,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new(id: EntityId, size: f32) -> Self {
        Self {
            body: Body::new(id, size, size, Vec2::ZERO),
            free: true,
            timer: 0.0,
            particles: Vec::with_capacity(EXPLOSION_MAX_PARTICLES),
        }
    }

    /// Start a burst at the impact point
    pub fn activate(&mut self, rng: &mut impl Rng, pos: Vec2) {
        self.body.pos = pos;
        self.timer = 0.0;
        self.free = false;
        self.particles.clear();
        let count = rng.random_range(EXPLOSION_MIN_PARTICLES..=EXPLOSION_MAX_PARTICLES);
        for _ in 0..count {
            self.particles.push(Particle::burst(rng, pos));
        }
    }

    pub fn update(&mut self, dt: f32, lifetime: f32) {
        if self.free {
            return;
        }
        self.timer += dt;
        for particle in &mut self.particles {
            particle.update_burst(dt);
        }
        self.particles.retain(|p| p.active);

        if self.particles.is_empty() || self.timer > lifetime {
            self.release();
        }
    }
}

impl Poolable for Explosion {
    fn is_free(&self) -> bool {
        self.free
    }

    fn release(&mut self) {
        self.free = true;
        self.timer = 0.0;
        self.particles.clear();
    }
}
