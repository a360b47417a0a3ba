//! Particles: dust trail, explosion bursts and cloud containers
//!
//! Dust and burst particles shrink every tick and die below half a pixel;
//! owners sweep dead ones with `retain`. Cloud particles never die: they
//! are pushed around by the player and spring back to their home slot.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{Body, BoundingBox, EntityId};
use crate::config::CanvasSize;
use crate::consts::REFERENCE_FRAME_MS;

/// Per-reference-frame size decay
const SIZE_DECAY: f32 = 0.92;
/// Particles below this size are dead
const MIN_SIZE: f32 = 0.5;
/// Burst particle drag per reference frame
const BURST_DRAG: f32 = 0.94;
/// Cloud particle spring stiffness toward home (1/ms²)
const CLOUD_SPRING: f32 = 0.0001;
/// Cloud particle damping per reference frame
const CLOUD_DAMPING: f32 = 0.9;
/// Speed kick a cloud particle gets when the player runs into it (px/ms)
const CLOUD_REPEL: f32 = 0.3;
/// Clouds stay in the upper part of the canvas
const CLOUD_MAX_Y_RATIO: f32 = 0.7;

/// Frame-rate independent exponential decay factor
#[inline]
fn per_frame(factor: f32, dt: f32) -> f32 {
    factor.powf(dt / REFERENCE_FRAME_MS)
}

fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { -1.0 } else { 1.0 }
}

/// RGBA color, alpha in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for 2D canvas fill/stroke styles
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Dust left behind while rising
pub const DUST_COLOR: Color = Color::rgba(255, 255, 255, 0.5);

/// Explosion palette
const BURST_COLORS: [Color; 3] = [
    Color::rgba(255, 179, 71, 1.0),
    Color::rgba(255, 107, 53, 1.0),
    Color::rgba(255, 230, 120, 1.0),
];

/// A single short-lived particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius (px)
    pub size: f32,
    pub color: Color,
    pub active: bool,
}

impl Particle {
    /// Dust puff at the player's feet
    pub fn dust(rng: &mut impl Rng, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random::<f32>(), rng.random::<f32>()),
            size: rng.random_range(5.0..15.0),
            color: DUST_COLOR,
            active: true,
        }
    }

    /// Burst particle flying out of an explosion
    pub fn burst(rng: &mut impl Rng, pos: Vec2) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(0.05..0.25);
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: rng.random_range(3.0..8.0),
            color: BURST_COLORS[rng.random_range(0..BURST_COLORS.len())],
            active: true,
        }
    }

    /// Dust drifts away from the direction the player faces and sinks
    pub fn update_dust(&mut self, dt: f32, facing: f32) {
        self.pos.x -= dt * facing * self.vel.x / 30.0;
        self.pos.y += dt * self.vel.y / 30.0;
        self.shrink(dt);
    }

    pub fn update_burst(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel *= per_frame(BURST_DRAG, dt);
        self.shrink(dt);
    }

    fn shrink(&mut self, dt: f32) {
        self.size *= per_frame(SIZE_DECAY, dt);
        if self.size < MIN_SIZE {
            self.active = false;
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::centered(self.pos, self.size * 2.0, self.size * 2.0)
    }
}

/// A cloud particle with the slot it reforms toward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainedParticle {
    pub particle: Particle,
    /// Offset from the container center
    pub home: Vec2,
}

/// A drifting cloud holding a fixed set of particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticlesContainer {
    pub body: Body,
    pub vel: Vec2,
    /// Position at the start of the last update
    pub last_pos: Vec2,
    pub particles: Vec<ContainedParticle>,
}

impl ParticlesContainer {
    pub fn new(
        id: EntityId,
        rng: &mut impl Rng,
        canvas: CanvasSize,
        width: f32,
        height: f32,
        count: usize,
    ) -> Self {
        let max_y = (canvas.height * CLOUD_MAX_Y_RATIO).max(height);
        let pos = Vec2::new(
            rng.random_range(width * 0.5..=(canvas.width - width * 0.5).max(width * 0.5)),
            rng.random_range(height * 0.5..=max_y - height * 0.5),
        );
        let vel = Vec2::new(
            rng.random_range(0.01..0.05) * random_sign(rng),
            rng.random_range(0.0..0.01) * random_sign(rng),
        );

        let particles = (0..count)
            .map(|_| {
                let home = Vec2::new(
                    rng.random_range(-width * 0.5..width * 0.5),
                    rng.random_range(-height * 0.5..height * 0.5),
                );
                ContainedParticle {
                    particle: Particle {
                        pos: pos + home,
                        vel: Vec2::ZERO,
                        size: rng.random_range(6.0..14.0),
                        color: Color::rgba(255, 255, 255, rng.random_range(0.3..0.6)),
                        active: true,
                    },
                    home,
                }
            })
            .collect();

        Self {
            body: Body::new(id, width, height, pos),
            vel,
            last_pos: pos,
            particles,
        }
    }

    /// Drift, bounce off the canvas edges and carry the particles along
    pub fn update(&mut self, dt: f32, canvas: CanvasSize) {
        self.last_pos = self.body.pos;
        self.body.pos += self.vel * dt;

        let half_w = self.body.width * 0.5;
        let half_h = self.body.height * 0.5;
        let max_x = (canvas.width - half_w).max(half_w);
        let max_y = (canvas.height * CLOUD_MAX_Y_RATIO - half_h).max(half_h);
        if self.body.pos.x < half_w || self.body.pos.x > max_x {
            self.vel.x = -self.vel.x;
            self.body.pos.x = self.body.pos.x.clamp(half_w, max_x);
        }
        if self.body.pos.y < half_h || self.body.pos.y > max_y {
            self.vel.y = -self.vel.y;
            self.body.pos.y = self.body.pos.y.clamp(half_h, max_y);
        }

        let delta = self.body.pos - self.last_pos;
        let damping = per_frame(CLOUD_DAMPING, dt);
        for contained in &mut self.particles {
            let p = &mut contained.particle;
            p.pos += delta;
            // Spring back toward the home slot
            let target = self.body.pos + contained.home;
            p.vel += (target - p.pos) * CLOUD_SPRING * dt;
            p.vel *= damping;
            p.pos += p.vel * dt;
        }
    }

    /// Push particles overlapping `hit` away from `center`. Returns how many moved.
    pub fn repel(&mut self, hit: &BoundingBox, center: Vec2) -> usize {
        let mut moved = 0;
        for contained in &mut self.particles {
            let p = &mut contained.particle;
            if super::collision::boxes_overlap(&p.bounding_box(), hit) {
                let away = (p.pos - center).try_normalize().unwrap_or(Vec2::NEG_Y);
                p.vel += away * CLOUD_REPEL;
                moved += 1;
            }
        }
        moved
    }

    /// Drop particles that died since the last sweep
    pub fn sweep(&mut self) {
        self.particles.retain(|c| c.particle.active);
    }

    /// Movement since the previous update
    pub fn delta(&self) -> Vec2 {
        self.body.pos - self.last_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn canvas() -> CanvasSize {
        CanvasSize {
            width: 800.0,
            height: 1000.0,
        }
    }

    #[test]
    fn test_dust_dies_and_stays_dead() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut dust = Particle::dust(&mut rng, Vec2::new(10.0, 10.0));
        assert!(dust.active);
        for _ in 0..200 {
            dust.update_dust(REFERENCE_FRAME_MS, 1.0);
        }
        assert!(!dust.active);
        assert!(dust.size < MIN_SIZE);
    }

    #[test]
    fn test_dust_drifts_against_facing() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut dust = Particle::dust(&mut rng, Vec2::ZERO);
        dust.vel = Vec2::new(1.0, 1.0);
        dust.update_dust(30.0, 1.0);
        assert_eq!(dust.pos, Vec2::new(-1.0, 1.0));
        dust.update_dust(30.0, -1.0);
        assert_eq!(dust.pos, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_burst_moves_outward() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = Particle::burst(&mut rng, Vec2::ZERO);
        let before = p.size;
        p.update_burst(REFERENCE_FRAME_MS);
        assert!(p.pos.length() > 0.0);
        assert!(p.size < before);
    }

    #[test]
    fn test_container_carries_particles() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut cloud = ParticlesContainer::new(EntityId(1), &mut rng, canvas(), 200.0, 60.0, 10);
        cloud.body.pos = Vec2::new(400.0, 300.0);
        cloud.last_pos = cloud.body.pos;
        for c in &mut cloud.particles {
            c.particle.pos = cloud.body.pos + c.home;
            c.particle.vel = Vec2::ZERO;
        }
        cloud.vel = Vec2::new(0.05, 0.0);

        cloud.update(10.0, canvas());
        assert_eq!(cloud.delta(), Vec2::new(0.5, 0.0));
        for c in &cloud.particles {
            // Particles at home move exactly with the container
            let expected = cloud.body.pos + c.home;
            assert!((c.particle.pos - expected).length() < 1e-3);
        }
    }

    #[test]
    fn test_container_bounces_off_edges() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut cloud = ParticlesContainer::new(EntityId(1), &mut rng, canvas(), 200.0, 60.0, 4);
        cloud.body.pos = Vec2::new(799.0 - 100.0, 300.0);
        cloud.vel = Vec2::new(0.05, 0.0);
        cloud.update(100.0, canvas());
        assert!(cloud.vel.x < 0.0);
        assert!(cloud.body.pos.x <= 700.0);
    }

    #[test]
    fn test_repel_then_reform() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut cloud = ParticlesContainer::new(EntityId(1), &mut rng, canvas(), 200.0, 60.0, 1);
        cloud.vel = Vec2::ZERO;
        let home = cloud.body.pos + cloud.particles[0].home;
        cloud.particles[0].particle.pos = home;

        let hit = BoundingBox::centered(home, 10.0, 10.0);
        let moved = cloud.repel(&hit, home + Vec2::new(-5.0, 0.0));
        assert_eq!(moved, 1);
        assert!(cloud.particles[0].particle.vel.x > 0.0);

        for _ in 0..5 {
            cloud.update(REFERENCE_FRAME_MS, canvas());
        }
        let displaced = (cloud.particles[0].particle.pos - home).length();
        assert!(displaced > 1.0);

        for _ in 0..600 {
            cloud.update(REFERENCE_FRAME_MS, canvas());
        }
        let settled = (cloud.particles[0].particle.pos - home).length();
        assert!(settled < displaced);
        assert!(settled < 1.0);
    }

    #[test]
    fn test_sweep_keeps_cloud_particles() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut cloud = ParticlesContainer::new(EntityId(1), &mut rng, canvas(), 200.0, 60.0, 8);
        cloud.particles[3].particle.active = false;
        cloud.sweep();
        assert_eq!(cloud.particles.len(), 7);
    }
}
