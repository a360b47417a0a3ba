//! Falling planets
//!
//! Planets are pooled obstacles. The player bounces off them; the higher
//! the player climbs, the faster they fall.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::{Body, EntityId};
use super::pool::Poolable;
use crate::config::GameConfig;

/// Player altitude as a percentage: 0 on the ground, 100 at the top edge
pub fn height_percent(player_y: f32, ground: f32) -> f32 {
    if ground <= 0.0 {
        return 0.0;
    }
    ((ground - player_y) / ground * 100.0).clamp(0.0, 100.0)
}

/// Fall-speed multiplier for a given altitude percentage.
///
/// Flat below 25%, then piecewise linear through (50, 1.25), (75, 1.6),
/// (90, 2.0) up to (100, 2.5). Continuous and non-decreasing.
pub fn accelerator(height_pct: f32) -> f32 {
    const KNOTS: [(f32, f32); 5] = [
        (25.0, 1.0),
        (50.0, 1.25),
        (75.0, 1.6),
        (90.0, 2.0),
        (100.0, 2.5),
    ];

    let pct = height_pct.clamp(0.0, 100.0);
    if pct <= KNOTS[0].0 {
        return KNOTS[0].1;
    }
    for pair in KNOTS.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if pct <= x1 {
            return y0 + (pct - x0) / (x1 - x0) * (y1 - y0);
        }
    }
    KNOTS[KNOTS.len() - 1].1
}

/// A pooled falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub body: Body,
    pub free: bool,
}

impl Planet {
    /// A free planet parked above the view
    pub fn new(id: EntityId, diameter: f32) -> Self {
        Self {
            body: Body::new(id, diameter, diameter, Vec2::new(0.0, -diameter * 0.5)),
            free: true,
        }
    }

    /// Put the planet in play at a random column above the view
    pub fn activate(&mut self, rng: &mut impl Rng, canvas_width: f32) {
        let half = self.body.width * 0.5;
        let max_x = (canvas_width - half).max(half);
        self.body.pos = Vec2::new(rng.random_range(half..=max_x), -self.body.height * 0.5);
        self.free = false;
    }

    /// Fall; leave the pool once past the bottom edge
    pub fn update(&mut self, dt: f32, config: &GameConfig, height_pct: f32) {
        self.body.pos.y += config.planet.falling_speed * dt * accelerator(height_pct);
        if self.body.pos.y > config.canvas.height + self.body.width * 0.5 {
            self.release();
        }
    }
}

impl Poolable for Planet {
    fn is_free(&self) -> bool {
        self.free
    }

    fn release(&mut self) {
        self.free = true;
        self.body.pos.y = -self.body.height * 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_accelerator_knots() {
        assert_eq!(accelerator(0.0), 1.0);
        assert_eq!(accelerator(25.0), 1.0);
        assert!((accelerator(50.0) - 1.25).abs() < 1e-6);
        assert!((accelerator(75.0) - 1.6).abs() < 1e-6);
        assert!((accelerator(90.0) - 2.0).abs() < 1e-6);
        assert!((accelerator(100.0) - 2.5).abs() < 1e-6);
        // Out of range inputs clamp
        assert_eq!(accelerator(-10.0), 1.0);
        assert!((accelerator(150.0) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_height_percent() {
        assert_eq!(height_percent(900.0, 900.0), 0.0);
        assert_eq!(height_percent(0.0, 900.0), 100.0);
        assert_eq!(height_percent(450.0, 900.0), 50.0);
        assert_eq!(height_percent(950.0, 900.0), 0.0);
    }

    #[test]
    fn test_planet_falls_faster_at_altitude() {
        let config = GameConfig::default();
        let mut low = Planet::new(EntityId(1), 24.0);
        let mut high = Planet::new(EntityId(2), 24.0);
        let mut rng = Pcg32::seed_from_u64(1);
        low.activate(&mut rng, 800.0);
        high.activate(&mut rng, 800.0);

        low.update(16.0, &config, 0.0);
        high.update(16.0, &config, 95.0);
        assert!((low.body.pos.y - (-12.0 + 0.08 * 16.0)).abs() < 1e-4);
        assert!(high.body.pos.y > low.body.pos.y);
    }

    #[test]
    fn test_planet_recycles_past_bottom() {
        let config = GameConfig::default();
        let mut planet = Planet::new(EntityId(1), 24.0);
        let mut rng = Pcg32::seed_from_u64(2);
        planet.activate(&mut rng, config.canvas.width);
        planet.body.pos.y = config.canvas.height + 11.0;
        planet.update(16.0, &config, 0.0);
        assert!(planet.free);
        assert!(planet.body.pos.y < 0.0);
    }

    #[test]
    fn test_reactivation_picks_valid_column() {
        let mut planet = Planet::new(EntityId(1), 24.0);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            planet.activate(&mut rng, 800.0);
            assert!(!planet.free);
            assert!(planet.body.pos.x >= 12.0 && planet.body.pos.x <= 788.0);
            planet.release();
            assert!(planet.free);
        }
    }
}
