//! Per-tick simulation step
//!
//! Order matters: debug flag, entity updates in registry order, clouds,
//! spawn timer, then collision resolution.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use super::collision::boxes_overlap;
use super::planet::accelerator;
use super::pool::Poolable;
use super::state::{EntityKind, SessionPhase, SimulationState};
use crate::config::GameConfig;
use crate::consts::SAFETY_SPAWN_FACTOR;

/// Holding this key shows bounding boxes
pub const DEBUG_KEY: &str = "d";

/// Input state for a single tick, read once at the top of the tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Latest pointer/touch position in surface coordinates
    pub pointer: Vec2,
    /// A pointer-down / touch-start edge happened since the last tick
    pub jump: bool,
    /// Keys currently held
    pub keys: HashSet<String>,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The jump request was honored
    pub jumped: bool,
    /// Pool slot of the planet spawned this tick
    pub spawned: Option<usize>,
    /// Planets the player bounced off
    pub planet_hits: u32,
    /// Cloud particles pushed by the player
    pub cloud_pushes: usize,
}

/// Advance the simulation by `dt` milliseconds
pub fn tick(
    state: &mut SimulationState,
    config: &mut GameConfig,
    input: &InputSnapshot,
    dt: f32,
) -> TickReport {
    let mut report = TickReport::default();
    if state.phase != SessionPhase::OnGoing {
        return report;
    }
    state.ticks += 1;

    config.debug = input.keys.contains(DEBUG_KEY);
    let config: &GameConfig = config;

    state.player.pointer = input.pointer;
    if input.jump {
        report.jumped = state.player.try_jump(config);
    }

    update_entities(state, config, dt);

    for cloud in &mut state.clouds {
        cloud.update(dt, config.canvas);
        cloud.sweep();
    }
    state.player.sweep();

    report.spawned = advance_spawn(state, config, dt);

    let (planet_hits, cloud_pushes) = resolve_collisions(state, config);
    report.planet_hits = planet_hits;
    report.cloud_pushes = cloud_pushes;
    report
}

/// Update every tracked entity in registry order, skipping free ones
fn update_entities(state: &mut SimulationState, config: &GameConfig, dt: f32) {
    for i in 0..state.tracked.len() {
        match state.tracked[i].kind {
            EntityKind::Player => state.player.update(dt, config, &mut state.rng),
            EntityKind::Planet(index) => {
                let height_pct = state.height_percent(config);
                if let Some(planet) = state.planets.get_mut(index).filter(|p| !p.is_free()) {
                    planet.update(dt, config, height_pct);
                }
            }
            EntityKind::Explosion(index) => {
                if let Some(explosion) = state.explosions.get_mut(index).filter(|e| !e.is_free()) {
                    explosion.update(dt, config.explosion.lifetime);
                }
            }
            // Clouds move in their own pass
            EntityKind::Cloud(_) => {}
        }
    }
}

/// Randomized delay before the next spawn.
///
/// Shrinks with altitude, and drops to `SAFETY_SPAWN_FACTOR` of that when
/// nothing reachable is above the player so they are never stranded.
pub fn next_spawn_interval(
    rng: &mut impl Rng,
    config: &GameConfig,
    height_pct: f32,
    reachable: bool,
) -> f32 {
    let base = rng.random_range(config.planet.min_interval..=config.planet.max_interval)
        / accelerator(height_pct);
    if reachable {
        base
    } else {
        base * SAFETY_SPAWN_FACTOR
    }
}

/// Count down the spawn timer; on elapse spawn a planet and reseed
pub fn advance_spawn(state: &mut SimulationState, config: &GameConfig, dt: f32) -> Option<usize> {
    state.spawn_countdown -= dt;
    if state.spawn_countdown > 0.0 {
        return None;
    }

    let spawned = state.spawn_planet(config);
    let reachable = state.has_reachable_planet(config);
    let height_pct = state.height_percent(config);
    state.spawn_countdown = next_spawn_interval(&mut state.rng, config, height_pct, reachable);
    if !reachable {
        log::debug!(
            "No reachable planet, next spawn in {:.0} ms",
            state.spawn_countdown
        );
    }
    spawned
}

/// Player vs planets (bounce + explosion + recycle) and player vs cloud particles (repel)
pub fn resolve_collisions(state: &mut SimulationState, config: &GameConfig) -> (u32, usize) {
    let player_box = state.player.body.bounding_box();
    let mut hits = 0;

    for index in 0..state.planets.capacity() {
        let Some(planet) = state.planets.get_mut(index) else {
            continue;
        };
        if planet.is_free() || !boxes_overlap(&player_box, &planet.body.bounding_box()) {
            continue;
        }
        let impact = planet.body.pos;
        planet.release();
        state.trigger_explosion(impact);
        state.player.bounce(config);
        hits += 1;
        log::debug!("Bounced off planet {} at ({:.0}, {:.0})", index, impact.x, impact.y);
    }

    let center = state.player.body.pos;
    let pushes: usize = state
        .clouds
        .iter_mut()
        .map(|cloud| cloud.repel(&player_box, center))
        .sum();

    (hits, pushes)
}
