//! Simulation state and session lifecycle
//!
//! Only the orchestrator mutates this. Entities never hold a reference back
//! to it; everything they need is passed into their update functions.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::explosion::Explosion;
use super::geom::{Body, EntityId};
use super::particle::ParticlesContainer;
use super::planet::{Planet, height_percent};
use super::player::Player;
use super::pool::{Pool, Poolable};
use crate::config::GameConfig;
use crate::consts::{CLOUD_HEIGHT, CLOUD_PARTICLES, CLOUD_WIDTH_RATIO};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Initialized, waiting for assets / start
    #[default]
    Before,
    /// Pools, clouds and the player are live
    OnGoing,
    /// Torn down
    Ended,
}

/// What a tracked entity is and where it lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Planet(usize),
    Explosion(usize),
    Cloud(usize),
}

/// Registry entry, kept in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEntity {
    pub id: EntityId,
    pub kind: EntityKind,
}

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub player: Player,
    pub planets: Pool<Planet>,
    pub explosions: Pool<Explosion>,
    pub clouds: Vec<ParticlesContainer>,
    /// Entities in play, insertion order is render order
    pub tracked: Vec<TrackedEntity>,
    /// Time left before the next planet spawn (ms)
    pub spawn_countdown: f32,
    /// Executed ticks this session
    pub ticks: u64,
    next_id: u32,
}

impl SimulationState {
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Before,
            player: Player::new(EntityId(0), config),
            planets: Pool::empty(),
            explosions: Pool::empty(),
            clouds: Vec::new(),
            tracked: Vec::new(),
            spawn_countdown: 0.0,
            ticks: 0,
            next_id: 0,
        };
        let id = state.next_entity_id();
        state.player.body.id = id;
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn track(&mut self, id: EntityId, kind: EntityKind) {
        self.tracked.push(TrackedEntity { id, kind });
    }

    /// Enter `OnGoing`: fill the pools, spawn clouds, place the player
    pub fn start(&mut self, config: &GameConfig) {
        if self.phase == SessionPhase::OnGoing {
            log::warn!("Session already running");
            return;
        }
        self.tracked.clear();
        self.ticks = 0;

        let player_id = self.next_entity_id();
        self.player = Player::new(player_id, config);
        self.track(player_id, EntityKind::Player);

        let first_planet = self.next_id;
        let diameter = config.planet.diameter;
        self.planets = Pool::new(config.planet.maximum, |i| {
            Planet::new(EntityId(first_planet + i as u32), diameter)
        });
        self.next_id += config.planet.maximum as u32;
        for i in 0..self.planets.capacity() {
            self.track(EntityId(first_planet + i as u32), EntityKind::Planet(i));
        }

        let first_explosion = self.next_id;
        self.explosions = Pool::new(config.explosion.maximum, |i| {
            Explosion::new(EntityId(first_explosion + i as u32), diameter * 2.0)
        });
        self.next_id += config.explosion.maximum as u32;
        for i in 0..self.explosions.capacity() {
            self.track(EntityId(first_explosion + i as u32), EntityKind::Explosion(i));
        }

        self.clouds.clear();
        let cloud_width = config.canvas.width * CLOUD_WIDTH_RATIO;
        for i in 0..config.clouds {
            let id = self.next_entity_id();
            let cloud = ParticlesContainer::new(
                id,
                &mut self.rng,
                config.canvas,
                cloud_width,
                CLOUD_HEIGHT,
                CLOUD_PARTICLES,
            );
            self.clouds.push(cloud);
            self.track(id, EntityKind::Cloud(i));
        }

        self.spawn_countdown = self
            .rng
            .random_range(config.planet.min_interval..=config.planet.max_interval);
        self.phase = SessionPhase::OnGoing;
        log::info!(
            "Session started (seed {}, {} planets, {} explosions, {} clouds)",
            self.seed,
            self.planets.capacity(),
            self.explosions.capacity(),
            self.clouds.len()
        );
    }

    /// Enter `Ended`: release pools and clouds, drop the player from the registry
    pub fn end(&mut self) {
        if self.phase != SessionPhase::OnGoing {
            return;
        }
        self.planets = Pool::empty();
        self.explosions = Pool::empty();
        self.clouds.clear();
        self.tracked.clear();
        self.player.dust.clear();
        self.phase = SessionPhase::Ended;
        log::info!("Session ended after {} ticks", self.ticks);
    }

    /// Body of a tracked entity, or `None` if it is free (not in play)
    pub fn body_of(&self, kind: EntityKind) -> Option<&Body> {
        match kind {
            EntityKind::Player => Some(&self.player.body),
            EntityKind::Planet(i) => self.planets.get(i).filter(|p| !p.is_free()).map(|p| &p.body),
            EntityKind::Explosion(i) => self
                .explosions
                .get(i)
                .filter(|e| !e.is_free())
                .map(|e| &e.body),
            EntityKind::Cloud(i) => self.clouds.get(i).map(|c| &c.body),
        }
    }

    /// Bodies of every tracked entity currently in play
    pub fn live_bodies(&self) -> impl Iterator<Item = (EntityKind, &Body)> {
        self.tracked
            .iter()
            .filter_map(|t| self.body_of(t.kind).map(|body| (t.kind, body)))
    }

    pub fn is_tracked(&self, id: EntityId) -> bool {
        self.tracked.iter().any(|t| t.id == id)
    }

    /// Player altitude percentage
    pub fn height_percent(&self, config: &GameConfig) -> f32 {
        height_percent(self.player.body.pos.y, config.ground)
    }

    /// Is there an active planet above the player within jumping reach?
    pub fn has_reachable_planet(&self, config: &GameConfig) -> bool {
        let player_y = self.player.body.pos.y;
        let reach = config.reach_height();
        self.planets.active().any(|planet| {
            let above = player_y - planet.body.pos.y;
            above > 0.0 && above <= reach
        })
    }

    /// Put a pooled planet in play. `None` when the pool is exhausted.
    pub fn spawn_planet(&mut self, config: &GameConfig) -> Option<usize> {
        let Some((index, planet)) = self.planets.first_free() else {
            log::trace!("Planet pool exhausted, skipping spawn");
            return None;
        };
        planet.activate(&mut self.rng, config.canvas.width);
        Some(index)
    }

    /// Start an explosion at `pos`. `None` when the pool is exhausted.
    pub fn trigger_explosion(&mut self, pos: glam::Vec2) -> Option<usize> {
        let Some((index, explosion)) = self.explosions.first_free() else {
            log::trace!("Explosion pool exhausted, skipping burst");
            return None;
        };
        explosion.activate(&mut self.rng, pos);
        Some(index)
    }
}
