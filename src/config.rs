//! Game configuration
//!
//! Immutable during a tick: only the orchestrator mutates it (resize, debug
//! flag). Overrides can be supplied as JSON; missing fields keep defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Hero (player) tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed factor
    pub velocity: f32,
    /// Pursuit distance cap (px)
    pub pointer_max_distance: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            width: HERO_SIZE,
            height: HERO_SIZE,
            velocity: HERO_VELOCITY,
            pointer_max_distance: POINTER_MAX_DISTANCE,
        }
    }
}

/// Falling planet tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    pub diameter: f32,
    /// Pool size
    pub maximum: usize,
    /// Base falling speed (px/ms)
    pub falling_speed: f32,
    /// Spawn interval bounds (ms)
    pub min_interval: f32,
    pub max_interval: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            diameter: PLANET_DIAMETER,
            maximum: PLANET_MAXIMUM,
            falling_speed: PLANET_FALLING_SPEED,
            min_interval: PLANET_MIN_INTERVAL,
            max_interval: PLANET_MAX_INTERVAL,
        }
    }
}

/// Explosion pool tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub maximum: usize,
    /// Maximum lifetime (ms)
    pub lifetime: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            maximum: EXPLOSION_MAXIMUM,
            lifetime: EXPLOSION_LIFETIME,
        }
    }
}

/// Drawable surface size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub hero: HeroConfig,
    pub planet: PlanetConfig,
    pub explosion: ExplosionConfig,
    pub fps: f32,
    /// Target interval between executed ticks (ms), derived from `fps`
    #[serde(skip)]
    pub fps_interval: f32,
    /// Negative: `force -= gravity * dt` pulls toward larger y
    pub gravity: f32,
    pub impulse_force: f32,
    /// Resting y of the hero's center, recomputed on resize
    #[serde(skip)]
    pub ground: f32,
    #[serde(skip)]
    pub canvas: CanvasSize,
    /// Number of cloud containers per session
    pub clouds: usize,
    /// Bounding-box overlay, recomputed every tick from the key set
    #[serde(skip)]
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut config = Self {
            hero: HeroConfig::default(),
            planet: PlanetConfig::default(),
            explosion: ExplosionConfig::default(),
            fps: FPS,
            fps_interval: 1000.0 / FPS,
            gravity: GRAVITY,
            impulse_force: IMPULSE_FORCE,
            ground: 0.0,
            canvas: CanvasSize::default(),
            clouds: CLOUD_COUNT,
            debug: false,
        };
        config.resize(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT);
        config
    }
}

impl GameConfig {
    /// Parse JSON overrides on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: GameConfig = serde_json::from_str(json)?;
        config.fps_interval = 1000.0 / config.fps;
        config.validate()?;
        let CanvasSize { width, height } = config.canvas;
        config.resize(width, height);
        Ok(config)
    }

    /// Load overrides from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("fps", self.fps),
            ("impulse_force", self.impulse_force),
            ("hero.velocity", self.hero.velocity),
            ("hero.pointer_max_distance", self.hero.pointer_max_distance),
            ("planet.diameter", self.planet.diameter),
            ("planet.falling_speed", self.planet.falling_speed),
            ("planet.min_interval", self.planet.min_interval),
            ("explosion.lifetime", self.explosion.lifetime),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.planet.min_interval > self.planet.max_interval {
            return Err(ConfigError::InvertedInterval {
                min: self.planet.min_interval,
                max: self.planet.max_interval,
            });
        }
        if self.gravity.is_nan() || self.gravity >= 0.0 {
            return Err(ConfigError::Gravity(self.gravity));
        }
        Ok(())
    }

    /// Host reported new surface dimensions
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas = CanvasSize { width, height };
        self.ground = height * GROUND_RATIO;
        self.hero.width = height * HERO_SIZE_RATIO;
        self.hero.height = height * HERO_SIZE_RATIO;
        log::debug!("Resized to {}x{}, ground at {}", width, height, self.ground);
    }

    /// Theoretical jump apex height from a standing impulse (`v² / 2g`)
    pub fn max_jump_height(&self) -> f32 {
        self.impulse_force * self.impulse_force / (2.0 * self.gravity.abs())
    }

    /// Height above which a planet counts as unreachable
    pub fn reach_height(&self) -> f32 {
        self.max_jump_height() * REACH_FACTOR
    }
}
