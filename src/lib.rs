//! Skyhop - An altitude arcade game
//!
//! Core modules:
//! - `sim`: Simulation (player physics, pools, collisions, difficulty)
//! - `renderer`: Draw-surface abstraction and per-frame scene rendering
//! - `platform`: Input buffering, frame pacing and asset loading
//! - `config`: Data-driven game balance
//! - `game`: Orchestrator tying the loop together

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::{AssetError, ConfigError};
pub use game::Game;

/// Game configuration constants
pub mod consts {
    /// Target frame rate for the fixed-interval gate
    pub const FPS: f32 = 60.0;
    /// Largest elapsed time handed to a single tick (ms), avoids huge jumps after a hidden tab
    pub const MAX_FRAME_DT: f32 = 100.0;

    /// Default canvas size before the host reports the real one
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 1000.0;

    /// Ground line as a fraction of canvas height
    pub const GROUND_RATIO: f32 = 0.9;
    /// Hero size as a fraction of canvas height
    pub const HERO_SIZE_RATIO: f32 = 0.1;

    /// Hero defaults
    pub const HERO_SIZE: f32 = 100.0;
    /// Horizontal speed factor (px/ms per 10px of pointer distance)
    pub const HERO_VELOCITY: f32 = 0.02;
    /// Pursuit distance cap (px)
    pub const POINTER_MAX_DISTANCE: f32 = 450.0;
    /// Pursuit distance above which the hero walks instead of idling
    pub const WALK_THRESHOLD: f32 = 2.0;
    /// Hysteresis band around zero vertical force while flying
    pub const APEX_EPSILON: f32 = 0.01;

    /// Physics (y grows downward, gravity is negative as `force -= gravity * dt`)
    pub const GRAVITY: f32 = -0.001;
    pub const IMPULSE_FORCE: f32 = 0.62;
    /// Top band (fraction of canvas height) where gravity gets amplified
    pub const TOP_BAND_RATIO: f32 = 0.2;
    /// Gravity multiplier at the very top of the canvas
    pub const TOP_GRAVITY_BOOST: f32 = 1.5;

    /// Planet defaults
    pub const PLANET_DIAMETER: f32 = 24.0;
    pub const PLANET_MAXIMUM: usize = 12;
    /// Base falling speed (px/ms)
    pub const PLANET_FALLING_SPEED: f32 = 0.08;
    pub const PLANET_MIN_INTERVAL: f32 = 800.0;
    pub const PLANET_MAX_INTERVAL: f32 = 2000.0;

    /// Fraction of the theoretical jump height considered reachable
    pub const REACH_FACTOR: f32 = 0.8;
    /// Spawn interval multiplier when nothing is reachable
    pub const SAFETY_SPAWN_FACTOR: f32 = 0.35;

    /// Explosion defaults
    pub const EXPLOSION_MAXIMUM: usize = 6;
    pub const EXPLOSION_LIFETIME: f32 = 600.0;
    pub const EXPLOSION_MIN_PARTICLES: usize = 8;
    pub const EXPLOSION_MAX_PARTICLES: usize = 14;

    /// Cloud (particles container) defaults
    pub const CLOUD_COUNT: usize = 3;
    pub const CLOUD_PARTICLES: usize = 24;
    pub const CLOUD_HEIGHT: f32 = 60.0;
    pub const CLOUD_WIDTH_RATIO: f32 = 0.25;

    /// Reference frame duration used to convert per-frame decay into per-ms decay
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
}
