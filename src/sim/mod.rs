//! Simulation module
//!
//! All gameplay logic lives here:
//! - Times in milliseconds, y grows downward
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod explosion;
pub mod fsm;
pub mod geom;
pub mod particle;
pub mod planet;
pub mod player;
pub mod pool;
pub mod state;
pub mod tick;

pub use collision::{bodies_collide, boxes_overlap};
pub use explosion::Explosion;
pub use fsm::{AnimParams, PlayerAnimState, SpriteAnimation};
pub use geom::{Body, BoundingBox, EntityId, Position};
pub use particle::{Color, ContainedParticle, Particle, ParticlesContainer};
pub use planet::{Planet, accelerator, height_percent};
pub use player::Player;
pub use pool::{Pool, Poolable};
pub use state::{EntityKind, SessionPhase, SimulationState, TrackedEntity};
pub use tick::{InputSnapshot, TickReport, tick};
