//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame pacing
//! - Input events
//! - Image loading

pub mod assets;
pub mod input;
pub mod time;

pub use assets::{AssetCache, HERO_SPRITE, REQUIRED_ASSETS};
pub use input::InputBuffer;
pub use time::FrameClock;
