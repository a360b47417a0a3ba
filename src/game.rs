//! Game orchestrator
//!
//! Owns config, simulation state, the input buffer and the frame clock.
//! Hosts feed it input events and display-refresh callbacks; it decides
//! when a tick runs and draws the result.

use crate::config::GameConfig;
use crate::error::AssetError;
use crate::platform::{AssetCache, FrameClock, InputBuffer, REQUIRED_ASSETS};
use crate::renderer::{DrawSurface, render};
use crate::sim::{SessionPhase, SimulationState, TickReport, tick};

pub struct Game {
    pub config: GameConfig,
    pub state: SimulationState,
    input: InputBuffer,
    clock: FrameClock,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let state = SimulationState::new(seed, &config);
        let clock = FrameClock::new(config.fps_interval);
        Self {
            config,
            state,
            input: InputBuffer::new(),
            clock,
        }
    }

    /// Event listeners write here
    pub fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Start a session once every required image is in `assets`
    pub fn start<I>(&mut self, assets: &AssetCache<I>) -> Result<(), AssetError> {
        if let Some(path) = assets.missing(REQUIRED_ASSETS).first() {
            log::error!("Cannot start, {} is not loaded", path);
            return Err(AssetError::Missing(path.to_string()));
        }
        self.state.start(&self.config);
        self.clock.reset();
        Ok(())
    }

    pub fn end(&mut self) {
        self.state.end();
        self.clock.reset();
    }

    /// Host surface changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        let grounded = self.state.player.on_ground(self.config.ground);
        self.config.resize(width, height);
        self.state.player.fit(&self.config, grounded);
    }

    /// One display-refresh callback at `now` ms.
    ///
    /// Runs and draws a tick only when the frame interval has elapsed;
    /// returns its report in that case.
    pub fn frame(
        &mut self,
        now: f64,
        fg: &mut impl DrawSurface,
        bg: &mut impl DrawSurface,
    ) -> Option<TickReport> {
        let dt = self.clock.poll(now)?;
        let snapshot = self.input.snapshot();
        let report = tick(&mut self.state, &mut self.config, &snapshot, dt);
        render(&self.state, &self.config, fg, bg);
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HERO_SPRITE;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::PlayerAnimState;

    fn loaded() -> AssetCache<()> {
        let mut assets = AssetCache::new();
        assets.insert(HERO_SPRITE, ());
        assets
    }

    fn running(seed: u64) -> Game {
        let mut game = Game::new(GameConfig::default(), seed);
        game.start(&loaded()).unwrap();
        game
    }

    #[test]
    fn test_start_requires_assets() {
        let mut game = Game::new(GameConfig::default(), 1);
        let err = game.start(&AssetCache::<()>::new()).unwrap_err();
        assert_eq!(err, AssetError::Missing(HERO_SPRITE.to_string()));
        assert_eq!(game.phase(), SessionPhase::Before);

        game.start(&loaded()).unwrap();
        assert_eq!(game.phase(), SessionPhase::OnGoing);
    }

    #[test]
    fn test_frame_gating() {
        let mut game = running(2);
        let mut fg = RecordingSurface::new();
        let mut bg = RecordingSurface::new();
        let interval = game.config.fps_interval as f64;

        // First callback arms the clock
        assert!(game.frame(0.0, &mut fg, &mut bg).is_none());
        assert!(fg.commands.is_empty());
        assert!(game.frame(interval * 0.5, &mut fg, &mut bg).is_none());
        assert!(game.frame(interval, &mut fg, &mut bg).is_some());
        assert_eq!(game.state.ticks, 1);
        assert!(!fg.commands.is_empty());
    }

    #[test]
    fn test_pointer_down_jumps_once() {
        let mut game = running(3);
        let mut fg = RecordingSurface::new();
        let mut bg = RecordingSurface::new();
        let interval = game.config.fps_interval as f64;
        let pos = game.state.player.body.pos;

        game.frame(0.0, &mut fg, &mut bg);
        game.input_mut().pointer_move(pos.x, pos.y);
        game.input_mut().pointer_down();
        let report = game.frame(interval, &mut fg, &mut bg).unwrap();
        assert!(report.jumped);
        assert_eq!(game.state.player.anim_state, PlayerAnimState::Rise);

        let report = game.frame(interval * 2.0, &mut fg, &mut bg).unwrap();
        assert!(!report.jumped);
    }

    #[test]
    fn test_debug_key_draws_boxes() {
        let mut game = running(4);
        let mut fg = RecordingSurface::new();
        let mut bg = RecordingSurface::new();
        let interval = game.config.fps_interval as f64;

        game.frame(0.0, &mut fg, &mut bg);
        game.input_mut().key_down("D");
        game.frame(interval, &mut fg, &mut bg);
        assert!(game.config.debug);
        assert!(fg.count(|c| matches!(c, DrawCommand::StrokeRect(..))) > 0);

        game.input_mut().key_up();
        game.frame(interval * 2.0, &mut fg, &mut bg);
        assert!(!game.config.debug);
        assert_eq!(fg.count(|c| matches!(c, DrawCommand::StrokeRect(..))), 0);
    }

    #[test]
    fn test_resize_regrounds_player() {
        let mut game = running(5);
        game.resize(400.0, 500.0);
        assert_eq!(game.config.ground, 450.0);
        assert_eq!(game.state.player.body.pos.y, 450.0);
        assert_eq!(game.state.player.body.height, 50.0);
        assert!(game.state.player.body.pos.x <= 400.0);

        game.resize(0.0, 100.0);
        assert_eq!(game.config.canvas.width, 400.0);
    }

    #[test]
    fn test_grow_resize_keeps_player_grounded() {
        let mut game = running(7);
        game.resize(800.0, 1200.0);
        assert_eq!(game.config.ground, 1080.0);
        assert_eq!(game.state.player.body.pos.y, game.config.ground);
        assert_eq!(game.state.player.vertical_force, 0.0);

        // Still on the ground, so the next jump is honored
        let mut fg = RecordingSurface::new();
        let mut bg = RecordingSurface::new();
        let interval = game.config.fps_interval as f64;
        let pos = game.state.player.body.pos;
        game.frame(0.0, &mut fg, &mut bg);
        game.input_mut().pointer_move(pos.x, pos.y);
        game.input_mut().pointer_down();
        assert!(game.frame(interval, &mut fg, &mut bg).unwrap().jumped);
    }

    #[test]
    fn test_end_stops_ticking() {
        let mut game = running(6);
        let mut fg = RecordingSurface::new();
        let mut bg = RecordingSurface::new();
        game.end();
        assert_eq!(game.phase(), SessionPhase::Ended);
        game.frame(0.0, &mut fg, &mut bg);
        let report = game.frame(1000.0, &mut fg, &mut bg);
        assert_eq!(report, Some(TickReport::default()));
        assert_eq!(game.state.ticks, 0);
    }
}
