//! The player: pointer-follow steering, jump physics and dust trail

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::fsm::{Motion, PlayerAnimState, SpriteAnimation};
use super::geom::{Body, EntityId};
use super::particle::Particle;
use crate::config::GameConfig;
use crate::consts::{TOP_BAND_RATIO, TOP_GRAVITY_BOOST};

/// Gravity multiplier near the top of the canvas: 1.0 below the top band,
/// ramping linearly to `TOP_GRAVITY_BOOST` at y = 0
pub fn gravity_delta(y: f32, canvas_height: f32) -> f32 {
    let band = canvas_height * TOP_BAND_RATIO;
    if band <= 0.0 || y >= band {
        return 1.0;
    }
    let depth = (1.0 - y.max(0.0) / band).clamp(0.0, 1.0);
    1.0 + depth * (TOP_GRAVITY_BOOST - 1.0)
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Facing / steering sign, -1 or +1
    pub dx: f32,
    /// Horizontal speed factor
    pub velocity: f32,
    /// Signed vertical force (negative is up)
    pub vertical_force: f32,
    /// Last known pointer position
    pub pointer: Vec2,
    /// Clamped horizontal distance to the pointer
    pub pointer_distance: f32,
    pub anim_state: PlayerAnimState,
    pub animation: SpriteAnimation,
    /// Dust trail emitted while rising
    pub dust: Vec<Particle>,
}

impl Player {
    /// Standing on the ground in the middle of the canvas
    pub fn new(id: EntityId, config: &GameConfig) -> Self {
        let pos = Vec2::new(config.canvas.width * 0.5, config.ground);
        Self {
            body: Body::new(id, config.hero.width, config.hero.height, pos),
            dx: 1.0,
            velocity: config.hero.velocity,
            vertical_force: 0.0,
            pointer: Vec2::ZERO,
            pointer_distance: 0.0,
            anim_state: PlayerAnimState::Idle,
            animation: SpriteAnimation::new(PlayerAnimState::Idle),
            dust: Vec::new(),
        }
    }

    #[inline]
    pub fn on_ground(&self, ground: f32) -> bool {
        self.body.pos.y == ground
    }

    /// Jump from the ground. Returns whether the impulse applied.
    pub fn try_jump(&mut self, config: &GameConfig) -> bool {
        if self.on_ground(config.ground) {
            self.vertical_force = -config.impulse_force;
            true
        } else {
            false
        }
    }

    /// Bounce off an obstacle, regardless of ground contact
    pub fn bounce(&mut self, config: &GameConfig) {
        self.vertical_force = -config.impulse_force;
    }

    /// Facing from the pointer side
    pub fn check_direction(&self) -> f32 {
        if self.pointer.x.floor() < self.body.pos.x {
            -1.0
        } else {
            1.0
        }
    }

    /// Horizontal distance to the pointer, capped
    pub fn pursuit_distance(&self, max_distance: f32) -> f32 {
        (self.pointer.x - self.body.pos.x).abs().floor().min(max_distance)
    }

    /// Speed grows with pointer distance up to the cap; no acceleration
    pub fn steer(&mut self, dt: f32, config: &GameConfig) {
        self.dx = self.check_direction();
        self.pointer_distance = self.pursuit_distance(config.hero.pointer_max_distance);
        self.body.pos.x += dt * self.dx * self.velocity * (self.pointer_distance / 10.0);
        self.body.pos.x = self.body.pos.x.clamp(0.0, config.canvas.width);
    }

    /// Euler step for the vertical axis, then clamp to [0, ground]
    pub fn integrate(&mut self, dt: f32, config: &GameConfig) {
        let delta = gravity_delta(self.body.pos.y, config.canvas.height);
        self.vertical_force -= config.gravity * dt * delta;
        self.body.pos.y += self.vertical_force * dt;

        if self.body.pos.y >= config.ground {
            self.body.pos.y = config.ground;
            self.vertical_force = 0.0;
        } else if self.body.pos.y <= 0.0 {
            self.body.pos.y = 0.0;
            self.vertical_force = self.vertical_force.max(0.0);
        }
    }

    pub fn motion(&self, ground: f32) -> Motion {
        Motion {
            pointer_distance: self.pointer_distance,
            vertical_force: self.vertical_force,
            y: self.body.pos.y,
            ground,
        }
    }

    /// Run the transition table; returns the new state when it changed
    pub fn handle_state_change(&mut self, rng: &mut impl Rng, ground: f32) -> Option<PlayerAnimState> {
        if self.anim_state == PlayerAnimState::Rise {
            self.dust.push(Particle::dust(rng, self.body.pos));
        }
        let next = self.anim_state.next(&self.motion(ground));
        if next == self.anim_state {
            return None;
        }
        log::trace!("Player {:?} -> {:?}", self.anim_state, next);
        self.anim_state = next;
        self.animation.enter(next);
        Some(next)
    }

    /// Full per-tick update: steering, physics, state machine, animation, dust
    pub fn update(&mut self, dt: f32, config: &GameConfig, rng: &mut impl Rng) {
        self.steer(dt, config);
        self.integrate(dt, config);
        self.handle_state_change(rng, config.ground);
        self.animation.advance(dt);

        let facing = self.dx;
        for particle in &mut self.dust {
            particle.update_dust(dt, facing);
        }
    }

    /// Drop dead dust
    pub fn sweep(&mut self) {
        self.dust.retain(|p| p.active);
    }

    /// Keep the hero sized and in bounds after a resize.
    ///
    /// `was_grounded` must be read against the ground line before it moved;
    /// a grounded hero follows the new ground in both directions.
    pub fn fit(&mut self, config: &GameConfig, was_grounded: bool) {
        self.body.width = config.hero.width;
        self.body.height = config.hero.height;
        self.body.pos.x = self.body.pos.x.clamp(0.0, config.canvas.width);
        if was_grounded {
            self.body.pos.y = config.ground;
            self.vertical_force = 0.0;
        } else {
            self.body.pos.y = self.body.pos.y.clamp(0.0, config.ground);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{POINTER_MAX_DISTANCE, REFERENCE_FRAME_MS};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameConfig, Player) {
        let config = GameConfig::default();
        let player = Player::new(EntityId(1), &config);
        (config, player)
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (config, mut player) = setup();
        assert!(player.try_jump(&config));
        assert_eq!(player.vertical_force, -config.impulse_force);

        player.integrate(REFERENCE_FRAME_MS, &config);
        assert!(player.body.pos.y < config.ground);
        let force = player.vertical_force;
        assert!(!player.try_jump(&config));
        assert_eq!(player.vertical_force, force);
    }

    #[test]
    fn test_bounce_works_midair() {
        let (config, mut player) = setup();
        player.body.pos.y = 300.0;
        player.vertical_force = 0.3;
        player.bounce(&config);
        assert_eq!(player.vertical_force, -config.impulse_force);
    }

    #[test]
    fn test_fit_follows_ground_only_when_grounded() {
        let (mut config, mut player) = setup();
        let grounded = player.on_ground(config.ground);
        config.resize(800.0, 1200.0);
        player.fit(&config, grounded);
        assert_eq!(player.body.pos.y, config.ground);

        // Mid-jump: keep the height, just stay in bounds
        player.body.pos.y = 300.0;
        player.vertical_force = -0.2;
        let grounded = player.on_ground(config.ground);
        config.resize(800.0, 1000.0);
        player.fit(&config, grounded);
        assert_eq!(player.body.pos.y, 300.0);
        assert_eq!(player.vertical_force, -0.2);
    }

    #[test]
    fn test_ground_clamp_zeroes_force() {
        let (config, mut player) = setup();
        player.body.pos.y = config.ground - 1.0;
        player.vertical_force = 0.5;
        player.integrate(REFERENCE_FRAME_MS, &config);
        assert_eq!(player.body.pos.y, config.ground);
        assert_eq!(player.vertical_force, 0.0);
    }

    #[test]
    fn test_resting_stays_on_ground() {
        let (config, mut player) = setup();
        for _ in 0..100 {
            player.integrate(REFERENCE_FRAME_MS, &config);
            assert!(player.on_ground(config.ground));
            assert_eq!(player.vertical_force, 0.0);
        }
    }

    #[test]
    fn test_ceiling_clamp() {
        let (config, mut player) = setup();
        player.body.pos.y = 5.0;
        player.vertical_force = -2.0;
        player.integrate(REFERENCE_FRAME_MS, &config);
        assert_eq!(player.body.pos.y, 0.0);
        assert!(player.vertical_force >= 0.0);
    }

    #[test]
    fn test_gravity_delta_grows_near_top() {
        assert_eq!(gravity_delta(500.0, 1000.0), 1.0);
        assert_eq!(gravity_delta(200.0, 1000.0), 1.0);
        assert!((gravity_delta(0.0, 1000.0) - TOP_GRAVITY_BOOST).abs() < 1e-6);
        assert!(gravity_delta(50.0, 1000.0) > gravity_delta(150.0, 1000.0));
    }

    #[test]
    fn test_pursuit_speed_scales_with_distance() {
        let (config, mut near) = setup();
        let mut far = near.clone();
        near.pointer = Vec2::new(near.body.pos.x + 20.0, 0.0);
        far.pointer = Vec2::new(far.body.pos.x + 200.0, 0.0);
        let x0 = near.body.pos.x;

        near.steer(REFERENCE_FRAME_MS, &config);
        far.steer(REFERENCE_FRAME_MS, &config);
        assert!(near.body.pos.x - x0 > 0.0);
        assert!(far.body.pos.x - x0 > near.body.pos.x - x0);
        assert_eq!(near.dx, 1.0);
    }

    #[test]
    fn test_pursuit_distance_clamps_at_max() {
        let (config, mut player) = setup();
        player.body.pos.x = 10.0;
        player.pointer = Vec2::new(10.0 + POINTER_MAX_DISTANCE + 300.0, 0.0);
        player.steer(REFERENCE_FRAME_MS, &config);
        assert_eq!(player.pointer_distance, POINTER_MAX_DISTANCE);
    }

    #[test]
    fn test_pointer_on_left_mirrors() {
        let (config, mut player) = setup();
        player.pointer = Vec2::new(player.body.pos.x - 100.0, 0.0);
        let x0 = player.body.pos.x;
        player.steer(REFERENCE_FRAME_MS, &config);
        assert_eq!(player.dx, -1.0);
        assert!(player.body.pos.x < x0);
    }

    #[test]
    fn test_steer_clamps_to_canvas() {
        let (config, mut player) = setup();
        player.body.pos.x = config.canvas.width - 1.0;
        player.pointer = Vec2::new(config.canvas.width + 1000.0, 0.0);
        player.steer(100.0, &config);
        assert_eq!(player.body.pos.x, config.canvas.width);
    }

    #[test]
    fn test_walks_toward_pointer() {
        let (config, mut player) = setup();
        let mut rng = Pcg32::seed_from_u64(1);
        player.pointer = Vec2::new(player.body.pos.x + 50.0, 0.0);
        player.update(REFERENCE_FRAME_MS, &config, &mut rng);
        assert_eq!(player.anim_state, PlayerAnimState::Walk);
        assert_eq!(player.animation.frame_y, 1);
    }

    #[test]
    fn test_full_jump_cycle() {
        let (config, mut player) = setup();
        let mut rng = Pcg32::seed_from_u64(2);
        player.pointer = player.body.pos;
        player.try_jump(&config);
        player.update(REFERENCE_FRAME_MS, &config, &mut rng);
        assert_eq!(player.anim_state, PlayerAnimState::Rise);

        let mut saw_fly = false;
        let mut dust_emitted = 0;
        for _ in 0..200 {
            let before = player.dust.len();
            let was_rising = player.anim_state == PlayerAnimState::Rise;
            player.update(REFERENCE_FRAME_MS, &config, &mut rng);
            if was_rising {
                dust_emitted += player.dust.len() - before;
            }
            player.sweep();
            saw_fly |= player.anim_state == PlayerAnimState::Fly;
            assert!(player.body.pos.y >= 0.0 && player.body.pos.y <= config.ground);
        }
        assert!(saw_fly);
        assert!(dust_emitted > 0);
        assert!(player.on_ground(config.ground));
        assert_eq!(player.anim_state, PlayerAnimState::Idle);
    }
}
