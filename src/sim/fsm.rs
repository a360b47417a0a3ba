//! Player animation state machine
//!
//! The state is a plain enum; `next` evaluates the transition table once per
//! tick after physics. Each state maps to a sprite-sheet row and its own
//! frame count and playback rate, so animation pacing is independent of the
//! simulation step.

use serde::{Deserialize, Serialize};

use crate::consts::{APEX_EPSILON, WALK_THRESHOLD};

/// Player animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerAnimState {
    #[default]
    Idle,
    Walk,
    Rise,
    Fly,
}

/// What the transition table looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub pointer_distance: f32,
    pub vertical_force: f32,
    pub y: f32,
    pub ground: f32,
}

impl Motion {
    #[inline]
    fn grounded(&self) -> bool {
        self.y == self.ground
    }

    #[inline]
    fn ground_state(&self) -> PlayerAnimState {
        if self.pointer_distance > WALK_THRESHOLD {
            PlayerAnimState::Walk
        } else {
            PlayerAnimState::Idle
        }
    }
}

/// Sprite row, frame count and playback rate for a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimParams {
    pub row: u32,
    pub frames: u32,
    pub fps: u32,
}

impl PlayerAnimState {
    pub const ALL: [PlayerAnimState; 4] = [Self::Idle, Self::Walk, Self::Rise, Self::Fly];

    /// Animation table
    pub const fn params(self) -> AnimParams {
        match self {
            Self::Idle => AnimParams { row: 0, frames: 4, fps: 4 },
            Self::Walk => AnimParams { row: 1, frames: 6, fps: 8 },
            Self::Rise => AnimParams { row: 2, frames: 8, fps: 6 },
            Self::Fly => AnimParams { row: 3, frames: 4, fps: 8 },
        }
    }

    /// Evaluate the transition table
    pub fn next(self, m: &Motion) -> Self {
        match self {
            Self::Idle => {
                if m.pointer_distance > WALK_THRESHOLD && m.grounded() {
                    Self::Walk
                } else if m.vertical_force < 0.0 {
                    Self::Rise
                } else {
                    self
                }
            }
            Self::Walk => {
                if m.pointer_distance <= WALK_THRESHOLD && m.grounded() {
                    Self::Idle
                } else if m.vertical_force < 0.0 {
                    Self::Rise
                } else {
                    self
                }
            }
            Self::Rise => {
                if m.vertical_force >= 0.0 {
                    Self::Fly
                } else {
                    self
                }
            }
            Self::Fly => {
                // Hysteresis around the apex: only leave on a clear signal
                let rising = m.vertical_force < -APEX_EPSILON;
                if m.grounded() && !rising {
                    m.ground_state()
                } else if m.y < m.ground && rising {
                    Self::Rise
                } else {
                    self
                }
            }
        }
    }
}

/// Sprite-sheet cursor driven by its own fps timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteAnimation {
    pub frame_x: u32,
    pub frame_y: u32,
    pub max_frame: u32,
    pub fps: u32,
    /// Time accumulated toward the next frame (ms)
    pub timer: f32,
}

impl SpriteAnimation {
    pub fn new(state: PlayerAnimState) -> Self {
        let mut animation = Self {
            frame_x: 0,
            frame_y: 0,
            max_frame: 1,
            fps: 1,
            timer: 0.0,
        };
        animation.enter(state);
        animation
    }

    /// Configure row and pacing for a freshly entered state
    pub fn enter(&mut self, state: PlayerAnimState) {
        let params = state.params();
        self.frame_y = params.row;
        self.max_frame = params.frames;
        self.fps = params.fps;
        self.frame_x = 0;
        self.timer = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        let frame_interval = 1000.0 / self.fps as f32;
        self.timer += dt;
        while self.timer >= frame_interval {
            self.timer -= frame_interval;
            self.frame_x = (self.frame_x + 1) % self.max_frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlayerAnimState::*;

    const GROUND: f32 = 900.0;

    fn motion(pointer_distance: f32, vertical_force: f32, y: f32) -> Motion {
        Motion {
            pointer_distance,
            vertical_force,
            y,
            ground: GROUND,
        }
    }

    #[test]
    fn test_idle_transitions() {
        assert_eq!(Idle.next(&motion(0.0, 0.0, GROUND)), Idle);
        assert_eq!(Idle.next(&motion(2.0, 0.0, GROUND)), Idle);
        assert_eq!(Idle.next(&motion(3.0, 0.0, GROUND)), Walk);
        assert_eq!(Idle.next(&motion(0.0, -0.5, GROUND)), Rise);
        // Airborne and pointer far away: not a walk
        assert_eq!(Idle.next(&motion(50.0, 0.2, 500.0)), Idle);
        assert_eq!(Idle.next(&motion(50.0, -0.2, 500.0)), Rise);
    }

    #[test]
    fn test_walk_transitions() {
        assert_eq!(Walk.next(&motion(10.0, 0.0, GROUND)), Walk);
        assert_eq!(Walk.next(&motion(1.0, 0.0, GROUND)), Idle);
        assert_eq!(Walk.next(&motion(10.0, -0.62, GROUND)), Rise);
    }

    #[test]
    fn test_rise_to_fly_at_apex() {
        assert_eq!(Rise.next(&motion(0.0, -0.3, 500.0)), Rise);
        assert_eq!(Rise.next(&motion(0.0, 0.0, 500.0)), Fly);
        assert_eq!(Rise.next(&motion(0.0, 0.1, 500.0)), Fly);
    }

    #[test]
    fn test_fly_hysteresis_holds() {
        for force in [-0.01, -0.005, 0.0, 0.005, 0.01] {
            assert_eq!(Fly.next(&motion(0.0, force, 500.0)), Fly);
        }
        assert_eq!(Fly.next(&motion(0.0, -0.02, 500.0)), Rise);
        assert_eq!(Fly.next(&motion(0.0, 0.5, 500.0)), Fly);
    }

    #[test]
    fn test_fly_lands() {
        assert_eq!(Fly.next(&motion(0.0, 0.0, GROUND)), Idle);
        assert_eq!(Fly.next(&motion(40.0, 0.0, GROUND)), Walk);
        // Freshly bounced off something while touching the ground
        assert_eq!(Fly.next(&motion(40.0, -0.62, GROUND)), Fly);
    }

    #[test]
    fn test_each_state_has_distinct_row() {
        let rows: std::collections::HashSet<u32> =
            PlayerAnimState::ALL.iter().map(|s| s.params().row).collect();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_animation_paces_on_its_own_fps() {
        let mut anim = SpriteAnimation::new(Walk);
        assert_eq!(anim.frame_y, 1);
        assert_eq!(anim.max_frame, 6);
        // 8 fps → one frame every 125 ms
        anim.advance(100.0);
        assert_eq!(anim.frame_x, 0);
        anim.advance(30.0);
        assert_eq!(anim.frame_x, 1);
        anim.advance(125.0 * 5.0);
        assert_eq!(anim.frame_x, 0);

        anim.enter(Rise);
        assert_eq!((anim.frame_x, anim.frame_y, anim.max_frame, anim.fps), (0, 2, 8, 6));
    }
}
