//! Input hand-off between event listeners and the loop
//!
//! Listeners are the only writers; the loop takes one snapshot per executed
//! tick. Last pointer position wins, the down edge latches until consumed,
//! and releasing any key clears the whole held set.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::InputSnapshot;

/// Single-writer input buffer
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    /// Zero until the first pointer event
    pointer: Vec2,
    jump_pending: bool,
    keys: HashSet<String>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouse move / touch move in surface coordinates
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = Vec2::new(x, y);
        }
    }

    /// Mouse down / touch start
    pub fn pointer_down(&mut self) {
        self.jump_pending = true;
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase());
    }

    /// Any key release clears every held key
    pub fn key_up(&mut self) {
        self.keys.clear();
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Read the current input and consume the down edge
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer,
            jump: std::mem::take(&mut self.jump_pending),
            keys: self.keys.clone(),
        }
    }
}
