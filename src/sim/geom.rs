//! Positions, bodies and bounding boxes shared by every entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Entity position, center-anchored
pub type Position = Vec2;

/// Opaque unique entity identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Axis-aligned box, top-left anchored. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// Box of the given size centered on `center`
    pub fn centered(center: Position, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width * 0.5,
            y: center.y - height * 0.5,
            width,
            height,
        }
    }
}

/// The part every entity shares: identity, size and position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub width: f32,
    pub height: f32,
    pub pos: Position,
}

impl Body {
    pub fn new(id: EntityId, width: f32, height: f32, pos: Position) -> Self {
        Self {
            id,
            width,
            height,
            pos,
        }
    }

    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::centered(self.pos, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_is_center_anchored() {
        let body = Body::new(EntityId(1), 20.0, 10.0, Vec2::new(100.0, 50.0));
        let bbox = body.bounding_box();
        assert_eq!(bbox.x, 90.0);
        assert_eq!(bbox.y, 45.0);
        assert_eq!(bbox.width, 20.0);
        assert_eq!(bbox.height, 10.0);
    }
}
