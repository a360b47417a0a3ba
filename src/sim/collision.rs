//! Collision detection
//!
//! Everything in Skyhop collides as axis-aligned boxes. The test is strict:
//! boxes that only share an edge do not overlap.

use super::geom::{Body, BoundingBox};

/// Strict AABB overlap test
#[inline]
pub fn boxes_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Overlap test between two entity bodies
#[inline]
pub fn bodies_collide(a: &Body, b: &Body) -> bool {
    boxes_overlap(&a.bounding_box(), &b.bounding_box())
}
