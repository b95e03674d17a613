//! Axis-aligned box geometry for hitboxes and posture resizing
//!
//! Screen space: x grows right, y grows down. A box is its top-left corner
//! plus a size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// A box scaled by `scale` about this box's center
    pub fn inset(&self, scale: f32) -> Aabb {
        let size = self.size * scale;
        Aabb {
            pos: self.pos + (self.size - size) / 2.0,
            size,
        }
    }
}

/// Edge that stays fixed when a box is resized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Bottom,
}

/// Resize a box keeping the anchored edge in place.
///
/// Resizing to (w1, h1) and then back to the original size restores the
/// original box.
pub fn resize(current: Aabb, new_width: f32, new_height: f32, anchor: Anchor) -> Aabb {
    match anchor {
        Anchor::Bottom => Aabb::new(
            current.pos.x,
            current.pos.y - (new_height - current.size.y),
            new_width,
            new_height,
        ),
    }
}

/// Anything the player can collide with.
///
/// Objects without an inset report their full display box.
pub trait Collidable {
    fn display_box(&self) -> Aabb;

    fn hitbox(&self) -> Aabb {
        self.display_box()
    }
}
