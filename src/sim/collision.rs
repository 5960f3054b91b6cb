//! Axis-aligned bounding boxes
//!
//! Every hit test in the simulation is a box/box test. Entities expose their
//! hit region through [`Aabb`] and the combat passes only ever ask two questions:
//! do these boxes overlap, and is this box fully inside that one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{OFFSCREEN_MARGIN, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Axis-aligned box in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn from_top_left(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Box from its center and half-extents
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test
    ///
    /// Boxes that merely touch along an edge do not intersect, and a box with
    /// zero width or height never intersects anything.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return false;
        }
        if other.width() <= 0.0 || other.height() <= 0.0 {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True if `inner` lies entirely within this box (edges inclusive)
    pub fn contains(&self, inner: &Aabb) -> bool {
        inner.min.x >= self.min.x
            && inner.max.x <= self.max.x
            && inner.min.y >= self.min.y
            && inner.max.y <= self.max.y
    }
}

/// True if a point has left the playfield plus the off-screen margin
#[inline]
pub fn is_off_bounds(pos: Vec2) -> bool {
    pos.x < -OFFSCREEN_MARGIN
        || pos.x > SCREEN_WIDTH + OFFSCREEN_MARGIN
        || pos.y < -OFFSCREEN_MARGIN
        || pos.y > SCREEN_HEIGHT + OFFSCREEN_MARGIN
}
