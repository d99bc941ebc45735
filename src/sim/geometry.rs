//! Axis-aligned rectangle geometry
//!
//! Every collision test in the simulation is an AABB overlap test.
//! Coordinates are screen space: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Distances from a point to the left, right, top and bottom edges
    pub fn edge_distances(&self, p: Vec2) -> EdgeDistances {
        EdgeDistances {
            left: (p.x - self.left()).abs(),
            right: (p.x - self.right()).abs(),
            top: (p.y - self.top()).abs(),
            bottom: (p.y - self.bottom()).abs(),
        }
    }
}

/// Point-to-edge distances for a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistances {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl EdgeDistances {
    /// True when a vertical edge is nearest; ties resolve to the vertical edge
    pub fn nearest_is_side(&self) -> bool {
        let min = self.left.min(self.right).min(self.top).min(self.bottom);
        min == self.left || min == self.right
    }
}
