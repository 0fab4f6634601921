//! Collision geometry shared by both engines
//!
//! Everything is axis-aligned: boxes are anchored at their top-left corner,
//! circles at their centre. Steering math goes through [`direction_to`] so a
//! zero distance never reaches position state as NaN.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Distances below this are treated as "on top of each other"
pub const MIN_STEER_DISTANCE: f32 = 1e-4;

/// Axis-aligned bounding box
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

    /// Box with its top-left corner at `pos`
    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    /// Box of size `w`x`h` centred on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Grow (positive) or shrink (negative) on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2.0,
            self.h + margin * 2.0,
        )
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rect_overlap(self, other)
    }
}

/// Strict AABB overlap
#[inline]
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Euclidean distance
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Circle proximity: centres closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Unit vector from `from` toward `to`, or `None` when they coincide
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist < MIN_STEER_DISTANCE || !dist.is_finite() {
        None
    } else {
        Some(delta / dist)
    }
}

/// Index of the point closest to `origin`
pub fn nearest<'a, I>(origin: Vec2, points: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Vec2>,
{
    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| (i, origin.distance_squared(*p)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
