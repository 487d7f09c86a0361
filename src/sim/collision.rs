//! Axis-aligned bounding box collision
//!
//! Every entity is a sprite-sized rectangle anchored at its top-left corner.
//! Overlap is strict on all four sides: boxes that only share an edge do not
//! collide.

use glam::Vec2;

use super::state::SpriteSize;

/// An axis-aligned box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of a sprite drawn at `pos`
    #[inline]
    pub fn at(pos: Vec2, size: SpriteSize) -> Self {
        Self::new(pos.x, pos.y, size.width as f32, size.height as f32)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlap(self, other)
    }
}

/// Check whether two boxes overlap.
///
/// `a.x < b.right && a.right > b.x && a.y < b.bottom && a.bottom > b.y`.
/// Touching edges (equal coordinates) is not an overlap.
#[inline]
pub fn overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True if `rect` overlaps any box in `others`
pub fn overlaps_any<'a>(rect: &Rect, others: impl IntoIterator<Item = &'a Rect>) -> bool {
    others.into_iter().any(|other| overlap(rect, other))
}
