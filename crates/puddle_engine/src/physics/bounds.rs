//! Axis-aligned play area on the XZ ground plane

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Rectangular play area on the XZ plane
///
/// `left`/`right` bound X and `top`/`bottom` bound Z, with `top <= bottom`.
/// Points on the edge are inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    /// Minimum X
    pub left: f32,
    /// Maximum X
    pub right: f32,
    /// Minimum Z
    pub top: f32,
    /// Maximum Z
    pub bottom: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(-7.0, 6.0, -7.0, 1.0)
    }
}

impl PlayArea {
    /// Create a play area from its four edges
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Whether the edges are ordered (`left <= right`, `top <= bottom`)
    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Width along X
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Depth along Z
    pub fn depth(&self) -> f32 {
        self.bottom - self.top
    }

    /// Whether `position` lies inside or on the edge (Y is ignored)
    pub fn contains(&self, position: &Vec3) -> bool {
        !(position.x < self.left
            || position.z < self.top
            || position.x > self.right
            || position.z > self.bottom)
    }

    /// Point on the perimeter at parameter `t` in `[0, 1)`, walking
    /// top edge, right edge, bottom edge, left edge
    pub fn perimeter_point(&self, t: f32) -> Vec3 {
        let width = self.width();
        let depth = self.depth();
        let perimeter = 2.0 * (width + depth);
        if perimeter <= 0.0 {
            return Vec3::new(self.left, 0.0, self.top);
        }

        let mut distance = t.clamp(0.0, 1.0) * perimeter;
        if distance <= width {
            return Vec3::new(self.left + distance, 0.0, self.top);
        }
        distance -= width;
        if distance <= depth {
            return Vec3::new(self.right, 0.0, self.top + distance);
        }
        distance -= depth;
        if distance <= width {
            return Vec3::new(self.right - distance, 0.0, self.bottom);
        }
        distance -= width;
        Vec3::new(self.left, 0.0, (self.bottom - distance).max(self.top))
    }
}
