//! Transform with a lazily cached world matrix
//!
//! Position, rotation and scale are written through setters; every setter
//! marks the cached matrix dirty, and the next matrix read rebuilds it.
//! Rotation is stored as Euler angles in degrees, applied X then Y then Z,
//! and is never wrapped into a canonical range.

use std::cell::Cell;

use crate::foundation::math::{utils, Mat4, Quat, Vec3};

/// Build a world matrix from raw position/rotation/scale
///
/// Points are scaled first, then rotated, then translated. With column
/// vectors that is `T * R * S`.
pub fn compose_world_matrix(position: &Vec3, rotation_degrees: &Vec3, scale: &Vec3) -> Mat4 {
    let radians = utils::euler_deg_to_rad(rotation_degrees);
    let scale_matrix = Mat4::new_nonuniform_scaling(scale);
    let rotation_matrix = Quat::from_euler_angles(radians.x, radians.y, radians.z).to_homogeneous();
    let translation_matrix = Mat4::new_translation(position);

    translation_matrix * rotation_matrix * scale_matrix
}

/// Spatial state of one entity
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    cached_matrix: Cell<Mat4>,
    dirty: Cell<bool>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            cached_matrix: Cell::new(Mat4::identity()),
            dirty: Cell::new(true),
        }
    }
}

impl Transform {
    /// Create identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self::new().with_position(position)
    }

    /// Builder pattern: Set position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Builder pattern: Set rotation (Euler degrees)
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Builder pattern: Set scale (uniform)
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.set_scale(Vec3::new(scale, scale, scale));
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// World space position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler rotation in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Overwrite the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty.set(true);
    }

    /// Overwrite the rotation (Euler degrees, not normalized)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty.set(true);
    }

    /// Overwrite the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty.set(true);
    }

    /// Move by `delta`
    pub fn translate(&mut self, delta: Vec3) {
        self.set_position(self.position + delta);
    }

    /// Add `delta_degrees` to the rotation
    pub fn rotate(&mut self, delta_degrees: Vec3) {
        self.set_rotation(self.rotation + delta_degrees);
    }

    /// Whether the next matrix read will rebuild the matrix
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Local-to-world matrix, rebuilt only if a setter ran since the last read
    pub fn world_matrix(&self) -> Mat4 {
        if self.dirty.get() {
            let matrix = compose_world_matrix(&self.position, &self.rotation, &self.scale);
            self.cached_matrix.set(matrix);
            self.dirty.set(false);
            log::trace!("Rebuilt world matrix for position {:?}", self.position);
        }
        self.cached_matrix.get()
    }

    /// Unit vector along local +Z in world space
    pub fn forward(&self) -> Vec3 {
        self.basis_column(2)
    }

    /// Unit vector along local -X in world space
    pub fn right(&self) -> Vec3 {
        -self.basis_column(0)
    }

    /// Unit vector along local +Y in world space
    pub fn up(&self) -> Vec3 {
        self.basis_column(1)
    }

    fn basis_column(&self, column: usize) -> Vec3 {
        let matrix = self.world_matrix();
        Vec3::new(matrix[(0, column)], matrix[(1, column)], matrix[(2, column)]).normalize()
    }
}
