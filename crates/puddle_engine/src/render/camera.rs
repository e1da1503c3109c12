//! Perspective camera

use crate::ecs::Transform;
use crate::foundation::math::{utils, Mat4};

/// Perspective camera placed by its own [`Transform`]
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera placement; the view matrix is its inverse world matrix
    pub transform: Transform,
    projection: Mat4,
}

impl Camera {
    /// Create a camera for a `width` x `height` viewport
    pub fn new(width: u32, height: u32, fov_degrees: f32, near: f32, far: f32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Self {
            transform: Transform::new(),
            projection: Mat4::new_perspective(aspect, utils::deg_to_rad(fov_degrees), near, far),
        }
    }

    /// Projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// World-to-camera matrix
    pub fn view(&self) -> Mat4 {
        self.transform.world_matrix().try_inverse().unwrap_or_else(|| {
            log::warn!("Camera transform is not invertible (zero scale?), using identity view");
            Mat4::identity()
        })
    }

    /// Combined view-projection for the current frame
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}
