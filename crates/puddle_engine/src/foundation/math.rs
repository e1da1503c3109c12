//! Math utilities and types
//!
//! Thin aliases over `nalgebra` so the rest of the engine reads in terms of
//! `Vec3`/`Mat4`, plus the degree helpers the transform model needs.

pub use nalgebra::{Matrix4, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Convert a vector of Euler angles from degrees to radians, component-wise
    pub fn euler_deg_to_rad(degrees: &Vec3) -> Vec3 {
        degrees.map(deg_to_rad)
    }

    /// Yaw (rotation about +Y, in degrees) that turns local +Z towards `direction`
    ///
    /// Only the X and Z components are considered. A zero direction yields 0.
    pub fn yaw_towards(direction: &Vec3) -> f32 {
        rad_to_deg(direction.x.atan2(direction.z))
    }
}
