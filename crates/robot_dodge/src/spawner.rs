//! Robot spawning
//!
//! Randomness comes from the caller's RNG so that seeded games replay
//! exactly.

use puddle_engine::foundation::math::{utils, Vec3};
use puddle_engine::physics::PlayArea;
use rand::Rng;

/// Where and how a new robot enters the play area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    /// Spawn position on the play-area perimeter
    pub position: Vec3,
    /// Velocity towards the target
    pub velocity: Vec3,
    /// Facing, in degrees about Y
    pub yaw_degrees: f32,
    /// Robot model index
    pub variant: usize,
}

/// Roll for a spawn this tick
pub fn should_spawn<R: Rng>(rng: &mut R, chance: f64) -> bool {
    rng.gen::<f64>() < chance
}

/// Velocity and facing for something at `from` heading for `target` at `speed`
///
/// Only the XZ plane counts. A zero direction gives a stationary result.
pub fn aim(from: &Vec3, target: &Vec3, speed: f32) -> (Vec3, f32) {
    let mut direction = target - from;
    direction.y = 0.0;
    let direction = direction.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);
    (direction * speed, utils::yaw_towards(&direction))
}

/// Pick a perimeter position and variant for a robot chasing `target`
pub fn plan_robot<R: Rng>(
    rng: &mut R,
    area: &PlayArea,
    target: &Vec3,
    speed: f32,
    variants: usize,
) -> SpawnPlan {
    let position = area.perimeter_point(rng.gen_range(0.0..1.0));
    let variant = if variants > 1 { rng.gen_range(0..variants) } else { 0 };
    let (velocity, yaw_degrees) = aim(&position, target, speed);

    SpawnPlan {
        position,
        velocity,
        yaw_degrees,
        variant,
    }
}
