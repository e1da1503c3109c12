//! Game configuration

use puddle_engine::config::{Config, ConfigError};
use puddle_engine::foundation::math::Vec3;
use puddle_engine::physics::PlayArea;
use puddle_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Rectangle robots spawn on and everything is culled against
    pub play_area: PlayArea,

    /// Camera settings
    pub camera: CameraConfig,

    /// Window settings
    pub window: WindowConfig,

    /// Mesh and texture paths
    pub assets: AssetsConfig,

    /// Frame driver settings
    pub engine: EngineConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Starting (and maximum) lives
    pub starting_lives: u32,

    /// Lives lost per robot hit
    pub damage: u32,

    /// Player speed in units/s
    pub player_speed: f32,

    /// Robot speed in units/s
    pub robot_speed: f32,

    /// Bullet speed in units/s
    pub bullet_speed: f32,

    /// Player collider radius
    pub player_radius: f32,

    /// Robot collider radius
    pub robot_radius: f32,

    /// Bullet collider radius
    pub bullet_radius: f32,

    /// Player model scale
    pub player_scale: f32,

    /// Robot model scale
    pub robot_scale: f32,

    /// Bullet model scale
    pub bullet_scale: f32,

    /// Probability of spawning a robot on each tick
    pub spawn_chance: f64,

    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Ask the frame driver to stop once the game is over
    pub exit_on_game_over: bool,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_lives: 5,
            damage: 1,
            player_speed: 5.0,
            robot_speed: 2.0,
            bullet_speed: 10.0,
            player_radius: 0.5,
            robot_radius: 0.3,
            bullet_radius: 0.3,
            player_scale: 0.4,
            robot_scale: 0.3,
            bullet_scale: 0.3,
            spawn_chance: 0.001,
            seed: None,
            exit_on_game_over: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position
    pub position: Vec3,

    /// Euler rotation in degrees
    pub rotation: Vec3,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Near clip plane
    pub near: f32,

    /// Far clip plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 0.0),
            rotation: Vec3::new(-65.0, 0.0, 0.0),
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            title: "Robot Dodge 3D".to_string(),
        }
    }
}

/// Mesh and texture pair for one kind of object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelAsset {
    /// Mesh path, relative to the asset root
    pub mesh: String,

    /// Texture path, relative to the asset root
    pub texture: String,
}

impl ModelAsset {
    fn new(mesh: &str, texture: &str) -> Self {
        Self {
            mesh: mesh.to_string(),
            texture: texture.to_string(),
        }
    }
}

/// Asset configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Asset root; relative roots resolve against the configuration file's directory
    pub root: String,

    /// Player model
    pub player: ModelAsset,

    /// Robot models, one per variant
    pub robots: Vec<ModelAsset>,

    /// Bullet model
    pub bullet: ModelAsset,

    /// Floor model
    pub floor: ModelAsset,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: "../assets".to_string(),
            player: ModelAsset::new("Robot/Robot.obj", "Robot/Robot.png"),
            robots: vec![
                ModelAsset::new("Robot1/Robot1.obj", "Robot1/Robot1.png"),
                ModelAsset::new("Robot2/Robot2.obj", "Robot2/Robot2.png"),
                ModelAsset::new("Robot3/Robot3.obj", "Robot3/Robot3.png"),
            ],
            bullet: ModelAsset::new("Bullet/Bullet.obj", "Bullet/Bullet.png"),
            floor: ModelAsset::new("Floor/Floor.obj", "floor.jpg"),
        }
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let gameplay = &self.gameplay;

        if gameplay.starting_lives == 0 {
            return Err(invalid("gameplay.starting_lives must be at least 1".to_string()));
        }

        for (name, value) in [
            ("player_speed", gameplay.player_speed),
            ("robot_speed", gameplay.robot_speed),
            ("bullet_speed", gameplay.bullet_speed),
            ("player_radius", gameplay.player_radius),
            ("robot_radius", gameplay.robot_radius),
            ("bullet_radius", gameplay.bullet_radius),
        ] {
            if !(value >= 0.0) {
                return Err(invalid(format!("gameplay.{} must be >= 0, got {}", name, value)));
            }
        }

        if !(0.0..=1.0).contains(&gameplay.spawn_chance) {
            return Err(invalid(format!(
                "gameplay.spawn_chance must be within [0, 1], got {}",
                gameplay.spawn_chance
            )));
        }

        if !self.play_area.is_valid() {
            return Err(invalid(format!(
                "play_area is inverted (left {} right {} top {} bottom {})",
                self.play_area.left, self.play_area.right, self.play_area.top, self.play_area.bottom
            )));
        }

        if self.assets.robots.is_empty() {
            return Err(invalid("assets.robots needs at least one robot variant".to_string()));
        }

        if self.engine.fixed_delta < 0.0 {
            return Err(invalid(format!(
                "engine.fixed_delta must be >= 0, got {}",
                self.engine.fixed_delta
            )));
        }

        Ok(())
    }
}
