//! Application trait driven by the frame loop

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::input::InputSource;
use crate::physics::CollisionError;
use crate::render::RenderTarget;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to run a game on the engine's frame driver.
pub trait Application {
    /// Advance the simulation by `delta_time` seconds
    ///
    /// Called once per frame with that frame's keyboard state. `delta_time`
    /// is never negative.
    fn update(&mut self, input: &dyn InputSource, delta_time: f32) -> Result<(), AppError>;

    /// Submit this frame's draws
    ///
    /// Called after `update`, every frame.
    fn draw(&mut self, target: &mut dyn RenderTarget) -> Result<(), AppError>;

    /// Whether the frame driver should stop before the next frame
    fn should_exit(&self) -> bool {
        false
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Collision test failed
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
