//! # Robot Dodge
//!
//! Arcade game on Puddle Engine: dodge the robots that walk in from the edge
//! of the play area, shoot them, and survive as long as possible.

#![warn(missing_docs)]

pub mod autopilot;
pub mod components;
pub mod config;
pub mod game;
pub mod spawner;

pub use autopilot::Autopilot;
pub use components::{Bullet, Player, PlayerState, Robot};
pub use config::GameConfig;
pub use game::{GameError, HudState, RobotDodge};
