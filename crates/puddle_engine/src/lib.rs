//! # Puddle Engine
//!
//! A small, single-threaded entity/transform/collision runtime for
//! arcade-style 3D games.
//!
//! ## Features
//!
//! - **Cached Transforms**: position/rotation/scale with a lazily rebuilt world matrix
//! - **Colliders**: tagged collision volumes with an explicit pairwise dispatch table
//! - **Entity Store**: generational handles, so collider back-references never dangle
//! - **Resource Cache**: path-keyed memoization of expensive mesh loads
//! - **Frame Driver**: headless update/draw loop with polled keyboard input
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use puddle_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn update(&mut self, _input: &dyn InputSource, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn draw(&mut self, _target: &mut dyn RenderTarget) -> Result<(), AppError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     let mut driver = ScriptedInput::default();
//!     let mut target = DrawRecorder::default();
//!     engine.run(&mut MyApp, &mut driver, &mut target)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod ecs;
pub mod physics;
pub mod assets;
pub mod config;
pub mod input;
pub mod render;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineConfig, EngineError, RunStats};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError, RunStats,
        foundation::{
            math::{Vec3, Mat4, Quat},
            time::FrameClock,
        },
        ecs::{World, Entity, EntityId, Transform},
        physics::{Collider, ColliderKind, ColliderShape, CollisionError, PlayArea},
        assets::{AssetError, AssetLoader, MeshData, ObjLoader, ResourceCache},
        config::{Config, ConfigError},
        input::{InputDriver, InputSource, KeyboardState, Keys, ScriptedInput},
        render::{Camera, DrawRecorder, MeshHandle, RenderPayload, RenderTarget, TextureHandle},
    };
}
