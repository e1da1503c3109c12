//! Frame driver

use crate::{
    application::{AppError, Application},
    foundation::time::FrameClock,
    input::{InputDriver, KeyboardState},
    render::RenderTarget,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds simulated per frame in fixed-step mode
    pub fixed_delta: f32,

    /// Measure frame time with the wall clock instead of `fixed_delta`
    pub wall_clock: bool,

    /// Stop after this many frames; `None` runs until the application exits
    pub frame_limit: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_delta: 1.0 / 60.0,
            wall_clock: false,
            frame_limit: None,
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Rejected configuration
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    /// Frames updated and drawn
    pub frames: u64,
    /// Sum of the delta times handed to the application
    pub simulated_seconds: f32,
}

/// Main engine struct
///
/// Owns frame timing and keyboard state, and drives an [`Application`]
/// through update then draw, once per frame.
pub struct Engine {
    config: EngineConfig,
    clock: FrameClock,
    keyboard: KeyboardState,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        if !(config.fixed_delta >= 0.0 && config.fixed_delta.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "fixed_delta must be a finite, non-negative number of seconds, got {}",
                config.fixed_delta
            )));
        }

        log::info!("Initializing engine ({:?})", config);
        Ok(Self {
            config,
            clock: FrameClock::new(),
            keyboard: KeyboardState::new(),
        })
    }

    /// Run the frame loop until the frame limit or the application asks to exit
    ///
    /// Each frame polls `driver`, updates the keyboard state, then calls
    /// [`Application::update`], [`RenderTarget::begin_frame`] and
    /// [`Application::draw`]. An application
    /// error stops the loop and is returned.
    pub fn run<A, D, R>(&mut self, app: &mut A, driver: &mut D, target: &mut R) -> Result<RunStats, EngineError>
    where
        A: Application + ?Sized,
        D: InputDriver + ?Sized,
        R: RenderTarget,
    {
        log::info!("Starting main loop...");
        let start_frame = self.clock.frame_count();
        let start_time = self.clock.total_time();

        while !self.reached_frame_limit(start_frame) && !app.should_exit() {
            let frame = self.clock.frame_count();
            self.keyboard.update(driver.poll(frame));

            let delta_time = if self.config.wall_clock {
                self.clock.tick()
            } else {
                self.clock.tick_fixed(self.config.fixed_delta)
            };

            app.update(&self.keyboard, delta_time)?;
            target.begin_frame();
            app.draw(target)?;
        }

        let stats = RunStats {
            frames: self.clock.frame_count() - start_frame,
            simulated_seconds: self.clock.total_time() - start_time,
        };
        log::info!(
            "Main loop finished after {} frames ({:.2}s simulated)",
            stats.frames,
            stats.simulated_seconds
        );
        Ok(stats)
    }

    fn reached_frame_limit(&self, start_frame: u64) -> bool {
        self.config
            .frame_limit
            .is_some_and(|limit| self.clock.frame_count() - start_frame >= limit)
    }

    /// Keyboard state of the most recent frame
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
