//! Seeded input driver for headless runs

use puddle_engine::input::{InputDriver, Keys};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MOVEMENT: Keys = Keys::LEFT.union(Keys::RIGHT).union(Keys::FORWARD).union(Keys::BACK);

/// Wanders in random directions and fires at a fixed cadence
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: StdRng,
    hold_frames: u64,
    fire_every: u64,
    heading: Keys,
}

impl Autopilot {
    /// Create an autopilot that picks a new heading every `hold_frames`
    /// frames and taps fire every `fire_every` frames
    pub fn new(seed: u64, hold_frames: u64, fire_every: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            hold_frames: hold_frames.max(1),
            fire_every: fire_every.max(2),
            heading: Keys::empty(),
        }
    }
}

impl InputDriver for Autopilot {
    fn poll(&mut self, frame: u64) -> Keys {
        if frame % self.hold_frames == 0 {
            self.heading = Keys::from_bits_truncate(self.rng.gen()) & MOVEMENT;
        }

        let mut keys = self.heading;
        if frame % self.fire_every == 0 {
            keys |= Keys::FIRE;
        }
        keys
    }
}
