//! Keyboard input polling
//!
//! Input is polled once per frame from an [`InputDriver`] and turned into a
//! [`KeyboardState`], which applications read through [`InputSource`].

use bitflags::bitflags;

bitflags! {
    /// Set of game keys
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        /// Move towards -X
        const LEFT = 1 << 0;
        /// Move towards +X
        const RIGHT = 1 << 1;
        /// Move towards -Z
        const FORWARD = 1 << 2;
        /// Move towards +Z
        const BACK = 1 << 3;
        /// Fire
        const FIRE = 1 << 4;
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::empty()
    }
}

/// Read-only view of the keyboard for the current frame
pub trait InputSource {
    /// Whether every key in `keys` is held this frame
    fn is_key_down(&self, keys: Keys) -> bool;

    /// Whether every key in `keys` went down this frame
    fn is_key_pressed(&self, keys: Keys) -> bool;
}

/// Supplies the keys held at each frame
pub trait InputDriver {
    /// Keys held during frame `frame` (0-based)
    fn poll(&mut self, frame: u64) -> Keys;
}

impl<F> InputDriver for F
where
    F: FnMut(u64) -> Keys,
{
    fn poll(&mut self, frame: u64) -> Keys {
        self(frame)
    }
}

/// Held and just-pressed keys, advanced once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: Keys,
    pressed: Keys,
}

impl KeyboardState {
    /// Create a state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next frame with `held_now` held
    ///
    /// A key counts as pressed only on the frame it goes from up to down.
    pub fn update(&mut self, held_now: Keys) {
        self.pressed = held_now.difference(self.held);
        self.held = held_now;
    }

    /// Keys held this frame
    pub fn held(&self) -> Keys {
        self.held
    }

    /// Keys that went down this frame
    pub fn pressed(&self) -> Keys {
        self.pressed
    }
}

impl InputSource for KeyboardState {
    fn is_key_down(&self, keys: Keys) -> bool {
        self.held.contains(keys)
    }

    fn is_key_pressed(&self, keys: Keys) -> bool {
        self.pressed.contains(keys)
    }
}

/// Replays a fixed sequence of per-frame key sets
///
/// Frames past the end of the script hold nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<Keys>,
}

impl ScriptedInput {
    /// Script one key set per frame
    pub fn new(frames: Vec<Keys>) -> Self {
        Self { frames }
    }

    /// Number of scripted frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the script is empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputDriver for ScriptedInput {
    fn poll(&mut self, frame: u64) -> Keys {
        usize::try_from(frame)
            .ok()
            .and_then(|index| self.frames.get(index))
            .copied()
            .unwrap_or_default()
    }
}
