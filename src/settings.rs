use std::time::Duration;

/// Default number of moves in a scramble.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Tunable behaviour of a [`crate::controller::Controller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Pause between consecutive moves of an algorithm, scramble or solution
    pub interval: Duration,
    /// Length of scrambles requested without an explicit length
    pub scramble_length: usize,
    /// Animation frames per move, used by renderers that animate
    pub animation_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: Duration::ZERO,
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            animation_frames: 0,
        }
    }
}
