//! Core configuration for pixel-animation-core.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Per-actor playback configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds per unit of frame duration when `animate` is given no explicit time.
    pub frame_time_ms: f32,

    /// Upper bound on consecutive Loop/Link redirects resolved without reaching a frame.
    pub max_redirects: usize,

    /// Upper bound on frames one `tick` may advance through.
    pub max_frames_per_tick: usize,

    /// Seed for the per-actor random source (range durations and unique picks).
    pub seed: u32,

    /// Easing used by tweens that do not name one.
    pub default_easing: Easing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_time_ms: 150.0,
            max_redirects: 64,
            max_frames_per_tick: 4096,
            seed: 0x9E37_79B9,
            default_easing: Easing::Linear,
        }
    }
}
