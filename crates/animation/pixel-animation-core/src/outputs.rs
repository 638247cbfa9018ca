//! Signals emitted while driving an actor.
//!
//! Instead of ambient event dispatch, every operation that can emit takes a
//! `&mut Vec<Signal>` and appends to it; callers drain the list per tick.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Signal {
    /// A new frame became current.
    Frame { frame: usize },
    /// Playback wrapped to step 0 of the current sequence.
    Loop,
    /// Playback switched to another named animation.
    Link { target: String },
    /// Playback ran past the last step.
    Stop { animation: Option<String> },
    /// A position tween reached its target.
    MoveDone,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Frame { .. } => "frame",
            Signal::Loop => "loop",
            Signal::Link { .. } => "link",
            Signal::Stop { .. } => "stop",
            Signal::MoveDone => "move-done",
        }
    }
}
