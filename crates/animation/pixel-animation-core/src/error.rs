//! Error types for compiling and playing pixel animations

/// Errors raised while compiling animation definitions or driving an actor.
///
/// Every variant is recoverable at actor granularity: playback errors force
/// the actor idle, compile errors reject the asset before any actor uses it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    /// `animate(name)` for a name absent from the animation set
    #[error("Animation not found: {name}")]
    UnknownAnimation { name: String },

    /// Loop/Link chain resolved more steps than the redirect bound allows
    #[error("Degenerate animation cycle in '{animation}' after {redirects} redirects")]
    DegenerateCycle { animation: String, redirects: usize },

    /// Range with min > max, non-positive count, or a unique step with too few choices
    #[error("Invalid duration in '{animation}' step {step}: {reason}")]
    InvalidDuration {
        animation: String,
        step: usize,
        reason: String,
    },

    /// A sequence that compiles to zero steps
    #[error("Animation '{animation}' has no steps")]
    EmptyAnimation { animation: String },

    /// Link step targeting an animation the set does not define
    #[error("Animation '{animation}' step {step} links to unknown animation '{target}'")]
    UnknownLinkTarget {
        animation: String,
        step: usize,
        target: String,
    },

    /// Step referencing a frame the asset does not have
    #[error("Animation '{animation}' references frame {frame} but the asset has {frame_count} frames")]
    FrameOutOfRange {
        animation: String,
        frame: usize,
        frame_count: usize,
    },

    #[error("Easing function not found: {name}")]
    UnknownEasing { name: String },

    #[error("Invalid tween: {reason}")]
    InvalidTween { reason: String },

    #[error("Invalid per-frame time scale: {value}")]
    InvalidTimeScale { value: f32 },

    /// Non-finite elapsed time passed to a tick
    #[error("Invalid elapsed time: {value}")]
    InvalidElapsed { value: f32 },

    #[error("Parse error: {reason}")]
    Parse { reason: String },
}

impl AnimationError {
    /// Errors raised by a running actor (as opposed to asset compilation).
    #[inline]
    pub fn is_playback_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownAnimation { .. }
                | Self::DegenerateCycle { .. }
                | Self::UnknownEasing { .. }
                | Self::InvalidTween { .. }
                | Self::InvalidTimeScale { .. }
                | Self::InvalidElapsed { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownAnimation { .. } | Self::UnknownLinkTarget { .. } => "lookup",
            Self::DegenerateCycle { .. } => "cycle",
            Self::InvalidDuration { .. }
            | Self::EmptyAnimation { .. }
            | Self::FrameOutOfRange { .. } => "compile",
            Self::UnknownEasing { .. } | Self::InvalidTween { .. } => "tween",
            Self::InvalidTimeScale { .. } | Self::InvalidElapsed { .. } => "playback",
            Self::Parse { .. } => "parse",
        }
    }
}
