//! Error types for loading and playing scenes

use pixel_animation_core::AnimationError;

/// Errors raised while building a scene or applying its timeline.
///
/// Timeline errors are reported per event; the player never stops on them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SceneError {
    /// Timeline event or host call addressing a name with no actor
    #[error("Actor not found: {name}")]
    UnknownActor { name: String },

    /// Scene `pixels` entry missing from the asset library
    #[error("Pixel asset not found: {name}")]
    UnknownAsset { name: String },

    #[error("Duplicate actor name: {name}")]
    DuplicateActor { name: String },

    #[error("Timeline event {index} is invalid: {reason}")]
    InvalidEvent { index: usize, reason: String },

    /// Actor-level failure (unknown animation, degenerate cycle, bad tween)
    #[error("Actor '{actor}': {source}")]
    Animation {
        actor: String,
        #[source]
        source: AnimationError,
    },

    #[error("Parse error: {reason}")]
    Parse { reason: String },
}

impl SceneError {
    pub(crate) fn animation(actor: &str, source: AnimationError) -> Self {
        SceneError::Animation {
            actor: actor.to_string(),
            source,
        }
    }

    /// Name of the actor the error concerns, if any.
    pub fn actor(&self) -> Option<&str> {
        match self {
            Self::UnknownActor { name } | Self::DuplicateActor { name } => Some(name),
            Self::Animation { actor, .. } => Some(actor),
            _ => None,
        }
    }
}
