//! Scene player configuration.

use pixel_animation_core::Config;
use serde::{Deserialize, Serialize};

/// Where actors excluded from depth sorting are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsortedLayer {
    #[default]
    Below,
    Above,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Playback configuration handed to every actor.
    pub actor: Config,
    pub unsorted_layer: UnsortedLayer,
}
