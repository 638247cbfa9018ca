//! Scene asset data model.
//!
//! `{ width, height, options: { sortY, noSort }, pixels, timeline }` where each
//! timeline entry is `{ time, sprite, type, ...fields }`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneOptions {
    /// Depth-sort actors by vertical position every tick.
    pub sort_y: bool,
    /// Actor names kept out of the depth sort.
    pub no_sort: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneData {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub options: SceneOptions,
    /// Asset references, one actor each.
    #[serde(default)]
    pub pixels: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Scene time in milliseconds at which the event becomes due.
    pub time: f32,
    /// Name of the addressed actor.
    pub sprite: String,
    #[serde(flatten)]
    pub action: SceneAction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneAction {
    Place {
        x: f32,
        y: f32,
    },
    Unplace,
    Animate {
        animate: String,
        #[serde(default)]
        reverse: bool,
        /// Per-frame time override in milliseconds.
        #[serde(default, rename = "frameTime", skip_serializing_if = "Option::is_none")]
        frame_time: Option<f32>,
    },
    Move {
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ease: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Place,
    Unplace,
    Animate,
    Move,
}

impl SceneAction {
    pub fn kind(&self) -> EventKind {
        match self {
            SceneAction::Place { .. } => EventKind::Place,
            SceneAction::Unplace => EventKind::Unplace,
            SceneAction::Animate { .. } => EventKind::Animate,
            SceneAction::Move { .. } => EventKind::Move,
        }
    }
}
