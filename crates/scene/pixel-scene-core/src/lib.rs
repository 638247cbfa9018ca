//! Pixel Scene Core
//!
//! Replays a scene timeline against a set of pixel actors. Each tick advances
//! a monotonic clock, applies every newly due event (place, unplace, animate,
//! move) exactly once and in time order, ticks every actor, then depth-sorts
//! the sortable actors by vertical position.

pub mod config;
pub mod data;
pub mod error;
pub mod scene;
pub mod stored_scene;
pub mod timeline;

pub use config::{SceneConfig, UnsortedLayer};
pub use data::{EventKind, SceneAction, SceneData, SceneOptions, TimelineEntry};
pub use error::SceneError;
pub use scene::{ActorSignal, AppliedEvent, Scene, SceneFrame};
pub use stored_scene::parse_scene_json;
pub use timeline::Timeline;
