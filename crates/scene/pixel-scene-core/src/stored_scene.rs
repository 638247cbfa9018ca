use crate::data::SceneData;
use crate::error::SceneError;

/// Public API: parse a scene asset
/// (`{ width, height, options, pixels, timeline }`).
///
/// Timeline entries may appear in any order; the player sorts them by time.
pub fn parse_scene_json(s: &str) -> Result<SceneData, SceneError> {
    serde_json::from_str(s).map_err(|e| SceneError::Parse {
        reason: e.to_string(),
    })
}
