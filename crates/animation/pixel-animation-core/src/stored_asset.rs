use std::sync::Arc;

use hashbrown::HashMap;

use crate::compile::compile_set;
use crate::data::{PixelAsset, PixelAssetData};
use crate::error::AnimationError;

/// Public API: parse a pixel-editor asset (`{ name, frames, animations }`)
/// and compile its animations.
///
/// Notes:
/// - Animation steps use the compact authored forms (see `data.rs`).
/// - Frame pixel data, when present, must hold `width * height` entries.
/// - Every frame index an animation can show must exist in `frames`.
pub fn parse_pixel_asset_json(s: &str) -> Result<PixelAsset, AnimationError> {
    let data: PixelAssetData = serde_json::from_str(s).map_err(|e| AnimationError::Parse {
        reason: e.to_string(),
    })?;
    PixelAsset::from_data(data)
}

impl PixelAsset {
    /// Validate frames and compile animations of already-deserialized asset data.
    pub fn from_data(data: PixelAssetData) -> Result<Self, AnimationError> {
        for (idx, frame) in data.frames.iter().enumerate() {
            let expected = frame.width as usize * frame.height as usize;
            if !frame.data.is_empty() && frame.data.len() != expected {
                return Err(AnimationError::Parse {
                    reason: format!(
                        "frame {idx} of '{}' has {} pixels, expected {expected}",
                        data.name,
                        frame.data.len()
                    ),
                });
            }
        }
        let animations = compile_set(&data.animations, Some(data.frames.len()))?;
        Ok(PixelAsset {
            name: data.name,
            frames: data.frames,
            animations: Arc::new(animations),
        })
    }
}

/// Loaded assets keyed by asset name; shared read-only by every actor.
#[derive(Clone, Debug, Default)]
pub struct AssetLibrary {
    assets: HashMap<String, Arc<PixelAsset>>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an asset, replacing any asset of the same name.
    pub fn insert(&mut self, asset: PixelAsset) -> Arc<PixelAsset> {
        let asset = Arc::new(asset);
        self.assets.insert(asset.name.clone(), Arc::clone(&asset));
        asset
    }

    /// Parse, compile and insert an asset from JSON.
    pub fn load_json(&mut self, s: &str) -> Result<Arc<PixelAsset>, AnimationError> {
        let asset = parse_pixel_asset_json(s)?;
        Ok(self.insert(asset))
    }

    pub fn get(&self, name: &str) -> Option<Arc<PixelAsset>> {
        self.assets.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
