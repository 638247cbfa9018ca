//! Sprite capability interface.
//!
//! The interpreter and tweens never own a scene-graph node; they write through
//! this trait, implemented by whatever node type the host renderer provides.

use serde::{Deserialize, Serialize};

use crate::ids::TextureId;

pub trait SpriteTarget {
    fn position(&self) -> [f32; 2];
    fn set_position(&mut self, position: [f32; 2]);

    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, radians: f32);

    fn scale(&self) -> [f32; 2];
    fn set_scale(&mut self, scale: [f32; 2]);

    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    fn texture_key(&self) -> Option<&str>;
    /// `texture` is `None` when the sheet has no frame under `key`.
    fn set_texture(&mut self, key: &str, texture: Option<TextureId>);
}

/// Plain record implementation, read by the host renderer each frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteNode {
    pub position: [f32; 2],
    pub rotation: f32,
    pub scale: [f32; 2],
    pub visible: bool,
    pub texture_key: Option<String>,
    pub texture: Option<TextureId>,
}

impl Default for SpriteNode {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            rotation: 0.0,
            scale: [1.0, 1.0],
            visible: true,
            texture_key: None,
            texture: None,
        }
    }
}

impl SpriteTarget for SpriteNode {
    fn position(&self) -> [f32; 2] {
        self.position
    }

    fn set_position(&mut self, position: [f32; 2]) {
        self.position = position;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    fn scale(&self) -> [f32; 2] {
        self.scale
    }

    fn set_scale(&mut self, scale: [f32; 2]) {
        self.scale = scale;
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn texture_key(&self) -> Option<&str> {
        self.texture_key.as_deref()
    }

    fn set_texture(&mut self, key: &str, texture: Option<TextureId>) {
        self.texture_key = Some(key.to_string());
        self.texture = texture;
    }
}
