//! Render-sheet boundary.
//!
//! Rasterizing frames and packing them into an atlas belong to the host. The
//! core only registers frames by key and resolves keys to texture handles.

use hashbrown::HashMap;

use crate::data::FrameData;
use crate::ids::{IdAllocator, TextureId};

/// Sheet key of frame `index` of asset `name`.
pub fn frame_key(name: &str, index: usize) -> String {
    format!("{name}-{index}")
}

/// Texture atlas collaborator. Lookups must resolve synchronously.
pub trait RenderSheet {
    /// Register a drawable frame under `key`, returning its size.
    /// Re-adding an existing key replaces the frame.
    fn add_frame(&mut self, key: &str, frame: &FrameData) -> (u32, u32);

    fn exists(&self, key: &str) -> bool;

    fn get_texture(&self, key: &str) -> Option<TextureId>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetEntry {
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}

/// In-memory sheet that records frame sizes and hands out texture ids.
#[derive(Debug, Default)]
pub struct FrameSheet {
    ids: IdAllocator,
    entries: HashMap<String, SheetEntry>,
}

impl FrameSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, key: &str) -> Option<&SheetEntry> {
        self.entries.get(key)
    }

    /// Drop every frame and restart texture numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ids.reset();
    }
}

impl RenderSheet for FrameSheet {
    fn add_frame(&mut self, key: &str, frame: &FrameData) -> (u32, u32) {
        let texture = match self.entries.get(key) {
            Some(existing) => existing.texture,
            None => self.ids.alloc_texture(),
        };
        self.entries.insert(
            key.to_string(),
            SheetEntry {
                texture,
                width: frame.width,
                height: frame.height,
            },
        );
        (frame.width, frame.height)
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get_texture(&self, key: &str) -> Option<TextureId> {
        self.entries.get(key).map(|e| e.texture)
    }
}
