//! Identifiers and simple allocators for render-sheet textures.

use serde::{Deserialize, Serialize};

/// Opaque texture handle returned by a [`crate::sheet::RenderSheet`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Monotonic allocator for TextureId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_texture: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_texture(&mut self) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture = self.next_texture.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_texture(), TextureId(0));
        assert_eq!(alloc.alloc_texture(), TextureId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_texture(), TextureId(0));
    }
}
