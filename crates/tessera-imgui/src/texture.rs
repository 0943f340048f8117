//! Texture handle registry.
//!
//! ImGui draw commands carry an opaque `TextureId`; the registry maps those
//! ids to whatever texture type the render device uses. Handles come from a
//! counter and are never reused, so a stale id can only ever miss.

use std::collections::HashMap;
use std::fmt;

use crate::error::RenderError;

/// Opaque id placed into ImGui draw commands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct TextureHandle(usize);

impl TextureHandle {
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> usize {
        self.0
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<imgui::TextureId> for TextureHandle {
    #[inline]
    fn from(id: imgui::TextureId) -> Self {
        Self(id.id())
    }
}

impl From<TextureHandle> for imgui::TextureId {
    #[inline]
    fn from(handle: TextureHandle) -> Self {
        imgui::TextureId::new(handle.0)
    }
}

/// Handle → texture map.
///
/// The registry holds the texture value only; it never talks to the device.
/// Dropping an unbound texture is up to the caller.
#[derive(Debug)]
pub struct TextureRegistry<T> {
    textures: HashMap<TextureHandle, T>,
    next: usize,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
            next: 0,
        }
    }
}

impl<T> TextureRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `texture` under a fresh handle.
    pub fn bind(&mut self, texture: T) -> TextureHandle {
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.textures.insert(handle, texture);
        handle
    }

    /// Removes the association. Unknown handles are ignored.
    pub fn unbind(&mut self, handle: TextureHandle) -> Option<T> {
        self.textures.remove(&handle)
    }

    pub fn resolve(&self, handle: TextureHandle) -> Result<&T, RenderError> {
        self.textures
            .get(&handle)
            .ok_or(RenderError::UnknownTexture(handle))
    }

    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
