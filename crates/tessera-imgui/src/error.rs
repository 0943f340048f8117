use std::fmt;
use std::path::PathBuf;

use crate::buffers::BufferKind;
use crate::texture::TextureHandle;

/// Failure while translating or uploading a frame.
///
/// Every variant aborts the current frame; the device viewport and scissor
/// are restored before the error reaches the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A draw command referenced a handle that is not in the registry.
    UnknownTexture(TextureHandle),

    /// The device refused a geometry buffer of `requested` bytes.
    BufferAllocation {
        kind: BufferKind,
        requested: u64,
        limit: u64,
    },

    /// Draw lists hold more elements than the frame's reported totals.
    StagingOverflow {
        kind: BufferKind,
        required: usize,
        capacity: usize,
    },

    TextureTooLarge {
        width: u32,
        height: u32,
        limit: u32,
    },

    /// Pixel data length does not match `width * height * 4`.
    TextureDataSize { expected: usize, actual: usize },

    EmptyTexture { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownTexture(handle) => {
                write!(f, "draw command references unknown texture {handle}")
            }
            RenderError::BufferAllocation { kind, requested, limit } => write!(
                f,
                "cannot allocate {kind} buffer of {requested} bytes (device limit {limit})"
            ),
            RenderError::StagingOverflow { kind, required, capacity } => write!(
                f,
                "{kind} staging overflow: {required} elements needed, capacity {capacity}"
            ),
            RenderError::TextureTooLarge { width, height, limit } => {
                write!(f, "texture {width}x{height} exceeds device limit {limit}")
            }
            RenderError::TextureDataSize { expected, actual } => {
                write!(f, "texture data is {actual} bytes, expected {expected}")
            }
            RenderError::EmptyTexture { width, height } => {
                write!(f, "texture {width}x{height} has no pixels")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Failure while building the font atlas.
#[derive(Debug)]
pub enum FontError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidFont {
        path: PathBuf,
        reason: String,
    },
    Upload(RenderError),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Io { path, source } => {
                write!(f, "cannot read font {}: {source}", path.display())
            }
            FontError::InvalidFont { path, reason } => {
                write!(f, "invalid font {}: {reason}", path.display())
            }
            FontError::Upload(e) => write!(f, "font atlas upload failed: {e}"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Io { source, .. } => Some(source),
            FontError::Upload(e) => Some(e),
            FontError::InvalidFont { .. } => None,
        }
    }
}

impl From<RenderError> for FontError {
    fn from(e: RenderError) -> Self {
        FontError::Upload(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_texture_names_the_handle() {
        let msg = RenderError::UnknownTexture(TextureHandle::new(7)).to_string();
        assert!(msg.contains('7'), "{msg}");
    }

    #[test]
    fn font_errors_name_the_path() {
        let err = FontError::InvalidFont {
            path: PathBuf::from("fonts/broken.ttf"),
            reason: "bad table".into(),
        };
        assert!(err.to_string().contains("fonts/broken.ttf"));
    }
}
