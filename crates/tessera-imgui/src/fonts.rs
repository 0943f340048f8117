//! Font atlas initialization.
//!
//! Fonts are read and parsed up front, so a bad file leaves the current
//! atlas untouched. The atlas is then rebuilt, rasterized to RGBA8,
//! uploaded as one texture and registered; its handle replaces the previous
//! atlas handle in both the registry and ImGui.

use std::path::{Path, PathBuf};

use crate::device::TextureFactory;
use crate::error::FontError;
use crate::texture::{TextureHandle, TextureRegistry};

/// A TrueType/OpenType file to add to the atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFile {
    pub path: PathBuf,
    pub size_pixels: f32,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>, size_pixels: f32) -> Self {
        Self {
            path: path.into(),
            size_pixels,
        }
    }
}

/// Which fonts go into the atlas.
///
/// The built-in font comes first when included; files follow in order. The
/// first font added is ImGui's default font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontAtlasConfig {
    pub include_default_font: bool,
    pub fonts: Vec<FontFile>,
}

impl Default for FontAtlasConfig {
    fn default() -> Self {
        Self {
            include_default_font: true,
            fonts: Vec::new(),
        }
    }
}

/// A font ready to hand to the atlas.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSpec {
    /// ImGui's embedded font.
    Builtin,
    Ttf {
        name: String,
        data: Vec<u8>,
        size_pixels: f32,
    },
}

/// Rasterized atlas pixels, tightly packed RGBA8.
pub struct AtlasPixels<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
}

/// The font-atlas operations this module needs. Implemented for
/// `imgui::FontAtlas`.
pub trait AtlasTarget {
    /// Drops all fonts and pixel data.
    fn clear(&mut self);
    fn add_font(&mut self, font: &FontSpec);
    fn build_rgba32(&mut self) -> AtlasPixels<'_>;
    fn set_texture(&mut self, handle: TextureHandle);
    /// Releases the CPU-side pixels after upload.
    fn clear_pixels(&mut self);
}

impl AtlasTarget for imgui::FontAtlas {
    fn clear(&mut self) {
        imgui::FontAtlas::clear(self);
    }

    fn add_font(&mut self, font: &FontSpec) {
        match font {
            FontSpec::Builtin => {
                imgui::FontAtlas::add_font(self, &[imgui::FontSource::DefaultFontData { config: None }]);
            }
            FontSpec::Ttf {
                name,
                data,
                size_pixels,
            } => {
                imgui::FontAtlas::add_font(self, &[imgui::FontSource::TtfData {
                    data,
                    size_pixels: *size_pixels,
                    config: Some(imgui::FontConfig {
                        name: Some(name.clone()),
                        ..imgui::FontConfig::default()
                    }),
                }]);
            }
        }
    }

    fn build_rgba32(&mut self) -> AtlasPixels<'_> {
        let tex = self.build_rgba32_texture();
        AtlasPixels {
            width: tex.width,
            height: tex.height,
            rgba: tex.data,
        }
    }

    fn set_texture(&mut self, handle: TextureHandle) {
        self.tex_id = handle.into();
    }

    fn clear_pixels(&mut self) {
        self.clear_tex_data();
    }
}

/// Reads and validates every font `config` names, in atlas order.
///
/// With the built-in font excluded and no files listed, the built-in font is
/// used anyway so the atlas is never empty.
pub fn load_fonts(config: &FontAtlasConfig) -> Result<Vec<FontSpec>, FontError> {
    let mut specs = Vec::with_capacity(config.fonts.len() + 1);
    if config.include_default_font {
        specs.push(FontSpec::Builtin);
    }
    for file in &config.fonts {
        specs.push(load_font_file(&file.path, file.size_pixels)?);
    }
    if specs.is_empty() {
        log::debug!("no fonts configured; using the built-in font");
        specs.push(FontSpec::Builtin);
    }
    Ok(specs)
}

fn load_font_file(path: &Path, size_pixels: f32) -> Result<FontSpec, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    validate_font(path, &data)?;

    let name = path
        .file_name()
        .map(|n| format!("{}, {size_pixels}px", n.to_string_lossy()))
        .unwrap_or_else(|| format!("font, {size_pixels}px"));

    Ok(FontSpec::Ttf {
        name,
        data,
        size_pixels,
    })
}

/// Parses `data` as a font. ImGui aborts on malformed font data, so files
/// are checked before they reach it.
fn validate_font(path: &Path, data: &[u8]) -> Result<(), FontError> {
    fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
        .map(|_| ())
        .map_err(|reason| FontError::InvalidFont {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })
}

/// Rebuilds `atlas` from `config` and uploads it.
///
/// `previous` is the atlas handle from an earlier build; it is unbound once
/// the new texture is registered. Returns the new atlas handle.
pub fn build_font_atlas<A, F>(
    atlas: &mut A,
    config: &FontAtlasConfig,
    factory: &mut F,
    registry: &mut TextureRegistry<F::Texture>,
    previous: Option<TextureHandle>,
) -> Result<TextureHandle, FontError>
where
    A: AtlasTarget + ?Sized,
    F: TextureFactory,
{
    let fonts = load_fonts(config)?;

    atlas.clear();
    for font in &fonts {
        atlas.add_font(font);
    }

    let texture = {
        let pixels = atlas.build_rgba32();
        factory.create_rgba8("imgui font atlas", pixels.width, pixels.height, pixels.rgba)?
    };

    if let Some(old) = previous {
        registry.unbind(old);
    }
    let handle = registry.bind(texture);
    atlas.set_texture(handle);
    atlas.clear_pixels();

    log::info!("font atlas rebuilt: {} font(s), texture {handle}", fonts.len());
    Ok(handle)
}
