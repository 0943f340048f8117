//! Dear ImGui adapter for tessera.
//!
//! Turns `imgui::DrawData` into indexed draws on a [`RenderDevice`] and feeds
//! host input into `imgui::Io` once per frame. The core (registry, buffer
//! manager, translator, input forwarder) is written against small traits so
//! it runs without a GPU or an ImGui context; `backend` binds those traits
//! to wgpu and [`ImguiRenderer`] wires everything to the engine's render
//! plumbing.
//!
//! Per-frame order:
//!
//! ```text
//! platform.prepare_frame(io, ...)   // input forward
//! let ui = imgui.new_frame();       // GUI frame begin
//! ...                               // caller GUI calls
//! let draw_data = imgui.render();   // GUI frame end
//! renderer.render(ctx, target, draw_data)
//! ```

pub mod backend;
pub mod buffers;
pub mod device;
pub mod draw;
mod error;
pub mod fonts;
pub mod input;
mod platform;
mod renderer;
pub mod texture;
pub mod translate;
pub mod vertex;

#[cfg(test)]
pub(crate) mod testing;

pub use buffers::BufferKind;
pub use error::{FontError, RenderError};
pub use fonts::{FontAtlasConfig, FontFile};
pub use input::{ClipboardMode, DisplayInfo, PlatformConfig, TextInputMode};
pub use platform::ImguiPlatform;
pub use renderer::ImguiRenderer;
pub use texture::{TextureHandle, TextureRegistry};
pub use translate::FrameStats;
