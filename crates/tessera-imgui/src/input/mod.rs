//! Host input → ImGui.
//!
//! Once per frame, before `new_frame`, the [`InputForwarder`] samples the
//! engine's `InputState` (keys through [`translate_key`], modifiers, mouse,
//! wheel) and [`TextInput`] flushes committed characters. Both write to an
//! [`InputSink`], which `imgui::Io` implements.

mod clipboard;
mod forward;
pub mod keymap;
mod sink;
mod text;

pub use clipboard::{ClipboardMode, ClipboardProvider};
pub use forward::{InputForwarder, wheel_delta};
pub use keymap::translate_key;
pub use sink::InputSink;
pub use text::{TextInput, TextInputMode};

/// Display geometry for the frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayInfo {
    /// Display size in logical pixels.
    pub size: [f32; 2],
    /// Framebuffer pixels per logical pixel.
    pub framebuffer_scale: f32,
}

impl DisplayInfo {
    pub fn new(size: [f32; 2]) -> Self {
        Self {
            size,
            framebuffer_scale: 1.0,
        }
    }

    /// Same size, with the host's DPI factor as framebuffer scale.
    pub fn with_scale(self, framebuffer_scale: f32) -> Self {
        Self {
            framebuffer_scale,
            ..self
        }
    }
}

/// Input capabilities of an `ImguiPlatform`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PlatformConfig {
    pub clipboard: ClipboardMode,
    pub text_input: TextInputMode,
}
