use std::time::Duration;

use tessera_engine::input::{InputFrame, InputState};

use crate::input::{
    ClipboardProvider, DisplayInfo, InputForwarder, InputSink, PlatformConfig, TextInput,
};

/// Input side of the adapter: forwarder, text capability and clipboard.
///
/// Owned by the application next to its `imgui::Context`; nothing here is
/// global.
#[derive(Debug)]
pub struct ImguiPlatform {
    forwarder: InputForwarder,
    text: TextInput,
    config: PlatformConfig,
}

impl ImguiPlatform {
    /// Installs the configured clipboard into `imgui` and disables the
    /// `imgui.ini` file.
    pub fn new(imgui: &mut imgui::Context, config: PlatformConfig) -> Self {
        let clipboard = ClipboardProvider::new(config.clipboard);
        log::debug!(
            "imgui platform: {} clipboard, {:?} text input",
            if clipboard.is_system() { "system" } else { "local" },
            config.text_input,
        );
        imgui.set_clipboard_backend(clipboard);
        imgui.set_ini_filename(None::<std::path::PathBuf>);

        Self {
            forwarder: InputForwarder::new(),
            text: TextInput::new(config.text_input),
            config,
        }
    }

    pub fn config(&self) -> PlatformConfig {
        self.config
    }

    /// Queues characters for the next `prepare_frame`.
    pub fn queue_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Forwards one frame of input. Call before `imgui::Context::new_frame`.
    pub fn prepare_frame<S>(
        &mut self,
        sink: &mut S,
        input: &InputState,
        frame: &InputFrame,
        dt: Duration,
        display: DisplayInfo,
    ) where
        S: InputSink + ?Sized,
    {
        self.forwarder.forward(sink, input, dt, display);
        self.text.forward(sink, frame);
    }
}
