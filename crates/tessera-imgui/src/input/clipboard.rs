/// Clipboard backing requested at construction.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ClipboardMode {
    /// The OS clipboard; falls back to `Local` when unavailable.
    #[default]
    System,
    /// A clipboard private to this process.
    Local,
}

/// ImGui clipboard backend.
pub enum ClipboardProvider {
    System(arboard::Clipboard),
    Local(Option<String>),
}

impl ClipboardProvider {
    pub fn new(mode: ClipboardMode) -> Self {
        match mode {
            ClipboardMode::Local => ClipboardProvider::Local(None),
            ClipboardMode::System => match arboard::Clipboard::new() {
                Ok(cb) => ClipboardProvider::System(cb),
                Err(e) => {
                    log::warn!("system clipboard unavailable ({e}); using a local clipboard");
                    ClipboardProvider::Local(None)
                }
            },
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, ClipboardProvider::System(_))
    }
}

impl imgui::ClipboardBackend for ClipboardProvider {
    fn get(&mut self) -> Option<String> {
        match self {
            ClipboardProvider::System(cb) => cb.get_text().ok(),
            ClipboardProvider::Local(text) => text.clone(),
        }
    }

    fn set(&mut self, value: &str) {
        match self {
            ClipboardProvider::System(cb) => {
                if let Err(e) = cb.set_text(value) {
                    log::warn!("clipboard write failed: {e}");
                }
            }
            ClipboardProvider::Local(text) => *text = Some(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgui::ClipboardBackend;

    #[test]
    fn local_clipboard_roundtrip() {
        let mut cb = ClipboardProvider::new(ClipboardMode::Local);
        assert!(!cb.is_system());
        assert_eq!(cb.get(), None);
        cb.set("copied");
        assert_eq!(cb.get().as_deref(), Some("copied"));
    }
}
