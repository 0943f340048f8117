use super::types::TextEvent;

/// Text committed since the last frame.
///
/// `InputState` holds what is down right now; this holds the text stream
/// that has no pollable equivalent. The runtime clears it after every
/// `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Text committed this frame, in arrival order.
    pub text: Vec<TextEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Committed characters of this frame, in arrival order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.text.iter().flat_map(|t| t.text.chars())
    }
}
