use std::collections::VecDeque;

use tessera_engine::input::InputFrame;

use super::sink::InputSink;

/// Where typed characters come from.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextInputMode {
    /// The host's committed-text stream (`InputFrame::text`).
    #[default]
    HostEvents,
    /// Only what the application pushes with `TextInput::push_str`.
    Manual,
}

/// Text-input capability chosen at construction.
#[derive(Debug, Default)]
pub struct TextInput {
    mode: TextInputMode,
    queue: VecDeque<char>,
}

impl TextInput {
    pub fn new(mode: TextInputMode) -> Self {
        Self {
            mode,
            queue: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> TextInputMode {
        self.mode
    }

    /// Queues characters for the next frame. Honoured in either mode.
    pub fn push_str(&mut self, text: &str) {
        self.queue.extend(text.chars());
    }

    /// Forwards this frame's characters in arrival order. Tab is dropped;
    /// ImGui sees it as a key press already.
    pub fn forward<S>(&mut self, sink: &mut S, frame: &InputFrame)
    where
        S: InputSink + ?Sized,
    {
        let host = match self.mode {
            TextInputMode::HostEvents => Some(frame.chars()),
            TextInputMode::Manual => None,
        };
        let chars = host.into_iter().flatten().chain(self.queue.drain(..));
        for ch in chars.filter(|c| *c != '\t') {
            sink.input_character(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use tessera_engine::input::{TextEvent, TextOrigin};

    fn frame_with(texts: &[&str]) -> InputFrame {
        let mut frame = InputFrame::default();
        for t in texts {
            frame.text.push(TextEvent {
                text: (*t).to_string(),
                origin: TextOrigin::Keyboard,
            });
        }
        frame
    }

    #[test]
    fn host_text_is_forwarded_in_order_without_tabs() {
        let mut text = TextInput::new(TextInputMode::HostEvents);
        let mut sink = RecordingSink::default();
        text.forward(&mut sink, &frame_with(&["a", "\t", "bç"]));
        assert_eq!(sink.chars(), "abç");
    }

    #[test]
    fn manual_mode_ignores_host_stream() {
        let mut text = TextInput::new(TextInputMode::Manual);
        text.push_str("x\ty");
        let mut sink = RecordingSink::default();
        text.forward(&mut sink, &frame_with(&["ignored"]));
        assert_eq!(sink.chars(), "xy");

        let mut again = RecordingSink::default();
        text.forward(&mut again, &InputFrame::default());
        assert!(again.chars().is_empty());
    }
}
