use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Pollable input state for one window.
///
/// Events are folded in as they arrive; consumers read the result once per
/// frame (the ImGui input forwarder samples every key through `key_down`).
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,

    /// Cumulative vertical wheel travel in lines since the window opened.
    ///
    /// Never reset; per-frame consumers diff it against their previous read.
    pub wheel_total: f32,
}

impl InputState {
    /// Folds `ev` into the current state. Committed text goes to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((x, y));
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(&button);
                    }
                }
            }

            InputEvent::MouseWheel(delta) => {
                self.wheel_total += delta.lines_y();
            }

            InputEvent::Text(t) => frame.text.push(t),
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseWheelDelta, TextEvent, TextOrigin};

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn press_and_release_track_down_set() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::ShiftLeft, KeyState::Pressed));
        assert!(st.key_down(Key::ShiftLeft));
        assert!(!st.key_down(Key::ShiftRight));

        st.apply_event(&mut fr, key(Key::ShiftLeft, KeyState::Released));
        assert!(!st.key_down(Key::ShiftLeft));
    }

    #[test]
    fn modifier_keys_are_tracked_per_side() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::ControlRight, KeyState::Pressed));
        st.apply_event(&mut fr, key(Key::AltLeft, KeyState::Pressed));
        st.apply_event(&mut fr, key(Key::AltLeft, KeyState::Released));

        assert!(st.key_down(Key::ControlRight));
        assert!(!st.key_down(Key::ControlLeft));
        assert!(!st.key_down(Key::AltLeft));
        assert!(fr.text.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::A, KeyState::Pressed));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.keys_down.is_empty());
    }

    #[test]
    fn wheel_accumulates_lines() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let wheel = InputEvent::MouseWheel;

        st.apply_event(&mut fr, wheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }));
        st.apply_event(&mut fr, wheel(MouseWheelDelta::Line { x: 0.0, y: 2.0 }));
        st.apply_event(&mut fr, wheel(MouseWheelDelta::Pixel { x: 0.0, y: -40.0 }));
        assert_eq!(st.wheel_total, 2.0);
    }

    #[test]
    fn text_lands_in_frame_stream() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(
            &mut fr,
            InputEvent::Text(TextEvent {
                text: "hi".into(),
                origin: TextOrigin::Keyboard,
            }),
        );
        assert_eq!(fr.text.len(), 1);
        fr.clear();
        assert!(fr.text.is_empty());
    }
}
