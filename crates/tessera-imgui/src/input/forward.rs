use std::time::Duration;

use imgui::{Key as GuiKey, MouseButton as GuiButton};
use tessera_engine::input::{InputState, Key, MouseButton};

use super::keymap::translate_key;
use super::sink::InputSink;
use super::DisplayInfo;

/// Smallest delta time handed to ImGui, which rejects zero.
const MIN_DELTA: Duration = Duration::from_micros(1);

/// ImGui's "mouse unavailable" position.
const NO_MOUSE: [f32; 2] = [-f32::MAX, -f32::MAX];

/// Sign of the wheel travel between two cumulative readings.
///
/// Magnitude is discarded: one frame of scrolling is one notch, however
/// far the wheel moved.
pub fn wheel_delta(previous: f32, current: f32) -> f32 {
    let d = current - previous;
    if d > 0.0 {
        1.0
    } else if d < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Samples host input state into an [`InputSink`] once per frame.
///
/// Keeps only the previous cumulative wheel reading between frames.
#[derive(Debug, Default)]
pub struct InputForwarder {
    previous_wheel: Option<f32>,
}

impl InputForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward<S>(&mut self, sink: &mut S, input: &InputState, dt: Duration, display: DisplayInfo)
    where
        S: InputSink + ?Sized,
    {
        sink.delta_time(dt.max(MIN_DELTA));

        for key in Key::ALL {
            if let Some(gui) = translate_key(*key) {
                sink.key_event(gui, input.key_down(*key));
            }
        }

        let either = |l, r| input.key_down(l) || input.key_down(r);
        sink.key_event(GuiKey::ModShift, either(Key::ShiftLeft, Key::ShiftRight));
        sink.key_event(GuiKey::ModCtrl, either(Key::ControlLeft, Key::ControlRight));
        sink.key_event(GuiKey::ModAlt, either(Key::AltLeft, Key::AltRight));
        sink.key_event(GuiKey::ModSuper, either(Key::SuperLeft, Key::SuperRight));

        sink.display(display);

        let pos = input.pointer_pos.map_or(NO_MOUSE, |(x, y)| [x, y]);
        sink.mouse_pos(pos);
        sink.mouse_button(GuiButton::Left, input.button_down(MouseButton::Left));
        sink.mouse_button(GuiButton::Right, input.button_down(MouseButton::Right));
        sink.mouse_button(GuiButton::Middle, input.button_down(MouseButton::Middle));

        // The first frame only establishes the baseline.
        let current = input.wheel_total;
        let delta = self.previous_wheel.map_or(0.0, |prev| wheel_delta(prev, current));
        self.previous_wheel = Some(current);
        if delta != 0.0 {
            sink.mouse_wheel([0.0, delta]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSink, SinkEvent};

    fn forward(fwd: &mut InputForwarder, input: &InputState) -> RecordingSink {
        let mut sink = RecordingSink::default();
        fwd.forward(&mut sink, input, Duration::from_millis(16), DisplayInfo::new([800.0, 600.0]));
        sink
    }

    #[test]
    fn wheel_delta_keeps_only_the_sign() {
        assert_eq!(wheel_delta(100.0, 100.0), 0.0);
        assert_eq!(wheel_delta(100.0, 150.0), 1.0);
        assert_eq!(wheel_delta(100.0, 40.0), -1.0);
        assert_eq!(wheel_delta(0.0, 0.25), 1.0);
    }

    #[test]
    fn wheel_is_diffed_against_the_previous_frame() {
        let mut fwd = InputForwarder::new();
        let mut input = InputState {
            wheel_total: 100.0,
            ..InputState::default()
        };

        assert!(forward(&mut fwd, &input).wheel().is_empty());
        assert!(forward(&mut fwd, &input).wheel().is_empty());

        input.wheel_total = 150.0;
        assert_eq!(forward(&mut fwd, &input).wheel(), vec![[0.0, 1.0]]);

        input.wheel_total = 40.0;
        assert_eq!(forward(&mut fwd, &input).wheel(), vec![[0.0, -1.0]]);
    }

    #[test]
    fn held_keys_and_modifiers_are_reported() {
        let mut fwd = InputForwarder::new();
        let mut input = InputState::default();
        input.keys_down.insert(Key::A);
        input.keys_down.insert(Key::ControlRight);

        let sink = forward(&mut fwd, &input);
        assert_eq!(sink.key(GuiKey::A), Some(true));
        assert_eq!(sink.key(GuiKey::B), Some(false));
        assert_eq!(sink.key(GuiKey::RightCtrl), Some(true));
        assert_eq!(sink.key(GuiKey::ModCtrl), Some(true));
        assert_eq!(sink.key(GuiKey::ModShift), Some(false));
    }

    #[test]
    fn unmapped_keys_are_skipped() {
        let mut fwd = InputForwarder::new();
        let mut input = InputState::default();
        input.keys_down.insert(Key::F13);
        input.keys_down.insert(Key::Unknown(77));

        let sink = forward(&mut fwd, &input);
        let pressed = sink
            .events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Key(_, true)))
            .count();
        assert_eq!(pressed, 0);
    }

    #[test]
    fn mouse_state_and_frame_info_are_forwarded() {
        let mut fwd = InputForwarder::new();
        let mut input = InputState::default();
        input.pointer_pos = Some((12.0, 34.0));
        input.buttons_down.insert(MouseButton::Right);

        let mut sink = RecordingSink::default();
        let display = DisplayInfo {
            size: [640.0, 480.0],
            framebuffer_scale: 2.0,
        };
        fwd.forward(&mut sink, &input, Duration::ZERO, display);

        assert!(sink.events.contains(&SinkEvent::MousePos([12.0, 34.0])));
        assert!(sink.events.contains(&SinkEvent::MouseButton(GuiButton::Left, false)));
        assert!(sink.events.contains(&SinkEvent::MouseButton(GuiButton::Right, true)));
        assert!(sink.events.contains(&SinkEvent::Display(display)));
        assert!(sink.events.contains(&SinkEvent::DeltaTime(MIN_DELTA)));
    }

    #[test]
    fn pointer_outside_reports_no_mouse() {
        let mut fwd = InputForwarder::new();
        let sink = forward(&mut fwd, &InputState::default());
        assert!(sink.events.contains(&SinkEvent::MousePos(NO_MOUSE)));
    }
}
