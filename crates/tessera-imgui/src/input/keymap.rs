use imgui::Key as GuiKey;
use tessera_engine::input::Key;

/// Maps a host key to its ImGui key; `None` for keys ImGui has no slot for.
pub fn translate_key(key: Key) -> Option<GuiKey> {
    let k = match key {
        Key::Tab => GuiKey::Tab,
        Key::ArrowLeft => GuiKey::LeftArrow,
        Key::ArrowRight => GuiKey::RightArrow,
        Key::ArrowUp => GuiKey::UpArrow,
        Key::ArrowDown => GuiKey::DownArrow,
        Key::PageUp => GuiKey::PageUp,
        Key::PageDown => GuiKey::PageDown,
        Key::Home => GuiKey::Home,
        Key::End => GuiKey::End,
        Key::Insert => GuiKey::Insert,
        Key::Delete => GuiKey::Delete,
        Key::Backspace => GuiKey::Backspace,
        Key::Space => GuiKey::Space,
        Key::Enter => GuiKey::Enter,
        Key::Escape => GuiKey::Escape,

        Key::ControlLeft => GuiKey::LeftCtrl,
        Key::ShiftLeft => GuiKey::LeftShift,
        Key::AltLeft => GuiKey::LeftAlt,
        Key::SuperLeft => GuiKey::LeftSuper,
        Key::ControlRight => GuiKey::RightCtrl,
        Key::ShiftRight => GuiKey::RightShift,
        Key::AltRight => GuiKey::RightAlt,
        Key::SuperRight => GuiKey::RightSuper,
        Key::ContextMenu => GuiKey::Menu,

        Key::Digit0 => GuiKey::Alpha0,
        Key::Digit1 => GuiKey::Alpha1,
        Key::Digit2 => GuiKey::Alpha2,
        Key::Digit3 => GuiKey::Alpha3,
        Key::Digit4 => GuiKey::Alpha4,
        Key::Digit5 => GuiKey::Alpha5,
        Key::Digit6 => GuiKey::Alpha6,
        Key::Digit7 => GuiKey::Alpha7,
        Key::Digit8 => GuiKey::Alpha8,
        Key::Digit9 => GuiKey::Alpha9,

        Key::A => GuiKey::A,
        Key::B => GuiKey::B,
        Key::C => GuiKey::C,
        Key::D => GuiKey::D,
        Key::E => GuiKey::E,
        Key::F => GuiKey::F,
        Key::G => GuiKey::G,
        Key::H => GuiKey::H,
        Key::I => GuiKey::I,
        Key::J => GuiKey::J,
        Key::K => GuiKey::K,
        Key::L => GuiKey::L,
        Key::M => GuiKey::M,
        Key::N => GuiKey::N,
        Key::O => GuiKey::O,
        Key::P => GuiKey::P,
        Key::Q => GuiKey::Q,
        Key::R => GuiKey::R,
        Key::S => GuiKey::S,
        Key::T => GuiKey::T,
        Key::U => GuiKey::U,
        Key::V => GuiKey::V,
        Key::W => GuiKey::W,
        Key::X => GuiKey::X,
        Key::Y => GuiKey::Y,
        Key::Z => GuiKey::Z,

        Key::F1 => GuiKey::F1,
        Key::F2 => GuiKey::F2,
        Key::F3 => GuiKey::F3,
        Key::F4 => GuiKey::F4,
        Key::F5 => GuiKey::F5,
        Key::F6 => GuiKey::F6,
        Key::F7 => GuiKey::F7,
        Key::F8 => GuiKey::F8,
        Key::F9 => GuiKey::F9,
        Key::F10 => GuiKey::F10,
        Key::F11 => GuiKey::F11,
        Key::F12 => GuiKey::F12,

        Key::Quote => GuiKey::Apostrophe,
        Key::Comma => GuiKey::Comma,
        Key::Minus => GuiKey::Minus,
        Key::Period => GuiKey::Period,
        Key::Slash => GuiKey::Slash,
        Key::Semicolon => GuiKey::Semicolon,
        Key::Equal => GuiKey::Equal,
        Key::BracketLeft => GuiKey::LeftBracket,
        Key::Backslash => GuiKey::Backslash,
        Key::BracketRight => GuiKey::RightBracket,
        Key::Backquote => GuiKey::GraveAccent,

        Key::CapsLock => GuiKey::CapsLock,
        Key::ScrollLock => GuiKey::ScrollLock,
        Key::NumLock => GuiKey::NumLock,
        Key::PrintScreen => GuiKey::PrintScreen,
        Key::Pause => GuiKey::Pause,

        Key::Numpad0 => GuiKey::Keypad0,
        Key::Numpad1 => GuiKey::Keypad1,
        Key::Numpad2 => GuiKey::Keypad2,
        Key::Numpad3 => GuiKey::Keypad3,
        Key::Numpad4 => GuiKey::Keypad4,
        Key::Numpad5 => GuiKey::Keypad5,
        Key::Numpad6 => GuiKey::Keypad6,
        Key::Numpad7 => GuiKey::Keypad7,
        Key::Numpad8 => GuiKey::Keypad8,
        Key::Numpad9 => GuiKey::Keypad9,
        Key::NumpadDecimal => GuiKey::KeypadDecimal,
        Key::NumpadDivide => GuiKey::KeypadDivide,
        Key::NumpadMultiply => GuiKey::KeypadMultiply,
        Key::NumpadSubtract => GuiKey::KeypadSubtract,
        Key::NumpadAdd => GuiKey::KeypadAdd,
        Key::NumpadEnter => GuiKey::KeypadEnter,
        Key::NumpadEqual => GuiKey::KeypadEqual,

        Key::F13
        | Key::F14
        | Key::F15
        | Key::F16
        | Key::F17
        | Key::F18
        | Key::F19
        | Key::F20
        | Key::F21
        | Key::F22
        | Key::F23
        | Key::F24
        | Key::IntlBackslash
        | Key::MediaPlayPause
        | Key::MediaStop
        | Key::MediaTrackNext
        | Key::MediaTrackPrevious
        | Key::AudioVolumeUp
        | Key::AudioVolumeDown
        | Key::AudioVolumeMute
        | Key::BrowserBack
        | Key::BrowserForward
        | Key::Unknown(_) => return None,
    };
    Some(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_host_key_translates_without_panicking() {
        let mapped = Key::ALL.iter().filter_map(|k| translate_key(*k)).count();
        assert!(mapped > 100, "only {mapped} keys mapped");

        for code in [0, 1, 0xdead, u32::MAX] {
            assert_eq!(translate_key(Key::Unknown(code)), None);
        }
    }

    #[test]
    fn no_two_host_keys_share_an_imgui_key() {
        let mut seen: Vec<(GuiKey, Key)> = Vec::new();
        for key in Key::ALL {
            let Some(gui) = translate_key(*key) else { continue };
            if let Some((_, prev)) = seen.iter().find(|(g, _)| *g == gui) {
                panic!("{prev} and {key} both map to {gui:?}");
            }
            seen.push((gui, *key));
        }
    }

    #[test]
    fn left_and_right_modifiers_stay_distinct() {
        assert_eq!(translate_key(Key::ShiftLeft), Some(GuiKey::LeftShift));
        assert_eq!(translate_key(Key::ShiftRight), Some(GuiKey::RightShift));
        assert_eq!(translate_key(Key::SuperRight), Some(GuiKey::RightSuper));
    }

    #[test]
    fn keys_without_an_imgui_slot_map_to_none() {
        for key in [Key::F13, Key::F24, Key::IntlBackslash, Key::MediaStop, Key::BrowserBack] {
            assert_eq!(translate_key(key), None, "{key}");
        }
        assert_eq!(translate_key(Key::F12), Some(GuiKey::F12));
        assert_eq!(translate_key(Key::Numpad7), Some(GuiKey::Keypad7));
    }
}
