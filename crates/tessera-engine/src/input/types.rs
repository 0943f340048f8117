use std::fmt;

/// Physical keyboard key.
///
/// Named after the key's position on a US layout (like the W3C `code`
/// values winit uses), so left and right modifiers stay distinct. Platform
/// keys without a variant arrive as `Key::Unknown` carrying the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    SuperLeft,
    SuperRight,
    ContextMenu,

    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadDecimal,
    NumpadDivide,
    NumpadMultiply,
    NumpadSubtract,
    NumpadAdd,
    NumpadEnter,
    NumpadEqual,

    Quote,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    BracketLeft,
    Backslash,
    BracketRight,
    Backquote,
    IntlBackslash,

    MediaPlayPause,
    MediaStop,
    MediaTrackNext,
    MediaTrackPrevious,
    AudioVolumeUp,
    AudioVolumeDown,
    AudioVolumeMute,
    BrowserBack,
    BrowserForward,

    /// Platform key with no variant above.
    Unknown(u32),
}

impl Key {
    /// Every named key, in declaration order. `Unknown` is not included.
    pub const ALL: &'static [Key] = &[
        Key::Escape, Key::Enter, Key::Tab, Key::Backspace, Key::Space,
        Key::Insert, Key::Delete, Key::Home, Key::End, Key::PageUp, Key::PageDown,
        Key::ArrowUp, Key::ArrowDown, Key::ArrowLeft, Key::ArrowRight,
        Key::ShiftLeft, Key::ShiftRight, Key::ControlLeft, Key::ControlRight,
        Key::AltLeft, Key::AltRight, Key::SuperLeft, Key::SuperRight, Key::ContextMenu,
        Key::CapsLock, Key::ScrollLock, Key::NumLock, Key::PrintScreen, Key::Pause,
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
        Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
        Key::F13, Key::F14, Key::F15, Key::F16, Key::F17, Key::F18,
        Key::F19, Key::F20, Key::F21, Key::F22, Key::F23, Key::F24,
        Key::Numpad0, Key::Numpad1, Key::Numpad2, Key::Numpad3, Key::Numpad4,
        Key::Numpad5, Key::Numpad6, Key::Numpad7, Key::Numpad8, Key::Numpad9,
        Key::NumpadDecimal, Key::NumpadDivide, Key::NumpadMultiply, Key::NumpadSubtract,
        Key::NumpadAdd, Key::NumpadEnter, Key::NumpadEqual,
        Key::Quote, Key::Comma, Key::Minus, Key::Period, Key::Slash, Key::Semicolon,
        Key::Equal, Key::BracketLeft, Key::Backslash, Key::BracketRight, Key::Backquote,
        Key::IntlBackslash,
        Key::MediaPlayPause, Key::MediaStop, Key::MediaTrackNext, Key::MediaTrackPrevious,
        Key::AudioVolumeUp, Key::AudioVolumeDown, Key::AudioVolumeMute,
        Key::BrowserBack, Key::BrowserForward,
    ];
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "Unknown({code:#x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta.
///
/// `Line` is notched-wheel input; `Pixel` is touchpad-style high precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Logical pixels per wheel line when folding pixel deltas into lines.
    pub const PIXELS_PER_LINE: f32 = 40.0;

    /// Vertical component in wheel lines (positive = away from the user).
    pub fn lines_y(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } => y,
            MouseWheelDelta::Pixel { y, .. } => y / Self::PIXELS_PER_LINE,
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Where a piece of committed text came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextOrigin {
    /// Text produced by a key press (`KeyEvent::text`).
    Keyboard,
    /// Text committed by an input method.
    Ime,
}

/// Committed text (not IME pre-edit).
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    pub text: String,
    pub origin: TextOrigin,
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Modifier state is not carried separately: left and right modifier keys
/// arrive as ordinary `Key` events and are read back from `InputState`.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Stable platform code when available.
        code: u32,
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel(MouseWheelDelta),

    Text(TextEvent),

    PointerLeft,

    Focused(bool),
}
