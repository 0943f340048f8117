//! Host input subsystem.
//!
//! The public types do not expose winit. `platform::winit` translates window
//! events into `InputEvent`s, which `InputState` folds into pollable state.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
    TextEvent,
    TextOrigin,
};
