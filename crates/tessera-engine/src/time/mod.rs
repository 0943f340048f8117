//! Frame timing.
//!
//! One `FrameClock` per window; `tick()` once per presented frame. The
//! resulting `FrameTime::dt` is what the ImGui input forwarder pushes as the
//! GUI library's delta time, so it is clamped to stay strictly positive.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
