//! Tessera engine crate.
//!
//! Host side of the ImGui adapter: window + event loop, GPU device and
//! surface, frame clock, logging, and the pollable input state that the
//! adapter's input forwarder samples every frame.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
