//! Render plumbing shared with renderer crates.
//!
//! The engine clears the frame and hands renderers a `RenderCtx` (device,
//! queue, surface format and size) and a `RenderTarget` (encoder + view).
//! Renderers own their GPU resources and record their own passes with
//! `LoadOp::Load` on top of the clear.

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
