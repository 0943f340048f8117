//! wgpu implementation of the device seam.

mod device;
mod pipeline;
mod texture;

pub use device::WgpuRenderDevice;
pub use pipeline::{ActivePipeline, GuiPipeline};
pub use texture::{GpuTexture, WgpuTextureFactory};
