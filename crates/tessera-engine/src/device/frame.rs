/// One acquired swapchain image plus the encoder recording into it.
///
/// Hold it only for the duration of a frame: the surface texture blocks
/// acquisition of the next image until it is presented.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
