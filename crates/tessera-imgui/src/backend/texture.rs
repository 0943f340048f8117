use crate::device::TextureFactory;
use crate::error::RenderError;

/// A sampled RGBA8 texture with its ImGui bind group.
#[derive(Debug, Clone)]
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Wraps an existing texture view, e.g. a render target drawn elsewhere.
    ///
    /// The view must be a filterable float 2D view.
    pub fn from_view(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: wgpu::Texture,
        view: wgpu::TextureView,
    ) -> Self {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera imgui texture"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            }],
        });
        Self {
            texture,
            view,
            bind_group,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

/// Creates `GpuTexture`s bound to the ImGui texture layout.
pub struct WgpuTextureFactory<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    layout: &'a wgpu::BindGroupLayout,
}

impl<'a> WgpuTextureFactory<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue, layout: &'a wgpu::BindGroupLayout) -> Self {
        Self { device, queue, layout }
    }
}

/// Validates an RGBA8 upload against the size limit and the data length.
pub(super) fn check_rgba8(width: u32, height: u32, len: usize, limit: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyTexture { width, height });
    }
    if width > limit || height > limit {
        return Err(RenderError::TextureTooLarge { width, height, limit });
    }
    let expected = width as usize * height as usize * 4;
    if len != expected {
        return Err(RenderError::TextureDataSize { expected, actual: len });
    }
    Ok(())
}

impl TextureFactory for WgpuTextureFactory<'_> {
    type Texture = GpuTexture;

    fn create_rgba8(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<GpuTexture, RenderError> {
        check_rgba8(width, height, pixels.len(), self.device.limits().max_texture_dimension_2d)?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("texture '{label}' uploaded ({width}x{height})");
        Ok(GpuTexture::from_view(self.device, self.layout, texture, view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_uploads_are_validated() {
        assert_eq!(check_rgba8(2, 2, 16, 8192), Ok(()));
        assert_eq!(
            check_rgba8(9000, 2, 9000 * 2 * 4, 8192),
            Err(RenderError::TextureTooLarge { width: 9000, height: 2, limit: 8192 })
        );
        assert_eq!(
            check_rgba8(2, 2, 15, 8192),
            Err(RenderError::TextureDataSize { expected: 16, actual: 15 })
        );
        assert_eq!(
            check_rgba8(0, 4, 0, 8192),
            Err(RenderError::EmptyTexture { width: 0, height: 4 })
        );
    }
}
