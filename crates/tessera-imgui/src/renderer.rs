use tessera_engine::render::{RenderCtx, RenderTarget};

use crate::backend::{GpuTexture, GuiPipeline, WgpuRenderDevice, WgpuTextureFactory};
use crate::draw::DrawDataSource;
use crate::error::{FontError, RenderError};
use crate::fonts::{self, FontAtlasConfig};
use crate::texture::TextureHandle;
use crate::translate::{FrameStats, FrameTranslator};

/// Renders ImGui draw data into the engine's frame.
///
/// Owns the font atlas texture, user textures, geometry buffers and the
/// wgpu pipeline. Draws on top of whatever the frame already holds.
pub struct ImguiRenderer {
    pipeline: GuiPipeline,
    translator: FrameTranslator<GpuTexture, wgpu::Buffer>,
    fonts: FontAtlasConfig,
    font_texture: Option<TextureHandle>,
    last_stats: FrameStats,
}

impl ImguiRenderer {
    /// Creates the renderer and uploads the font atlas of `imgui`.
    pub fn new(
        imgui: &mut imgui::Context,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        fonts: FontAtlasConfig,
    ) -> Result<Self, FontError> {
        let mut renderer = Self {
            pipeline: GuiPipeline::new(device),
            translator: FrameTranslator::new(),
            fonts,
            font_texture: None,
            last_stats: FrameStats::default(),
        };
        renderer.reload_fonts(imgui, device, queue)?;
        Ok(renderer)
    }

    pub fn font_config(&self) -> &FontAtlasConfig {
        &self.fonts
    }

    /// Replaces the font configuration. Takes effect on `reload_fonts`.
    pub fn set_font_config(&mut self, fonts: FontAtlasConfig) {
        self.fonts = fonts;
    }

    /// Rebuilds the atlas and swaps its texture. Call between frames.
    pub fn reload_fonts(
        &mut self,
        imgui: &mut imgui::Context,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<(), FontError> {
        let mut factory = WgpuTextureFactory::new(device, queue, self.pipeline.texture_layout());
        let handle = fonts::build_font_atlas(
            imgui.fonts(),
            &self.fonts,
            &mut factory,
            self.translator.textures_mut(),
            self.font_texture,
        )?;
        self.font_texture = Some(handle);
        Ok(())
    }

    pub fn font_texture(&self) -> Option<TextureHandle> {
        self.font_texture
    }

    /// Uploads an RGBA8 image and registers it for `imgui::Image`.
    pub fn create_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<TextureHandle, RenderError> {
        use crate::device::TextureFactory;

        let mut factory = WgpuTextureFactory::new(device, queue, self.pipeline.texture_layout());
        let texture = factory.create_rgba8(label, width, height, rgba)?;
        Ok(self.register_texture(texture))
    }

    pub fn register_texture(&mut self, texture: GpuTexture) -> TextureHandle {
        self.translator.textures_mut().bind(texture)
    }

    /// Drops the registry's reference. Unknown handles are ignored.
    pub fn unregister_texture(&mut self, handle: TextureHandle) -> Option<GpuTexture> {
        self.translator.textures_mut().unbind(handle)
    }

    pub fn texture(&self, handle: TextureHandle) -> Result<&GpuTexture, RenderError> {
        self.translator.textures().resolve(handle)
    }

    /// Layout for bind groups of textures built outside the renderer.
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        self.pipeline.texture_layout()
    }

    /// Statistics of the last successful `render`.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_data: &imgui::DrawData,
    ) -> Result<FrameStats, RenderError> {
        self.render_source(ctx, target, draw_data)
    }

    /// Like `render`, for any draw data source (e.g. a captured frame).
    pub fn render_source<S>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_data: &S,
    ) -> Result<FrameStats, RenderError>
    where
        S: DrawDataSource,
    {
        if draw_data.total_vertex_count() == 0 {
            self.last_stats = FrameStats::default();
            return Ok(self.last_stats);
        }

        self.pipeline.ensure_format(ctx.device, ctx.surface_format);
        let Some(active) = self.pipeline.active(ctx.surface_format) else {
            log::error!("no imgui pipeline for {:?}", ctx.surface_format);
            return Ok(FrameStats::default());
        };

        let pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera imgui pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let mut device = WgpuRenderDevice::new(ctx.device, ctx.queue, pass, active, ctx.surface_size);
        let stats = self.translator.translate(&mut device, draw_data)?;
        drop(device);

        log::trace!(
            "imgui frame: {} lists, {} draws, {} vertices, {} indices",
            stats.draw_lists,
            stats.draw_calls,
            stats.vertices,
            stats.indices,
        );
        self.last_stats = stats;
        Ok(stats)
    }
}
