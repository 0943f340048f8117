use crate::buffers::BufferKind;
use crate::device::{DeviceRect, DrawCall, Mat4, RenderDevice, RenderState, Transform};
use crate::error::RenderError;

use super::pipeline::{ActivePipeline, GlobalsUniform};
use super::texture::GpuTexture;

/// `RenderDevice` over one wgpu render pass.
///
/// wgpu has no state readback, so viewport and scissor are tracked here.
/// Rectangles are clamped to the target before they reach the pass; a
/// scissor with no area suppresses draws until the next scissor change.
pub struct WgpuRenderDevice<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    pass: wgpu::RenderPass<'a>,
    pipeline: ActivePipeline<'a>,
    target_size: (u32, u32),
    viewport: DeviceRect,
    scissor: DeviceRect,
    scissor_empty: bool,
    /// Matrix already queued into the globals uniform this pass.
    uploaded: Option<Mat4>,
}

impl<'a> WgpuRenderDevice<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        pass: wgpu::RenderPass<'a>,
        pipeline: ActivePipeline<'a>,
        target_size: (u32, u32),
    ) -> Self {
        let full = DeviceRect::full(target_size);
        Self {
            device,
            queue,
            pass,
            pipeline,
            target_size,
            viewport: full,
            scissor: full,
            scissor_empty: target_size.0 == 0 || target_size.1 == 0,
            uploaded: None,
        }
    }
}

/// Intersects `rect` with `(0, 0)..size` as `(x, y, w, h)`.
pub(super) fn clamp_rect(rect: DeviceRect, size: (u32, u32)) -> (u32, u32, u32, u32) {
    let clamp = |v: i64, max: u32| v.clamp(0, i64::from(max)) as u32;
    let x0 = clamp(i64::from(rect.x), size.0);
    let y0 = clamp(i64::from(rect.y), size.1);
    let x1 = clamp(i64::from(rect.x) + i64::from(rect.width), size.0);
    let y1 = clamp(i64::from(rect.y) + i64::from(rect.height), size.1);
    (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

/// Records `mvp` as uploaded; false when it is already the queued value.
///
/// A second, different matrix in one pass would overwrite the first at
/// submit, so it is reported and dropped.
pub(super) fn claim_upload(uploaded: &mut Option<Mat4>, mvp: Mat4) -> bool {
    match uploaded {
        None => {
            *uploaded = Some(mvp);
            true
        }
        Some(current) => {
            if *current != mvp {
                log::warn!("imgui transform changed mid-frame; keeping the first one");
            }
            false
        }
    }
}

/// Rounds up to wgpu's copy alignment; never zero.
pub(super) fn aligned_size(size: u64) -> u64 {
    size.max(wgpu::COPY_BUFFER_ALIGNMENT)
        .next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT)
}

impl RenderDevice for WgpuRenderDevice<'_> {
    type Texture = GpuTexture;
    type Buffer = wgpu::Buffer;

    fn backbuffer_size(&self) -> (u32, u32) {
        self.target_size
    }

    fn viewport(&self) -> DeviceRect {
        self.viewport
    }

    fn set_viewport(&mut self, rect: DeviceRect) {
        self.viewport = rect;
        let (x, y, w, h) = clamp_rect(rect, self.target_size);
        if w > 0 && h > 0 {
            self.pass
                .set_viewport(x as f32, y as f32, w as f32, h as f32, 0.0, 1.0);
        }
    }

    fn scissor_rect(&self) -> DeviceRect {
        self.scissor
    }

    fn set_scissor_rect(&mut self, rect: DeviceRect) {
        self.scissor = rect;
        let (x, y, w, h) = clamp_rect(rect, self.target_size);
        self.scissor_empty = w == 0 || h == 0;
        if !self.scissor_empty {
            self.pass.set_scissor_rect(x, y, w, h);
        }
    }

    fn create_buffer(&mut self, kind: BufferKind, size_bytes: u64) -> Result<wgpu::Buffer, RenderError> {
        let size = aligned_size(size_bytes);
        let limit = self.device.limits().max_buffer_size;
        if size > limit {
            return Err(RenderError::BufferAllocation {
                kind,
                requested: size_bytes,
                limit,
            });
        }

        let (label, usage) = match kind {
            BufferKind::Vertex => ("tessera imgui vbo", wgpu::BufferUsages::VERTEX),
            BufferKind::Index => ("tessera imgui ibo", wgpu::BufferUsages::INDEX),
        };
        Ok(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }))
    }

    fn write_buffer(&mut self, buffer: &wgpu::Buffer, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let padded_len = aligned_size(bytes.len() as u64) as usize;
        if padded_len == bytes.len() {
            self.queue.write_buffer(buffer, 0, bytes);
        } else {
            // u16 index data can end mid-word.
            let mut padded = Vec::with_capacity(padded_len);
            padded.extend_from_slice(bytes);
            padded.resize(padded_len, 0);
            self.queue.write_buffer(buffer, 0, &padded);
        }
    }

    fn apply_render_state(&mut self, state: &RenderState) {
        // The pipeline bakes in the one supported state.
        debug_assert_eq!(*state, RenderState::GUI);
        self.pass.set_pipeline(self.pipeline.pipeline);
    }

    fn set_transform(&mut self, transform: &Transform) {
        let mvp = transform.combined();
        if claim_upload(&mut self.uploaded, mvp) {
            let uniform = GlobalsUniform { mvp };
            self.queue
                .write_buffer(self.pipeline.uniform, 0, bytemuck::bytes_of(&uniform));
        }
        self.pass.set_bind_group(0, self.pipeline.globals, &[]);
    }

    fn bind_geometry(&mut self, vertices: &wgpu::Buffer, indices: &wgpu::Buffer) {
        self.pass.set_vertex_buffer(0, vertices.slice(..));
        self.pass
            .set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
    }

    fn bind_texture(&mut self, texture: &GpuTexture) {
        self.pass.set_bind_group(1, &texture.bind_group, &[]);
    }

    fn draw_indexed(&mut self, call: DrawCall) {
        if self.scissor_empty || call.primitive_count == 0 {
            return;
        }
        let start = call.start_index;
        self.pass
            .draw_indexed(start..start + call.index_count(), call.base_vertex, 0..1);
    }
}
