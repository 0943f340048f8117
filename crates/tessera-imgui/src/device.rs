//! The graphics-device seam.
//!
//! [`RenderDevice`] is the small slice of a retained-mode graphics API the
//! translator drives: viewport and scissor state, geometry buffers, a fixed
//! render state, a transform, one bound texture, and indexed triangle draws.
//! `backend::WgpuRenderDevice` implements it on top of a wgpu render pass.

use std::ops::{Deref, DerefMut};

use crate::buffers::BufferKind;
use crate::error::RenderError;

/// Integer device rectangle (pixels). Width/height may be zero or, for raw
/// clip rectangles, negative; backends clamp before use.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct DeviceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DeviceRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle at the origin covering `(width, height)`.
    pub fn full(size: (u32, u32)) -> Self {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self::new(0, 0, clamp(size.0), clamp(size.1))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlendMode {
    /// `src * src_alpha + dst * (1 - src_alpha)`; alpha accumulates with `One`.
    StraightAlpha,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CullMode {
    None,
}

/// Fixed-function state for a GUI draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RenderState {
    pub blend: BlendMode,
    pub cull: CullMode,
    pub depth_test: bool,
    pub scissor_test: bool,
    /// Multiply sampled texels by the per-vertex color.
    pub vertex_color: bool,
}

impl RenderState {
    /// The only state ImGui output is drawn with.
    pub const GUI: RenderState = RenderState {
        blend: BlendMode::StraightAlpha,
        cull: CullMode::None,
        depth_test: false,
        scissor_test: true,
        vertex_color: true,
    };
}

/// Column-major 4x4 matrix.
pub type Mat4 = [[f32; 4]; 4];

pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// World/view/projection triple. Vertices are transformed as
/// `projection * view * world * pos`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transform {
    /// Identity world/view with the given projection.
    pub fn from_projection(projection: Mat4) -> Self {
        Self {
            world: IDENTITY,
            view: IDENTITY,
            projection,
        }
    }

    /// Combined matrix, column-major.
    pub fn combined(&self) -> Mat4 {
        mul(&self.projection, &mul(&self.view, &self.world))
    }
}

fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0f32; 4]; 4];
    for (c, col) in out.iter_mut().enumerate() {
        for (r, cell) in col.iter_mut().enumerate() {
            *cell = (0..4).map(|k| a[k][r] * b[c][k]).sum();
        }
    }
    out
}

/// One indexed triangle-list draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    /// Added to every index before fetching the vertex.
    pub base_vertex: i32,
    /// First index in the bound index buffer.
    pub start_index: u32,
    pub primitive_count: u32,
}

impl DrawCall {
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.primitive_count * 3
    }
}

pub trait RenderDevice {
    type Texture;
    type Buffer;

    /// Size of the render target in pixels.
    fn backbuffer_size(&self) -> (u32, u32);

    fn viewport(&self) -> DeviceRect;
    fn set_viewport(&mut self, rect: DeviceRect);

    fn scissor_rect(&self) -> DeviceRect;
    fn set_scissor_rect(&mut self, rect: DeviceRect);

    /// Allocates a geometry buffer of at least `size_bytes`.
    fn create_buffer(&mut self, kind: BufferKind, size_bytes: u64) -> Result<Self::Buffer, RenderError>;

    /// Writes `bytes` at offset 0.
    fn write_buffer(&mut self, buffer: &Self::Buffer, bytes: &[u8]);

    fn apply_render_state(&mut self, state: &RenderState);

    /// Sets the vertex transform for the rest of the frame.
    ///
    /// Queued uniform writes land at submit, so a device may keep a single
    /// transform per frame. Callers set it with the render state, not per draw.
    fn set_transform(&mut self, transform: &Transform);
    fn bind_geometry(&mut self, vertices: &Self::Buffer, indices: &Self::Buffer);
    fn bind_texture(&mut self, texture: &Self::Texture);
    fn draw_indexed(&mut self, call: DrawCall);
}

/// Creates RGBA8 textures for the registry.
pub trait TextureFactory {
    type Texture;

    /// `pixels` is tightly packed RGBA8, `width * height * 4` bytes.
    fn create_rgba8(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self::Texture, RenderError>;
}

/// Saves viewport and scissor on creation, restores both on drop.
///
/// Derefs to the device so the frame is recorded through the guard.
pub struct DeviceStateGuard<'d, D: RenderDevice> {
    device: &'d mut D,
    viewport: DeviceRect,
    scissor: DeviceRect,
}

impl<'d, D: RenderDevice> DeviceStateGuard<'d, D> {
    pub fn new(device: &'d mut D) -> Self {
        let viewport = device.viewport();
        let scissor = device.scissor_rect();
        Self {
            device,
            viewport,
            scissor,
        }
    }
}

impl<D: RenderDevice> Deref for DeviceStateGuard<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.device
    }
}

impl<D: RenderDevice> DerefMut for DeviceStateGuard<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.device
    }
}

impl<D: RenderDevice> Drop for DeviceStateGuard<'_, D> {
    fn drop(&mut self) {
        self.device.set_viewport(self.viewport);
        self.device.set_scissor_rect(self.scissor);
    }
}
