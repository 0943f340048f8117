//! GPU-free doubles for the device and input seams.

use std::time::Duration;

use crate::buffers::BufferKind;
use crate::device::{DeviceRect, DrawCall, RenderDevice, RenderState, TextureFactory, Transform};
use crate::draw::{DrawCommand, OwnedDrawList};
use crate::error::RenderError;
use crate::input::{DisplayInfo, InputSink};
use crate::texture::TextureHandle;
use crate::vertex::GuiVertex;

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateBuffer { kind: BufferKind, size: u64 },
    WriteBuffer { buffer: u32, len: usize },
    SetViewport(DeviceRect),
    SetScissor(DeviceRect),
    RenderState(RenderState),
    Transform(Transform),
    BindGeometry { vertices: u32, indices: u32 },
    BindTexture(&'static str),
    Draw(DrawCall),
}

/// Records every call. Buffers are numbered in creation order; textures are
/// plain names.
pub struct RecordingDevice {
    pub calls: Vec<DeviceCall>,
    pub size: (u32, u32),
    pub viewport: DeviceRect,
    pub scissor: DeviceRect,
    pub max_buffer_size: u64,
    next_buffer: u32,
}

impl RecordingDevice {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            calls: Vec::new(),
            size,
            viewport: DeviceRect::full(size),
            scissor: DeviceRect::full(size),
            max_buffer_size: u64::MAX,
            next_buffer: 0,
        }
    }

    pub fn created_buffers(&self) -> Vec<(BufferKind, u64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::CreateBuffer { kind, size } => Some((*kind, *size)),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::Draw(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

impl RenderDevice for RecordingDevice {
    type Texture = &'static str;
    type Buffer = u32;

    fn backbuffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn viewport(&self) -> DeviceRect {
        self.viewport
    }

    fn set_viewport(&mut self, rect: DeviceRect) {
        self.viewport = rect;
        self.calls.push(DeviceCall::SetViewport(rect));
    }

    fn scissor_rect(&self) -> DeviceRect {
        self.scissor
    }

    fn set_scissor_rect(&mut self, rect: DeviceRect) {
        self.scissor = rect;
        self.calls.push(DeviceCall::SetScissor(rect));
    }

    fn create_buffer(&mut self, kind: BufferKind, size: u64) -> Result<u32, RenderError> {
        if size > self.max_buffer_size {
            return Err(RenderError::BufferAllocation {
                kind,
                requested: size,
                limit: self.max_buffer_size,
            });
        }
        self.calls.push(DeviceCall::CreateBuffer { kind, size });
        let id = self.next_buffer;
        self.next_buffer += 1;
        Ok(id)
    }

    fn write_buffer(&mut self, buffer: &u32, bytes: &[u8]) {
        self.calls.push(DeviceCall::WriteBuffer {
            buffer: *buffer,
            len: bytes.len(),
        });
    }

    fn apply_render_state(&mut self, state: &RenderState) {
        self.calls.push(DeviceCall::RenderState(*state));
    }

    fn set_transform(&mut self, transform: &Transform) {
        self.calls.push(DeviceCall::Transform(*transform));
    }

    fn bind_geometry(&mut self, vertices: &u32, indices: &u32) {
        self.calls.push(DeviceCall::BindGeometry {
            vertices: *vertices,
            indices: *indices,
        });
    }

    fn bind_texture(&mut self, texture: &&'static str) {
        self.calls.push(DeviceCall::BindTexture(*texture));
    }

    fn draw_indexed(&mut self, call: DrawCall) {
        self.calls.push(DeviceCall::Draw(call));
    }
}

/// Texture factory producing `(label, width, height)` triples.
#[derive(Default)]
pub struct RecordingFactory {
    pub created: Vec<(String, u32, u32)>,
    pub max_dimension: Option<u32>,
}

impl TextureFactory for RecordingFactory {
    type Texture = (String, u32, u32);

    fn create_rgba8(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self::Texture, RenderError> {
        if let Some(limit) = self.max_dimension
            && (width > limit || height > limit)
        {
            return Err(RenderError::TextureTooLarge { width, height, limit });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::TextureDataSize {
                expected,
                actual: pixels.len(),
            });
        }
        let tex = (label.to_string(), width, height);
        self.created.push(tex.clone());
        Ok(tex)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Key(imgui::Key, bool),
    MousePos([f32; 2]),
    MouseButton(imgui::MouseButton, bool),
    Wheel([f32; 2]),
    Char(char),
    DeltaTime(Duration),
    Display(DisplayInfo),
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn key(&self, key: imgui::Key) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::Key(k, down) if *k == key => Some(*down),
            _ => None,
        })
    }

    pub fn wheel(&self) -> Vec<[f32; 2]> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Wheel(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn chars(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

impl InputSink for RecordingSink {
    fn key_event(&mut self, key: imgui::Key, down: bool) {
        self.events.push(SinkEvent::Key(key, down));
    }

    fn mouse_pos(&mut self, pos: [f32; 2]) {
        self.events.push(SinkEvent::MousePos(pos));
    }

    fn mouse_button(&mut self, button: imgui::MouseButton, down: bool) {
        self.events.push(SinkEvent::MouseButton(button, down));
    }

    fn mouse_wheel(&mut self, delta: [f32; 2]) {
        self.events.push(SinkEvent::Wheel(delta));
    }

    fn input_character(&mut self, ch: char) {
        self.events.push(SinkEvent::Char(ch));
    }

    fn delta_time(&mut self, dt: Duration) {
        self.events.push(SinkEvent::DeltaTime(dt));
    }

    fn display(&mut self, info: DisplayInfo) {
        self.events.push(SinkEvent::Display(info));
    }
}

/// An 8x8 quad at `(x, 0)`: 4 vertices, 6 indices, one command on `texture`.
pub fn quad_list(x: f32, texture: usize) -> OwnedDrawList {
    let v = |px, py| GuiVertex::new([px, py], [0.0, 0.0], [255; 4]);
    OwnedDrawList {
        vertices: vec![v(x, 0.0), v(x + 8.0, 0.0), v(x + 8.0, 8.0), v(x, 8.0)],
        indices: vec![0, 1, 2, 0, 2, 3],
        commands: vec![DrawCommand::Elements {
            count: 6,
            clip_rect: [x, 0.0, x + 8.0, 8.0],
            texture: TextureHandle::new(texture),
        }],
    }
}
