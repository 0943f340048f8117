//! Draw data → device calls.
//!
//! Per frame: size and fill the geometry buffers, set the GUI render state
//! over the full backbuffer, then issue one indexed draw per draw command
//! with that command's scissor and texture. Viewport and scissor are saved
//! first and restored on every exit path.

use crate::buffers::GeometryBuffers;
use crate::device::{DeviceRect, DeviceStateGuard, DrawCall, Mat4, RenderDevice, RenderState, Transform};
use crate::draw::{DrawCommand, DrawDataSource, DrawListSource};
use crate::error::RenderError;
use crate::texture::TextureRegistry;

/// Counters for one translated frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub draw_lists: usize,
    pub draw_calls: usize,
    pub vertices: usize,
    pub indices: usize,
}

/// Orthographic projection mapping `pos..pos + size` to clip space, y down,
/// with depth range near -1 / far +1 mapped to `0..1`.
pub fn ortho_projection(pos: [f32; 2], size: [f32; 2]) -> Mat4 {
    let (l, t) = (pos[0], pos[1]);
    let r = l + size[0].max(f32::EPSILON);
    let b = t + size[1].max(f32::EPSILON);
    let (near, far) = (-1.0f32, 1.0f32);

    [
        [2.0 / (r - l), 0.0, 0.0, 0.0],
        [0.0, 2.0 / (t - b), 0.0, 0.0],
        [0.0, 0.0, 1.0 / (far - near), 0.0],
        [(l + r) / (l - r), (t + b) / (b - t), near / (near - far), 1.0],
    ]
}

/// Scales a display-space clip rectangle into framebuffer pixels and
/// truncates it to `(x, y, width, height)`.
pub fn clip_to_scissor(clip: [f32; 4], display_pos: [f32; 2], scale: [f32; 2]) -> DeviceRect {
    let min_x = (clip[0] - display_pos[0]) * scale[0];
    let min_y = (clip[1] - display_pos[1]) * scale[1];
    let max_x = (clip[2] - display_pos[0]) * scale[0];
    let max_y = (clip[3] - display_pos[1]) * scale[1];
    DeviceRect::new(
        min_x as i32,
        min_y as i32,
        (max_x - min_x) as i32,
        (max_y - min_y) as i32,
    )
}

/// Owns the texture registry and geometry buffers of one renderer.
pub struct FrameTranslator<T, B> {
    textures: TextureRegistry<T>,
    buffers: GeometryBuffers<B>,
}

impl<T, B> Default for FrameTranslator<T, B> {
    fn default() -> Self {
        Self {
            textures: TextureRegistry::new(),
            buffers: GeometryBuffers::new(),
        }
    }
}

impl<T, B> FrameTranslator<T, B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textures(&self) -> &TextureRegistry<T> {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry<T> {
        &mut self.textures
    }

    pub fn buffers(&self) -> &GeometryBuffers<B> {
        &self.buffers
    }

    /// Records `draw_data` on `device`.
    ///
    /// A frame without vertices touches nothing. On error, draws already
    /// issued stay issued; viewport and scissor are restored either way.
    pub fn translate<D, S>(&mut self, device: &mut D, draw_data: &S) -> Result<FrameStats, RenderError>
    where
        D: RenderDevice<Texture = T, Buffer = B>,
        S: DrawDataSource,
    {
        let vertex_total = draw_data.total_vertex_count();
        let index_total = draw_data.total_index_count();
        if vertex_total == 0 {
            return Ok(FrameStats::default());
        }

        self.buffers.reserve(device, vertex_total, index_total)?;
        self.buffers.upload(device, draw_data)?;

        let mut device = DeviceStateGuard::new(device);

        let transform = Transform::from_projection(ortho_projection(
            draw_data.display_pos(),
            draw_data.display_size(),
        ));
        let full = DeviceRect::full(device.backbuffer_size());
        device.set_viewport(full);
        self.setup_render_state(&mut *device, &transform);

        let display_pos = draw_data.display_pos();
        let scale = draw_data.framebuffer_scale();

        let mut stats = FrameStats {
            vertices: vertex_total,
            indices: index_total,
            ..FrameStats::default()
        };
        let mut vertex_offset = 0usize;
        let mut index_offset = 0usize;

        for list in draw_data.lists() {
            for cmd in list.draw_commands() {
                match cmd {
                    DrawCommand::Elements {
                        count,
                        clip_rect,
                        texture,
                    } => {
                        let texture = self.textures.resolve(texture)?;

                        device.set_scissor_rect(clip_to_scissor(clip_rect, display_pos, scale));
                        device.bind_texture(texture);
                        device.draw_indexed(DrawCall {
                            base_vertex: to_i32(vertex_offset),
                            start_index: to_u32(index_offset),
                            primitive_count: to_u32(count / 3),
                        });

                        stats.draw_calls += 1;
                        index_offset += count;
                    }
                    DrawCommand::ResetRenderState => {
                        self.setup_render_state(&mut *device, &transform);
                    }
                    DrawCommand::Callback => {
                        log::trace!("skipping ImGui user callback");
                    }
                }
            }

            vertex_offset += list.vertex_count();
            stats.draw_lists += 1;
        }

        Ok(stats)
    }

    fn setup_render_state<D>(&self, device: &mut D, transform: &Transform)
    where
        D: RenderDevice<Texture = T, Buffer = B>,
    {
        device.apply_render_state(&RenderState::GUI);
        device.set_transform(transform);
        if let Some((vertices, indices)) = self.buffers.bound() {
            device.bind_geometry(vertices, indices);
        }
    }
}

fn to_i32(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn to_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{OwnedDrawData, OwnedDrawList};
    use crate::texture::TextureHandle;
    use crate::testing::{DeviceCall, RecordingDevice, quad_list};
    use crate::vertex::GuiVertex;

    fn translator_with(textures: &[&'static str]) -> FrameTranslator<&'static str, u32> {
        let mut t = FrameTranslator::new();
        for tex in textures {
            t.textures_mut().bind(*tex);
        }
        t
    }

    fn apply(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
        let v = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0; 3];
        for (r, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|c| m[c][r] * v[c]).sum();
        }
        out
    }

    fn assert_near(a: [f32; 3], b: [f32; 3]) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-5, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn ortho_maps_display_corners_y_down() {
        let m = ortho_projection([0.0, 0.0], [800.0, 600.0]);
        assert_near(apply(&m, [0.0, 0.0, 0.0]), [-1.0, 1.0, 0.5]);
        assert_near(apply(&m, [800.0, 600.0, 0.0]), [1.0, -1.0, 0.5]);
        assert_near(apply(&m, [400.0, 300.0, -1.0]), [0.0, 0.0, 0.0]);
        assert_near(apply(&m, [400.0, 300.0, 1.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn ortho_honours_display_origin() {
        let m = ortho_projection([100.0, 50.0], [200.0, 100.0]);
        assert_near(apply(&m, [100.0, 50.0, 0.0]), [-1.0, 1.0, 0.5]);
        assert_near(apply(&m, [300.0, 150.0, 0.0]), [1.0, -1.0, 0.5]);
    }

    #[test]
    fn clip_rect_is_scaled_and_truncated() {
        let r = clip_to_scissor([10.5, 20.9, 110.2, 70.0], [0.0, 0.0], [2.0, 2.0]);
        assert_eq!(r, DeviceRect::new(21, 41, 199, 98));
    }

    #[test]
    fn draws_accumulate_offsets_across_lists() {
        let mut dev = RecordingDevice::new((800, 600));
        let mut t = translator_with(&["atlas", "image"]);

        let mut second = quad_list(20.0, 1);
        second.commands.push(DrawCommand::Elements {
            count: 3,
            clip_rect: [0.0, 0.0, 800.0, 600.0],
            texture: TextureHandle::new(0),
        });
        second.indices.extend([0, 1, 2]);
        let data = OwnedDrawData::new(vec![quad_list(0.0, 0), second], [800.0, 600.0]);

        let stats = t.translate(&mut dev, &data).unwrap();

        assert_eq!(dev.draws(), vec![
            DrawCall { base_vertex: 0, start_index: 0, primitive_count: 2 },
            DrawCall { base_vertex: 4, start_index: 6, primitive_count: 2 },
            DrawCall { base_vertex: 4, start_index: 12, primitive_count: 1 },
        ]);
        assert_eq!(stats, FrameStats {
            draw_lists: 2,
            draw_calls: 3,
            vertices: 8,
            indices: 15,
        });

        let bound: Vec<_> = dev
            .calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::BindTexture(name) => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(bound, vec!["atlas", "image", "atlas"]);
    }

    fn list_with(vertex_count: usize, commands: &[(usize, [f32; 4])]) -> OwnedDrawList {
        let index_count = commands.iter().map(|(count, _)| count).sum();
        OwnedDrawList {
            vertices: vec![GuiVertex::new([0.0, 0.0], [0.0, 0.0], [255; 4]); vertex_count],
            indices: vec![0; index_count],
            commands: commands
                .iter()
                .map(|&(count, clip_rect)| DrawCommand::Elements {
                    count,
                    clip_rect,
                    texture: TextureHandle::new(0),
                })
                .collect(),
        }
    }

    #[test]
    fn scissor_precedes_each_draw_across_lists() {
        let mut dev = RecordingDevice::new((800, 600));
        let mut t = translator_with(&["atlas"]);
        let first = list_with(10, &[(9, [0.0, 0.0, 10.0, 10.0]), (6, [1.0, 0.0, 11.0, 10.0])]);
        let second = list_with(5, &[(3, [100.0, 0.0, 110.0, 10.0]), (6, [101.0, 0.0, 111.0, 10.0])]);
        let data = OwnedDrawData::new(vec![first, second], [800.0, 600.0]);

        t.translate(&mut dev, &data).unwrap();

        let draw = |base_vertex, start_index, primitive_count| {
            DeviceCall::Draw(DrawCall { base_vertex, start_index, primitive_count })
        };
        let scissor = |x| DeviceCall::SetScissor(DeviceRect::new(x, 0, 10, 10));
        let sequence: Vec<_> = dev
            .calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::SetScissor(_) | DeviceCall::Draw(_)))
            .cloned()
            .collect();
        assert_eq!(sequence, vec![
            scissor(0),
            draw(0, 0, 3),
            scissor(1),
            draw(0, 9, 2),
            scissor(100),
            draw(10, 15, 1),
            scissor(101),
            draw(10, 18, 2),
            DeviceCall::SetScissor(DeviceRect::full((800, 600))),
        ]);

        let transforms = dev
            .calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::Transform(_)))
            .count();
        assert_eq!(transforms, 1);
    }

    #[test]
    fn each_draw_gets_its_own_scissor() {
        let mut dev = RecordingDevice::new((800, 600));
        let mut t = translator_with(&["atlas"]);
        let data = OwnedDrawData::new(vec![quad_list(0.0, 0), quad_list(30.0, 0)], [800.0, 600.0]);

        t.translate(&mut dev, &data).unwrap();

        let scissors: Vec<_> = dev
            .calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::SetScissor(r) => Some(*r),
                _ => None,
            })
            .collect();
        // Two per-command rectangles, then the restore.
        assert_eq!(scissors, vec![
            DeviceRect::new(0, 0, 8, 8),
            DeviceRect::new(30, 0, 8, 8),
            DeviceRect::full((800, 600)),
        ]);
    }

    #[test]
    fn frame_sets_gui_state_over_full_backbuffer() {
        let mut dev = RecordingDevice::new((1024, 768));
        dev.viewport = DeviceRect::new(5, 5, 10, 10);
        let mut t = translator_with(&["atlas"]);
        let data = OwnedDrawData::new(vec![quad_list(0.0, 0)], [512.0, 384.0]);

        t.translate(&mut dev, &data).unwrap();

        assert!(dev.calls.contains(&DeviceCall::SetViewport(DeviceRect::full((1024, 768)))));
        assert!(dev.calls.contains(&DeviceCall::RenderState(RenderState::GUI)));
        assert!(dev.calls.contains(&DeviceCall::BindGeometry { vertices: 0, indices: 1 }));
        assert_eq!(dev.viewport, DeviceRect::new(5, 5, 10, 10));
    }

    #[test]
    fn zero_vertex_frame_does_nothing() {
        let mut dev = RecordingDevice::new((800, 600));
        let mut t = translator_with(&["atlas"]);

        let data = OwnedDrawData::new(vec![quad_list(0.0, 0)], [800.0, 600.0]);
        t.translate(&mut dev, &data).unwrap();
        let before = t.buffers().staged_vertices().to_vec();
        dev.calls.clear();

        let empty = OwnedDrawData::new(vec![OwnedDrawList::default()], [800.0, 600.0]);
        let stats = t.translate(&mut dev, &empty).unwrap();

        assert_eq!(stats, FrameStats::default());
        assert!(dev.calls.is_empty());
        assert_eq!(t.buffers().staged_vertices(), before.as_slice());
    }

    #[test]
    fn unknown_texture_fails_and_restores_state() {
        let mut dev = RecordingDevice::new((800, 600));
        let saved_vp = DeviceRect::new(0, 0, 400, 300);
        let saved_sc = DeviceRect::new(10, 10, 100, 100);
        dev.viewport = saved_vp;
        dev.scissor = saved_sc;

        let mut t = translator_with(&["atlas"]);
        let data = OwnedDrawData::new(vec![quad_list(0.0, 0), quad_list(10.0, 9)], [800.0, 600.0]);

        let err = t.translate(&mut dev, &data).unwrap_err();
        assert_eq!(err, RenderError::UnknownTexture(TextureHandle::new(9)));
        assert_eq!(dev.draws().len(), 1);
        assert_eq!(dev.viewport, saved_vp);
        assert_eq!(dev.scissor, saved_sc);
    }

    #[test]
    fn reset_render_state_reapplies_state_and_callbacks_are_skipped() {
        let mut dev = RecordingDevice::new((800, 600));
        let mut t = translator_with(&["atlas"]);
        let mut list = quad_list(0.0, 0);
        list.commands.insert(0, DrawCommand::Callback);
        list.commands.insert(1, DrawCommand::ResetRenderState);
        let data = OwnedDrawData::new(vec![list], [800.0, 600.0]);

        let stats = t.translate(&mut dev, &data).unwrap();

        let states = dev
            .calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::RenderState(_)))
            .count();
        assert_eq!(states, 2);
        assert_eq!(stats.draw_calls, 1);
    }

    #[test]
    fn framebuffer_scale_applies_to_scissor_only() {
        let mut dev = RecordingDevice::new((1600, 1200));
        let mut t = translator_with(&["atlas"]);
        let mut data = OwnedDrawData::new(vec![quad_list(4.0, 0)], [800.0, 600.0]);
        data.framebuffer_scale = [2.0, 2.0];

        t.translate(&mut dev, &data).unwrap();

        assert!(dev.calls.contains(&DeviceCall::SetScissor(DeviceRect::new(8, 0, 16, 16))));
        let expected = Transform::from_projection(ortho_projection([0.0, 0.0], [800.0, 600.0]));
        assert!(dev.calls.contains(&DeviceCall::Transform(expected)));
        assert_eq!(t.buffers().staged_vertices()[0], GuiVertex::new([4.0, 0.0], [0.0, 0.0], [255; 4]));
    }
}
