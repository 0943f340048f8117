//! Read-side view of a frame's draw data.
//!
//! The translator only needs counts, display geometry and, per list, the
//! vertices, indices and commands. `imgui::DrawData` provides them directly;
//! [`OwnedDrawData`] is a plain snapshot of the same shape, used for replay
//! and in tests where no ImGui context exists.

use crate::texture::TextureHandle;
use crate::vertex::{GuiIndex, GuiVertex};

/// One draw command, reduced to what the translator acts on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw `count` indices from the running index offset.
    Elements {
        count: usize,
        /// `[min_x, min_y, max_x, max_y]` in display coordinates.
        clip_rect: [f32; 4],
        texture: TextureHandle,
    },
    /// Re-apply the adapter's render state.
    ResetRenderState,
    /// A user callback. Not supported; skipped.
    Callback,
}

pub trait DrawListSource {
    fn vertex_count(&self) -> usize;
    fn vertices(&self) -> impl ExactSizeIterator<Item = GuiVertex> + '_;
    fn indices(&self) -> &[GuiIndex];
    fn draw_commands(&self) -> impl Iterator<Item = DrawCommand> + '_;
}

pub trait DrawDataSource {
    type List: DrawListSource;

    /// Sum of vertex counts over all lists.
    fn total_vertex_count(&self) -> usize;
    /// Sum of index counts over all lists.
    fn total_index_count(&self) -> usize;
    /// Top-left of the displayed area, in display coordinates.
    fn display_pos(&self) -> [f32; 2];
    fn display_size(&self) -> [f32; 2];
    /// Display → framebuffer pixel ratio.
    fn framebuffer_scale(&self) -> [f32; 2];
    fn lists(&self) -> impl Iterator<Item = &Self::List> + '_;
}

// ── imgui ─────────────────────────────────────────────────────────────────

impl DrawListSource for imgui::DrawList {
    fn vertex_count(&self) -> usize {
        self.vtx_buffer().len()
    }

    fn vertices(&self) -> impl ExactSizeIterator<Item = GuiVertex> + '_ {
        self.vtx_buffer().iter().map(GuiVertex::from)
    }

    fn indices(&self) -> &[GuiIndex] {
        self.idx_buffer()
    }

    fn draw_commands(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        // Offsets in `cmd_params` are ignored; the translator walks lists
        // and commands in order and keeps its own running offsets.
        self.commands().map(|cmd| match cmd {
            imgui::DrawCmd::Elements { count, cmd_params } => DrawCommand::Elements {
                count,
                clip_rect: cmd_params.clip_rect,
                texture: TextureHandle::from(cmd_params.texture_id),
            },
            imgui::DrawCmd::ResetRenderState => DrawCommand::ResetRenderState,
            imgui::DrawCmd::RawCallback { .. } => DrawCommand::Callback,
        })
    }
}

impl DrawDataSource for imgui::DrawData {
    type List = imgui::DrawList;

    fn total_vertex_count(&self) -> usize {
        usize::try_from(self.total_vtx_count).unwrap_or(0)
    }

    fn total_index_count(&self) -> usize {
        usize::try_from(self.total_idx_count).unwrap_or(0)
    }

    fn display_pos(&self) -> [f32; 2] {
        self.display_pos
    }

    fn display_size(&self) -> [f32; 2] {
        self.display_size
    }

    fn framebuffer_scale(&self) -> [f32; 2] {
        self.framebuffer_scale
    }

    fn lists(&self) -> impl Iterator<Item = &Self::List> + '_ {
        imgui::DrawData::draw_lists(self)
    }
}

// ── owned snapshot ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnedDrawList {
    pub vertices: Vec<GuiVertex>,
    pub indices: Vec<GuiIndex>,
    pub commands: Vec<DrawCommand>,
}

impl OwnedDrawList {
    /// Copies an ImGui draw list.
    pub fn capture(list: &imgui::DrawList) -> Self {
        Self {
            vertices: list.vertices().collect(),
            indices: list.indices().to_vec(),
            commands: list.draw_commands().collect(),
        }
    }
}

impl DrawListSource for OwnedDrawList {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertices(&self) -> impl ExactSizeIterator<Item = GuiVertex> + '_ {
        self.vertices.iter().copied()
    }

    fn indices(&self) -> &[GuiIndex] {
        &self.indices
    }

    fn draw_commands(&self) -> impl Iterator<Item = DrawCommand> + '_ {
        self.commands.iter().copied()
    }
}

/// Owned copy of one frame's draw data.
///
/// `total_vertex_count`/`total_index_count` are stored, not derived, so a
/// snapshot can carry totals that disagree with its lists.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedDrawData {
    pub lists: Vec<OwnedDrawList>,
    pub total_vertex_count: usize,
    pub total_index_count: usize,
    pub display_pos: [f32; 2],
    pub display_size: [f32; 2],
    pub framebuffer_scale: [f32; 2],
}

impl Default for OwnedDrawData {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            total_vertex_count: 0,
            total_index_count: 0,
            display_pos: [0.0, 0.0],
            display_size: [0.0, 0.0],
            framebuffer_scale: [1.0, 1.0],
        }
    }
}

impl OwnedDrawData {
    /// Builds a snapshot whose totals are summed from `lists`.
    pub fn new(lists: Vec<OwnedDrawList>, display_size: [f32; 2]) -> Self {
        let total_vertex_count = lists.iter().map(|l| l.vertices.len()).sum();
        let total_index_count = lists.iter().map(|l| l.indices.len()).sum();
        Self {
            lists,
            total_vertex_count,
            total_index_count,
            display_size,
            ..Self::default()
        }
    }

    /// Copies an ImGui frame.
    pub fn capture(draw_data: &imgui::DrawData) -> Self {
        Self {
            lists: draw_data.lists().map(OwnedDrawList::capture).collect(),
            total_vertex_count: draw_data.total_vertex_count(),
            total_index_count: draw_data.total_index_count(),
            display_pos: draw_data.display_pos,
            display_size: draw_data.display_size,
            framebuffer_scale: draw_data.framebuffer_scale,
        }
    }
}

impl DrawDataSource for OwnedDrawData {
    type List = OwnedDrawList;

    fn total_vertex_count(&self) -> usize {
        self.total_vertex_count
    }

    fn total_index_count(&self) -> usize {
        self.total_index_count
    }

    fn display_pos(&self) -> [f32; 2] {
        self.display_pos
    }

    fn display_size(&self) -> [f32; 2] {
        self.display_size
    }

    fn framebuffer_scale(&self) -> [f32; 2] {
        self.framebuffer_scale
    }

    fn lists(&self) -> impl Iterator<Item = &Self::List> + '_ {
        self.lists.iter()
    }
}
