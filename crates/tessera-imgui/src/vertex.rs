use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Index type of ImGui draw lists. Indices are relative to the owning list.
pub type GuiIndex = u16;

/// One ImGui vertex as uploaded to the device (20 bytes):
///
///  offset  0  pos  [f32; 2]
///  offset  8  uv   [f32; 2]
///  offset 16  col  [u8; 4]   RGBA, straight alpha
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GuiVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub col: [u8; 4],
}

impl GuiVertex {
    pub const SIZE: usize = size_of::<GuiVertex>();

    pub const POS_OFFSET: usize = offset_of!(GuiVertex, pos);
    pub const UV_OFFSET: usize = offset_of!(GuiVertex, uv);
    pub const COL_OFFSET: usize = offset_of!(GuiVertex, col);

    #[inline]
    pub const fn new(pos: [f32; 2], uv: [f32; 2], col: [u8; 4]) -> Self {
        Self { pos, uv, col }
    }
}

impl From<&imgui::DrawVert> for GuiVertex {
    #[inline]
    fn from(v: &imgui::DrawVert) -> Self {
        Self {
            pos: v.pos,
            uv: v.uv,
            col: v.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_imgui() {
        assert_eq!(GuiVertex::SIZE, 20);
        assert_eq!(GuiVertex::POS_OFFSET, 0);
        assert_eq!(GuiVertex::UV_OFFSET, 8);
        assert_eq!(GuiVertex::COL_OFFSET, 16);
        assert_eq!(size_of::<imgui::DrawVert>(), GuiVertex::SIZE);
    }
}
