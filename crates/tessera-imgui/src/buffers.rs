//! Growable per-frame geometry buffers.
//!
//! One vertex store and one index store, each a device buffer plus a CPU
//! staging region of the same capacity. Capacity is a high-water mark: it
//! grows to `ceil(demand * 1.5)` when a frame needs more and never shrinks.
//! Growth replaces the buffer; nothing is carried over, since every frame
//! rewrites its whole prefix.

use std::fmt;

use bytemuck::Pod;

use crate::device::RenderDevice;
use crate::draw::{DrawDataSource, DrawListSource};
use crate::error::RenderError;
use crate::vertex::{GuiIndex, GuiVertex};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferKind {
    Vertex,
    Index,
}

impl BufferKind {
    /// Bytes per element.
    pub const fn element_size(self) -> usize {
        match self {
            BufferKind::Vertex => GuiVertex::SIZE,
            BufferKind::Index => size_of::<GuiIndex>(),
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BufferKind::Vertex => "vertex",
            BufferKind::Index => "index",
        })
    }
}

/// Capacity allocated for `demand` elements.
#[inline]
pub fn grown_capacity(demand: usize) -> usize {
    demand.saturating_mul(3).div_ceil(2)
}

/// A device buffer and its staging region.
#[derive(Debug)]
struct Store<B, E> {
    kind: BufferKind,
    buffer: Option<B>,
    staging: Vec<E>,
    /// Elements written this frame.
    used: usize,
    reallocations: u32,
}

impl<B, E: Pod> Store<B, E> {
    fn new(kind: BufferKind) -> Self {
        Self {
            kind,
            buffer: None,
            staging: Vec::new(),
            used: 0,
            reallocations: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.staging.len()
    }

    fn reserve<D>(&mut self, device: &mut D, demand: usize) -> Result<(), RenderError>
    where
        D: RenderDevice<Buffer = B>,
    {
        if demand <= self.capacity() && self.buffer.is_some() {
            return Ok(());
        }

        // A store whose buffer was lost to a failed growth keeps its
        // high-water mark when the buffer is recreated.
        let capacity = if demand <= self.capacity() {
            self.capacity()
        } else {
            grown_capacity(demand)
        };
        let bytes = (capacity as u64).saturating_mul(self.kind.element_size() as u64);

        // Release the old buffer before asking for the larger one.
        self.buffer = None;
        let buffer = device.create_buffer(self.kind, bytes)?;

        log::debug!(
            "{} buffer allocated: {} -> {capacity} elements ({bytes} bytes)",
            self.kind,
            self.capacity(),
        );

        self.buffer = Some(buffer);
        self.staging = vec![E::zeroed(); capacity];
        self.reallocations += 1;
        Ok(())
    }

    /// Copies `src` into staging at the current fill mark.
    fn append(&mut self, src: impl ExactSizeIterator<Item = E>) -> Result<(), RenderError> {
        let start = self.used;
        let end = start + src.len();
        let capacity = self.capacity();
        let dst = self
            .staging
            .get_mut(start..end)
            .ok_or(RenderError::StagingOverflow {
                kind: self.kind,
                required: end,
                capacity,
            })?;
        for (d, s) in dst.iter_mut().zip(src) {
            *d = s;
        }
        self.used = end;
        Ok(())
    }

    fn upload<D>(&self, device: &mut D)
    where
        D: RenderDevice<Buffer = B>,
    {
        if let Some(buffer) = self.buffer.as_ref() {
            device.write_buffer(buffer, bytemuck::cast_slice(&self.staging[..self.used]));
        }
    }
}

/// Vertex and index stores for ImGui geometry.
#[derive(Debug)]
pub struct GeometryBuffers<B> {
    vertices: Store<B, GuiVertex>,
    indices: Store<B, GuiIndex>,
}

impl<B> Default for GeometryBuffers<B> {
    fn default() -> Self {
        Self {
            vertices: Store::new(BufferKind::Vertex),
            indices: Store::new(BufferKind::Index),
        }
    }
}

impl<B> GeometryBuffers<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows either store that cannot hold this frame's totals.
    ///
    /// A frame without vertices allocates nothing, and the index store is
    /// not created until some frame has indices.
    pub fn reserve<D>(
        &mut self,
        device: &mut D,
        vertex_count: usize,
        index_count: usize,
    ) -> Result<(), RenderError>
    where
        D: RenderDevice<Buffer = B>,
    {
        if vertex_count == 0 {
            return Ok(());
        }
        self.vertices.reserve(device, vertex_count)?;
        if index_count > 0 || self.indices.buffer.is_some() {
            self.indices.reserve(device, index_count)?;
        }
        Ok(())
    }

    /// Copies every list into staging, contiguously and in order, then
    /// writes the filled prefix of each store to its device buffer.
    pub fn upload<D, S>(&mut self, device: &mut D, draw_data: &S) -> Result<(), RenderError>
    where
        D: RenderDevice<Buffer = B>,
        S: DrawDataSource,
    {
        self.vertices.used = 0;
        self.indices.used = 0;

        for list in draw_data.lists() {
            self.vertices.append(list.vertices())?;
            self.indices.append(list.indices().iter().copied())?;
        }

        self.vertices.upload(device);
        self.indices.upload(device);
        Ok(())
    }

    /// Bound `(vertex, index)` buffers, once both exist.
    pub fn bound(&self) -> Option<(&B, &B)> {
        Some((self.vertices.buffer.as_ref()?, self.indices.buffer.as_ref()?))
    }

    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn index_capacity(&self) -> usize {
        self.indices.capacity()
    }

    /// How many times either store was (re)allocated.
    pub fn reallocations(&self) -> u32 {
        self.vertices.reallocations + self.indices.reallocations
    }

    pub fn staged_vertices(&self) -> &[GuiVertex] {
        &self.vertices.staging
    }

    pub fn staged_indices(&self) -> &[GuiIndex] {
        &self.indices.staging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{OwnedDrawData, OwnedDrawList};
    use crate::testing::{DeviceCall, RecordingDevice, quad_list};

    #[test]
    fn growth_is_one_and_a_half_rounded_up() {
        assert_eq!(grown_capacity(0), 0);
        assert_eq!(grown_capacity(1), 2);
        assert_eq!(grown_capacity(2), 3);
        assert_eq!(grown_capacity(100), 150);
        assert_eq!(grown_capacity(101), 152);
    }

    #[test]
    fn capacity_grows_only_past_the_high_water_mark() {
        let mut dev = RecordingDevice::new((640, 480));
        let mut bufs = GeometryBuffers::new();

        bufs.reserve(&mut dev, 100, 300).unwrap();
        assert_eq!(bufs.vertex_capacity(), 150);
        assert_eq!(bufs.index_capacity(), 450);
        assert_eq!(dev.created_buffers(), vec![
            (BufferKind::Vertex, 150 * 20),
            (BufferKind::Index, 450 * 2),
        ]);

        // Within capacity: nothing new.
        bufs.reserve(&mut dev, 150, 10).unwrap();
        assert_eq!(bufs.reallocations(), 2);
        assert_eq!(dev.created_buffers().len(), 2);

        // Past it: vertex store grows, index store stays.
        bufs.reserve(&mut dev, 151, 10).unwrap();
        assert_eq!(bufs.vertex_capacity(), 227);
        assert_eq!(bufs.index_capacity(), 450);
        assert_eq!(dev.created_buffers().len(), 3);

        // Smaller demand never shrinks.
        bufs.reserve(&mut dev, 3, 3).unwrap();
        assert_eq!(bufs.vertex_capacity(), 227);
    }

    #[test]
    fn zero_vertices_allocate_nothing() {
        let mut dev = RecordingDevice::new((640, 480));
        let mut bufs: GeometryBuffers<u32> = GeometryBuffers::new();
        bufs.reserve(&mut dev, 0, 0).unwrap();
        assert_eq!(bufs.vertex_capacity(), 0);
        assert!(dev.calls.is_empty());
    }

    #[test]
    fn allocation_failure_propagates() {
        let mut dev = RecordingDevice::new((640, 480));
        dev.max_buffer_size = 1024;
        let mut bufs = GeometryBuffers::new();

        let err = bufs.reserve(&mut dev, 1000, 6).unwrap_err();
        assert_eq!(err, RenderError::BufferAllocation {
            kind: BufferKind::Vertex,
            requested: 1500 * 20,
            limit: 1024,
        });
        assert_eq!(bufs.vertex_capacity(), 0);
        assert!(bufs.bound().is_none());
    }

    #[test]
    fn failed_growth_keeps_the_high_water_mark() {
        let mut dev = RecordingDevice::new((640, 480));
        let mut bufs = GeometryBuffers::new();
        bufs.reserve(&mut dev, 100, 6).unwrap();
        assert_eq!(bufs.vertex_capacity(), 150);

        dev.max_buffer_size = 1024;
        assert!(bufs.reserve(&mut dev, 200, 6).is_err());
        assert!(bufs.bound().is_none());

        dev.max_buffer_size = u64::MAX;
        bufs.reserve(&mut dev, 10, 6).unwrap();
        assert_eq!(bufs.vertex_capacity(), 150);
        assert_eq!(dev.created_buffers().last(), Some(&(BufferKind::Vertex, 150 * 20)));
        assert!(bufs.bound().is_some());
    }

    #[test]
    fn index_store_waits_for_indices() {
        let mut dev = RecordingDevice::new((640, 480));
        let mut bufs: GeometryBuffers<u32> = GeometryBuffers::new();

        bufs.reserve(&mut dev, 4, 0).unwrap();
        assert_eq!(dev.created_buffers(), vec![(BufferKind::Vertex, 6 * 20)]);
        assert_eq!(bufs.index_capacity(), 0);

        bufs.reserve(&mut dev, 4, 6).unwrap();
        assert_eq!(bufs.index_capacity(), 9);
    }

    #[test]
    fn lists_are_staged_contiguously_with_one_write_per_buffer() {
        let mut dev = RecordingDevice::new((640, 480));
        let mut bufs = GeometryBuffers::new();
        let data = OwnedDrawData::new(vec![quad_list(0.0, 1), quad_list(10.0, 2)], [640.0, 480.0]);

        bufs.reserve(&mut dev, 8, 12).unwrap();
        bufs.upload(&mut dev, &data).unwrap();

        assert_eq!(bufs.staged_vertices()[4].pos, [10.0, 0.0]);
        assert_eq!(&bufs.staged_indices()[..12], &[0, 1, 2, 0, 2, 3, 0, 1, 2, 0, 2, 3]);

        let writes: Vec<_> = dev
            .calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::WriteBuffer { buffer, len } => Some((*buffer, *len)),
                _ => None,
            })
            .collect();
        assert_eq!(writes, vec![(0, 8 * 20), (1, 12 * 2)]);
    }

    #[test]
    fn lists_beyond_reported_totals_overflow() {
        let mut dev = RecordingDevice::new((640, 480));
        let mut bufs = GeometryBuffers::new();
        let mut data = OwnedDrawData::new(vec![quad_list(0.0, 1); 3], [640.0, 480.0]);
        data.total_vertex_count = 4;
        data.total_index_count = 6;

        bufs.reserve(&mut dev, 4, 6).unwrap();
        let err = bufs.upload(&mut dev, &data).unwrap_err();
        assert_eq!(err, RenderError::StagingOverflow {
            kind: BufferKind::Vertex,
            required: 8,
            capacity: 6,
        });
    }

    #[test]
    fn empty_list_stages_nothing() {
        let mut dev = RecordingDevice::new((640, 480));
        let mut bufs = GeometryBuffers::new();
        let data = OwnedDrawData::new(vec![OwnedDrawList::default(), quad_list(0.0, 1)], [1.0, 1.0]);
        bufs.reserve(&mut dev, 4, 6).unwrap();
        bufs.upload(&mut dev, &data).unwrap();
        assert_eq!(bufs.staged_vertices()[0].pos, [0.0, 0.0]);
        assert_eq!(bufs.staged_vertices()[1].pos, [8.0, 0.0]);
    }
}
