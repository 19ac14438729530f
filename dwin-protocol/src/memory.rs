//! Data memory writes
//!
//! The module carries 32 KiB of SRAM (0x0000–0x7FFF) and 16 KiB of data
//! flash (0x0000–0x3FFF). A write-memory frame can carry at most
//! [`MAX_CHUNK_SIZE`] data bytes, so larger payloads (JPEG pages, icon
//! bitmaps) are split by [`ChunkPlan`] into consecutive sub-frames.
//!
//! Sub-frame `n` always targets `base + n * max_chunk`, including the last
//! (possibly short) one.

use core::ops::Range;

/// Largest data payload the controller accepts in one write-memory frame
pub const MAX_CHUNK_SIZE: usize = 128;

/// Memory region selected by a write-memory frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MemoryTarget {
    /// 32 KiB data SRAM
    Sram = 0x5A,
    /// 16 KiB data flash (the controller answers `A5 4F 4B` when done)
    Flash = 0xA5,
}

impl MemoryTarget {
    /// Selector byte on the wire
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Size of the addressable region in bytes
    pub const fn size(self) -> usize {
        match self {
            MemoryTarget::Sram => 0x8000,
            MemoryTarget::Flash => 0x4000,
        }
    }
}

/// One sub-frame of a chunked memory write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the sequence
    pub index: usize,
    /// Destination address in device memory
    pub address: u16,
    /// Byte range of the source payload carried by this chunk
    pub range: Range<usize>,
}

impl Chunk {
    /// Number of payload bytes in this chunk
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Iterator over the chunks needed to write `len` bytes at `base`
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    base: u16,
    max_chunk: usize,
    len: usize,
    remaining: usize,
    index: usize,
}

impl ChunkPlan {
    /// Plan a write of `len` bytes starting at `base`
    ///
    /// A `max_chunk` of zero is treated as one byte per chunk.
    pub fn new(base: u16, len: usize, max_chunk: usize) -> Self {
        Self {
            base,
            max_chunk: max_chunk.max(1),
            len,
            remaining: len,
            index: 0,
        }
    }

    /// Total number of sub-frames for the whole payload
    pub fn chunk_count(&self) -> usize {
        self.len.div_ceil(self.max_chunk)
    }
}

impl Iterator for ChunkPlan {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.remaining == 0 {
            return None;
        }

        let size = self.max_chunk.min(self.remaining);
        let offset = self.index * self.max_chunk;
        // Device addresses are 16-bit and wrap like the controller's register.
        let address = self.base.wrapping_add(offset as u16);

        let chunk = Chunk {
            index: self.index,
            address,
            range: offset..offset + size,
        };

        self.remaining -= size;
        self.index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining.div_ceil(self.max_chunk);
        (left, Some(left))
    }
}

impl ExactSizeIterator for ChunkPlan {}

impl core::iter::FusedIterator for ChunkPlan {}
