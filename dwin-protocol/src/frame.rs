//! Frame buffer for outgoing DWIN commands
//!
//! Frame layout in the buffer:
//! - index 0: frame start byte (0xAA), written on construction
//! - index 1: opcode
//! - index 2..: big-endian parameters, then optional text
//!
//! The terminator is not stored; it is appended on transmit.
//!
//! The write cursor is the index of the last byte written. A fresh frame
//! therefore has cursor 0, every writer stores at `cursor + 1`, and the
//! number of bytes to transmit is `cursor + 1`.

use heapless::Vec;

use crate::geometry::DISPLAY_WIDTH;
use crate::text::TextSource;

/// Frame start byte
pub const FRAME_START: u8 = 0xAA;

/// Terminator sent after every frame body
pub const FRAME_TAIL: [u8; 4] = [0xCC, 0x33, 0xC3, 0x3C];

/// Frame buffer capacity for a panel `width` pixels wide
///
/// Holds the longest string the panel can show in its narrowest (6 px)
/// font using 2-byte characters, plus the draw-string header.
pub const fn send_buf_size(width: u16) -> usize {
    11 + (width as usize / 6) * 2
}

/// Frame buffer capacity for the default 272 px panel
pub const SEND_BUF_SIZE: usize = send_buf_size(DISPLAY_WIDTH);

/// A single command frame under construction
///
/// Writes past capacity are dropped and recorded in [`is_truncated`],
/// never panics.
///
/// [`is_truncated`]: FrameBuffer::is_truncated
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameBuffer<const N: usize = SEND_BUF_SIZE> {
    bytes: Vec<u8, N>,
    truncated: bool,
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameBuffer<N> {
    /// Create an empty frame holding only the start byte
    pub fn new() -> Self {
        let mut bytes = Vec::new();
        // Only fails for a zero-capacity buffer, which then carries nothing.
        let _ = bytes.push(FRAME_START);
        Self {
            bytes,
            truncated: false,
        }
    }

    /// Start a frame with the given opcode
    pub fn with_opcode(opcode: u8) -> Self {
        let mut frame = Self::new();
        frame.push_byte(opcode);
        frame
    }

    /// Discard everything after the start byte
    pub fn reset(&mut self) {
        self.bytes.truncate(1);
        self.truncated = false;
    }

    /// Index of the last written byte
    pub fn cursor(&self) -> usize {
        self.bytes.len().saturating_sub(1)
    }

    /// Buffer capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes still available for writing
    pub fn remaining(&self) -> usize {
        N - self.bytes.len()
    }

    /// Whether any write was cut short by the capacity limit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The frame body to transmit (start byte through last written byte)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes to transmit, excluding the terminator
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if not even the start byte fits
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Opcode of this frame, if one was written
    pub fn opcode(&self) -> Option<u8> {
        self.bytes.get(1).copied()
    }

    /// Append one byte
    pub fn push_byte(&mut self, value: u8) {
        if self.bytes.push(value).is_err() {
            self.truncated = true;
        }
    }

    /// Append a 16-bit word, most significant byte first
    pub fn push_word(&mut self, value: u16) {
        self.push_slice(&value.to_be_bytes());
    }

    /// Append a 32-bit long, most significant byte first
    pub fn push_long(&mut self, value: u32) {
        self.push_slice(&value.to_be_bytes());
    }

    /// Append text, clipped to the space left in the buffer
    ///
    /// Returns the number of bytes copied. Null and empty sources copy
    /// nothing and do not count as truncation.
    pub fn push_text(&mut self, text: &TextSource<'_>) -> usize {
        let src = text.as_bytes();
        if src.is_empty() {
            return 0;
        }
        let len = src.len().min(self.remaining());
        if len < src.len() {
            self.truncated = true;
        }
        // Cannot fail: len is bounded by the remaining capacity.
        let _ = self.bytes.extend_from_slice(&src[..len]);
        len
    }

    fn push_slice(&mut self, data: &[u8]) {
        for &byte in data {
            self.push_byte(byte);
        }
    }
}
