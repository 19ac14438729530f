//! Panel configuration
//!
//! Describes the attached module: its pixel dimensions (used for icon
//! coordinate clamping), the pause between serial bytes, and the largest
//! data payload one write-memory frame may carry. With the `serde`
//! feature the configuration round-trips through postcard so it can live
//! in the host's flash next to other settings.

use dwin_protocol::{send_buf_size, Bounds, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_CHUNK_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default pause after every transmitted byte, in microseconds
pub const DEFAULT_BYTE_DELAY_US: u32 = 1;

/// Upper bound on a serialized [`PanelConfig`]
pub const MAX_CONFIG_SIZE: usize = 32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero
    ZeroDimension,
    /// Memory writes need at least one byte per chunk
    ZeroChunkSize,
    /// Chunk size exceeds what one write-memory frame may carry
    ChunkTooLarge,
    /// Frame buffer cannot hold a full text line at this panel width
    BufferTooSmall,
    /// Serialization failed (output buffer too small)
    Serialize,
    /// Stored bytes are not a valid configuration
    Deserialize,
}

/// Target panel description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Pause after each byte on the wire (µs)
    pub byte_delay_us: u32,
    /// Data bytes per write-memory sub-frame (1 to [`MAX_CHUNK_SIZE`])
    pub max_chunk: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            byte_delay_us: DEFAULT_BYTE_DELAY_US,
            max_chunk: MAX_CHUNK_SIZE as u16,
        }
    }
}

impl PanelConfig {
    /// Default timing and chunking for a panel of the given size
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the configuration can drive a panel
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.max_chunk == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if usize::from(self.max_chunk) > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkTooLarge);
        }
        Ok(())
    }

    /// Frame buffer capacity needed to draw a full line on this panel
    pub fn frame_capacity(&self) -> usize {
        send_buf_size(self.width)
    }

    /// Addressable area used for coordinate clamping
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Serialize into `buf` as postcard binary
    ///
    /// Returns the used prefix of `buf`.
    #[cfg(feature = "serde")]
    pub fn to_slice<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate a stored configuration
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }
}
