//! Panel geometry and coordinate clamping

/// Default panel width in pixels (portrait 272 × 480 module)
pub const DISPLAY_WIDTH: u16 = 272;

/// Default panel height in pixels
pub const DISPLAY_HEIGHT: u16 = 480;

/// Addressable area of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub width: u16,
    pub height: u16,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl Bounds {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Last addressable column
    pub const fn max_x(&self) -> u16 {
        self.width.saturating_sub(1)
    }

    /// Last addressable row
    pub const fn max_y(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    /// Clamp a point onto the panel
    ///
    /// Returns the clamped point and whether either coordinate moved.
    pub fn clamp(&self, x: u16, y: u16) -> (u16, u16, bool) {
        let cx = x.min(self.max_x());
        let cy = y.min(self.max_y());
        (cx, cy, cx != x || cy != y)
    }
}
