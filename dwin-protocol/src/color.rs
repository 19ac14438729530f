//! 16-bit panel colors

/// RGB565 color as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self::new(31, 0, 0);
    pub const GREEN: Self = Self::new(0, 63, 0);
    pub const BLUE: Self = Self::new(0, 0, 31);

    /// Pack 5-bit red, 6-bit green and 5-bit blue channels
    ///
    /// Out-of-range channels are masked to their field width.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0x1F) << 11) | ((g as u16 & 0x3F) << 5) | (b as u16 & 0x1F))
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
