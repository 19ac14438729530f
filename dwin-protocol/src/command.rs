//! Drawing and memory commands
//!
//! Every command maps to one frame. Encoding starts from a fresh
//! [`FrameBuffer`], so identical commands always produce identical bytes.
//!
//! Only [`Command::IconShow`] and [`Command::SramIconDisplay`] clamp their
//! coordinates to the panel. Text, numbers and area copies pass coordinates
//! through untouched; the controller clips those itself.

use crate::color::Rgb565;
use crate::frame::FrameBuffer;
use crate::geometry::Bounds;
use crate::memory::MemoryTarget;
use crate::text::TextSource;

// Opcodes
pub const CMD_DRAW_POINT: u8 = 0x02;
pub const CMD_DRAW_STRING: u8 = 0x11;
pub const CMD_DRAW_FLOAT: u8 = 0x14;
pub const CMD_ICON_SHOW: u8 = 0x23;
pub const CMD_SRAM_ICON: u8 = 0x24;
pub const CMD_AREA_COPY: u8 = 0x27;
pub const CMD_WRITE_MEMORY: u8 = 0x31;
pub const CMD_WRITE_PICTURE: u8 = 0x33;

/// Marks a library/cache byte as an icon or virtual-area reference
const ID_FLAG: u8 = 0x80;

/// Font size occupies the low nibble of the flag byte
const SIZE_MASK: u8 = 0x0F;

/// Highest flash picture slot
const PICTURE_MASK: u8 = 0x0F;

/// Diagnostics from encoding one frame
///
/// Neither condition stops the frame from being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodeStatus {
    /// A coordinate was pulled back onto the panel
    pub clamped: bool,
    /// Text or parameters did not fit in the frame buffer
    pub truncated: bool,
}

impl EncodeStatus {
    /// Neither clamped nor truncated
    pub fn is_clean(&self) -> bool {
        !self.clamped && !self.truncated
    }

    /// Combine the diagnostics of several frames
    pub fn merge(self, other: EncodeStatus) -> EncodeStatus {
        EncodeStatus {
            clamped: self.clamped || other.clamped,
            truncated: self.truncated || other.truncated,
        }
    }
}

/// Glyph styling for [`Command::DrawString`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    /// Let the controller shrink glyph advance to the character width
    pub width_adjust: bool,
    /// Paint the background color behind glyphs
    pub show_background: bool,
    /// Font size index (0–15)
    pub size: u8,
    pub color: Rgb565,
    pub background: Rgb565,
}

impl TextStyle {
    /// Flag byte: bit 7 width adjust, bit 6 background, bits 3-0 size
    pub fn flags(&self) -> u8 {
        (u8::from(self.width_adjust) << 7)
            | (u8::from(self.show_background) << 6)
            | (self.size & SIZE_MASK)
    }
}

/// How leading zeros of a number are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZeroMode {
    /// Leading zeros shown as blanks
    #[default]
    Space,
    /// Leading zeros shown as `0`
    Digit,
}

/// Styling for [`Command::DrawFloat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumberStyle {
    pub show_background: bool,
    /// Pad to the full digit count
    pub zero_fill: bool,
    pub zero_mode: ZeroMode,
    /// Font size index (0–15)
    pub size: u8,
    pub color: Rgb565,
    pub background: Rgb565,
}

impl NumberStyle {
    /// Flag byte: bit 7 background, bit 5 zero fill, bit 4 zero mode, bits 3-0 size
    pub fn flags(&self) -> u8 {
        (u8::from(self.show_background) << 7)
            | (u8::from(self.zero_fill) << 5)
            | (u8::from(self.zero_mode == ZeroMode::Digit) << 4)
            | (self.size & SIZE_MASK)
    }
}

/// Commands sent from the host to the display module
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Fill a `width × height` dot at (x, y)
    DrawPoint {
        color: Rgb565,
        width: u8,
        height: u8,
        x: u16,
        y: u16,
    },
    /// Draw text with its upper-left corner at (x, y)
    DrawString {
        style: TextStyle,
        x: u16,
        y: u16,
        text: TextSource<'a>,
    },
    /// Draw a fixed-point number; `value` carries `fraction_digits` implied decimals
    DrawFloat {
        style: NumberStyle,
        integer_digits: u8,
        fraction_digits: u8,
        x: u16,
        y: u16,
        value: i32,
    },
    /// Show icon `picture` from icon library `library`
    IconShow {
        library: u8,
        picture: u8,
        x: u16,
        y: u16,
    },
    /// Show an icon stored in data SRAM at `source_addr`
    SramIconDisplay { x: u16, y: u16, source_addr: u16 },
    /// Copy a rectangle from virtual area `cache` to (x, y) on screen
    AreaCopy {
        cache: u8,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
        x: u16,
        y: u16,
    },
    /// Header of a data memory write; the data follows outside the buffer
    WriteMemory { target: MemoryTarget, address: u16 },
    /// Commit the 32 KiB SRAM into flash picture slot `picture`
    WritePictureMemory { picture: u8 },
}

impl<'a> Command<'a> {
    /// Opcode byte of this command
    pub fn opcode(&self) -> u8 {
        match self {
            Command::DrawPoint { .. } => CMD_DRAW_POINT,
            Command::DrawString { .. } => CMD_DRAW_STRING,
            Command::DrawFloat { .. } => CMD_DRAW_FLOAT,
            Command::IconShow { .. } => CMD_ICON_SHOW,
            Command::SramIconDisplay { .. } => CMD_SRAM_ICON,
            Command::AreaCopy { .. } => CMD_AREA_COPY,
            Command::WriteMemory { .. } => CMD_WRITE_MEMORY,
            Command::WritePictureMemory { .. } => CMD_WRITE_PICTURE,
        }
    }

    /// Encode this command into a new frame
    pub fn encode(&self, bounds: &Bounds) -> (FrameBuffer, EncodeStatus) {
        let mut frame = FrameBuffer::new();
        let status = self.encode_into(bounds, &mut frame);
        (frame, status)
    }

    /// Encode this command into `frame`, replacing its previous contents
    pub fn encode_into<const N: usize>(
        &self,
        bounds: &Bounds,
        frame: &mut FrameBuffer<N>,
    ) -> EncodeStatus {
        frame.reset();
        frame.push_byte(self.opcode());

        let mut clamped = false;
        match *self {
            Command::DrawPoint {
                color,
                width,
                height,
                x,
                y,
            } => {
                frame.push_word(color.raw());
                frame.push_byte(width);
                frame.push_byte(height);
                frame.push_word(x);
                frame.push_word(y);
            }
            Command::DrawString {
                ref style,
                x,
                y,
                ref text,
            } => {
                frame.push_byte(style.flags());
                frame.push_word(style.color.raw());
                frame.push_word(style.background.raw());
                frame.push_word(x);
                frame.push_word(y);
                frame.push_text(text);
            }
            Command::DrawFloat {
                ref style,
                integer_digits,
                fraction_digits,
                x,
                y,
                value,
            } => {
                frame.push_byte(style.flags());
                frame.push_word(style.color.raw());
                frame.push_word(style.background.raw());
                frame.push_byte(integer_digits);
                frame.push_byte(fraction_digits);
                frame.push_word(x);
                frame.push_word(y);
                frame.push_long(value as u32);
            }
            Command::IconShow {
                library,
                picture,
                x,
                y,
            } => {
                let (x, y, moved) = bounds.clamp(x, y);
                clamped = moved;
                frame.push_word(x);
                frame.push_word(y);
                frame.push_byte(ID_FLAG | library);
                frame.push_byte(picture);
            }
            Command::SramIconDisplay { x, y, source_addr } => {
                let (x, y, moved) = bounds.clamp(x, y);
                clamped = moved;
                frame.push_word(x);
                frame.push_word(y);
                frame.push_byte(ID_FLAG);
                frame.push_word(source_addr);
            }
            Command::AreaCopy {
                cache,
                x_start,
                y_start,
                x_end,
                y_end,
                x,
                y,
            } => {
                frame.push_byte(ID_FLAG | cache);
                frame.push_word(x_start);
                frame.push_word(y_start);
                frame.push_word(x_end);
                frame.push_word(y_end);
                frame.push_word(x);
                frame.push_word(y);
            }
            Command::WriteMemory { target, address } => {
                frame.push_byte(target.to_byte());
                frame.push_word(address);
            }
            Command::WritePictureMemory { picture } => {
                frame.push_byte(MemoryTarget::Sram.to_byte());
                frame.push_byte(MemoryTarget::Flash.to_byte());
                frame.push_byte(picture & PICTURE_MASK);
            }
        }

        EncodeStatus {
            clamped,
            truncated: frame.is_truncated(),
        }
    }
}
