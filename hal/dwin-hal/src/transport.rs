//! Serial byte transport
//!
//! The LCD controller has no flow control on its receive line. The host is
//! expected to pace every byte, so the transport exposes single-byte writes
//! and an explicit delay rather than a bulk write.

/// Byte-oriented link to the display module
///
/// Writes are infallible from the caller's point of view: the link is
/// assumed reliable and in-order, and nothing is ever read back.
pub trait Transport {
    /// Put one byte on the wire
    fn write_byte(&mut self, byte: u8);

    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }
}
