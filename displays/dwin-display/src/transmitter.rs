//! Frame transmission
//!
//! The module's receive FIFO is shallow and has no handshake line, so every
//! byte is followed by a short pause. Bytes are never batched.

use dwin_hal::Transport;
use dwin_protocol::{FrameBuffer, FRAME_TAIL};

/// Write bytes one at a time, pausing `delay_us` after each
pub fn write_paced<T: Transport + ?Sized>(transport: &mut T, bytes: &[u8], delay_us: u32) {
    for &byte in bytes {
        transport.write_byte(byte);
        transport.delay_us(delay_us);
    }
}

/// Write the frame terminator
pub fn write_tail<T: Transport + ?Sized>(transport: &mut T, delay_us: u32) {
    write_paced(transport, &FRAME_TAIL, delay_us);
}

/// Send a complete frame: body up to the cursor, then the terminator
///
/// Returns the number of bytes put on the wire.
pub fn send_frame<T: Transport + ?Sized, const N: usize>(
    transport: &mut T,
    frame: &FrameBuffer<N>,
    delay_us: u32,
) -> usize {
    let body = frame.as_bytes();
    write_paced(transport, body, delay_us);
    write_tail(transport, delay_us);
    body.len() + FRAME_TAIL.len()
}
