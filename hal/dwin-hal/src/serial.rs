//! UART-backed transport
//!
//! Bridges any `embedded_io::Write` sink (a blocking UART TX half, a USB
//! CDC endpoint, a host serial port) and any `embedded_hal` delay provider
//! into a [`Transport`].

use embedded_hal::delay::DelayNs;
use embedded_io::Write;

use crate::transport::Transport;

/// Transport over a blocking serial writer and a delay provider
///
/// Write errors from the sink are not propagated: the encoder above is
/// fire-and-forget. They are counted so a supervisor can notice a dead link.
pub struct SerialTransport<W, D> {
    writer: W,
    delay: D,
    write_errors: u32,
}

impl<W: Write, D: DelayNs> SerialTransport<W, D> {
    /// Wrap a serial writer and a delay provider
    pub fn new(writer: W, delay: D) -> Self {
        Self {
            writer,
            delay,
            write_errors: 0,
        }
    }

    /// Number of bytes the sink rejected since construction
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Release the underlying writer and delay provider
    pub fn release(self) -> (W, D) {
        (self.writer, self.delay)
    }
}

impl<W: Write, D: DelayNs> Transport for SerialTransport<W, D> {
    fn write_byte(&mut self, byte: u8) {
        if self.writer.write_all(&[byte]).is_err() {
            self.write_errors = self.write_errors.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("serial write failed (total {})", self.write_errors);
        }
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use std::vec::Vec;

    /// Sink that accepts a fixed number of bytes, then fails
    struct LimitedSink {
        data: Vec<u8>,
        limit: usize,
    }

    #[derive(Debug)]
    struct SinkFull;

    impl embedded_io::Error for SinkFull {
        fn kind(&self) -> embedded_io::ErrorKind {
            embedded_io::ErrorKind::OutOfMemory
        }
    }

    impl embedded_io::ErrorType for LimitedSink {
        type Error = SinkFull;
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            if self.data.len() >= self.limit {
                return Err(SinkFull);
            }
            let n = buf.len().min(self.limit - self.data.len());
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Delay that records the requested durations
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
        calls: usize,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
            self.calls += 1;
        }
    }

    fn sink(limit: usize) -> LimitedSink {
        LimitedSink {
            data: Vec::new(),
            limit,
        }
    }

    #[test]
    fn test_bytes_reach_writer() {
        let mut transport = SerialTransport::new(sink(16), MockDelay::default());

        for byte in [0xAA, 0x11, 0xCC, 0x33] {
            transport.write_byte(byte);
        }

        assert_eq!(transport.write_errors(), 0);
        let (writer, _) = transport.release();
        assert_eq!(writer.data, [0xAA, 0x11, 0xCC, 0x33]);
    }

    #[test]
    fn test_delay_forwarded_in_microseconds() {
        let mut transport = SerialTransport::new(sink(0), MockDelay::default());

        transport.delay_us(1);
        transport.delay_us(5);

        let (_, delay) = transport.release();
        assert_eq!(delay.total_ns, 6_000);
        assert!(delay.calls >= 2);
    }

    #[test]
    fn test_write_errors_counted_not_propagated() {
        let mut transport = SerialTransport::new(sink(2), MockDelay::default());

        for byte in 0..5u8 {
            transport.write_byte(byte);
        }

        assert_eq!(transport.write_errors(), 3);
        let (writer, _) = transport.release();
        assert_eq!(writer.data, [0, 1]);
    }

    #[test]
    fn test_infallible_sink() {
        struct NullSink;

        impl embedded_io::ErrorType for NullSink {
            type Error = Infallible;
        }

        impl Write for NullSink {
            fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
                Ok(buf.len())
            }

            fn flush(&mut self) -> Result<(), Self::Error> {
                Ok(())
            }
        }

        let mut transport = SerialTransport::new(NullSink, MockDelay::default());
        transport.write_byte(0xAA);
        assert_eq!(transport.write_errors(), 0);
    }
}
