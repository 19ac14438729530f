//! DWIN display driver
//!
//! [`Dwin`] owns the transport and turns each drawing call into exactly one
//! encoded frame (or, for memory writes, a run of sub-frames) sent before
//! the call returns. Frames are built in a buffer local to the call, and
//! `&mut self` keeps a second command from interleaving on the wire. Share
//! a driver between tasks by putting it behind a mutex.
//!
//! The frame buffer capacity `N` is fixed at compile time. [`Dwin::new`]
//! uses the capacity for the default 272 px panel; wider panels need
//! [`Dwin::with_buffer`] and a capacity of at least
//! [`dwin_protocol::send_buf_size`]`(width)`.

use dwin_hal::Transport;
use dwin_protocol::{
    ChunkPlan, Command, EncodeStatus, FrameBuffer, MemoryTarget, NumberStyle, Rgb565, TextSource,
    TextStyle, SEND_BUF_SIZE,
};

use crate::config::{ConfigError, PanelConfig};
use crate::transmitter;

/// Outcome of a chunked memory write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UploadSummary {
    /// Sub-frames sent
    pub chunks: usize,
    /// Payload bytes sent
    pub bytes: usize,
}

/// Pixel offsets of the dots forming the degree sign
const DEGREE_DOTS: [(u16, u16); 8] = [
    (1, 0),
    (2, 0),
    (0, 1),
    (3, 1),
    (0, 2),
    (3, 2),
    (1, 3),
    (2, 3),
];

/// Driver for a DWIN serial LCD module with an `N`-byte frame buffer
pub struct Dwin<T, const N: usize = SEND_BUF_SIZE> {
    transport: T,
    config: PanelConfig,
}

impl<T: Transport> Dwin<T> {
    /// Create a driver with the default frame buffer
    ///
    /// Fails with [`ConfigError::BufferTooSmall`] for panels wider than
    /// 272 px; use [`Dwin::with_buffer`] for those.
    pub fn new(transport: T, config: PanelConfig) -> Result<Self, ConfigError> {
        Self::with_buffer(transport, config)
    }
}

impl<T: Transport, const N: usize> Dwin<T, N> {
    /// Create a driver whose frame buffer holds `N` bytes
    pub fn with_buffer(transport: T, config: PanelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.frame_capacity() > N {
            return Err(ConfigError::BufferTooSmall);
        }
        Ok(Self { transport, config })
    }

    /// Panel configuration in use
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the underlying transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Encode and transmit one command
    ///
    /// Clamping and truncation are reported, never refused: the frame is
    /// always sent.
    pub fn send(&mut self, command: &Command<'_>) -> EncodeStatus {
        let mut frame = FrameBuffer::<N>::new();
        let status = command.encode_into(&self.config.bounds(), &mut frame);
        let sent = transmitter::send_frame(&mut self.transport, &frame, self.config.byte_delay_us);

        trace!("sent frame {=u8:#x} ({} bytes)", command.opcode(), sent);
        if status.clamped {
            debug!("frame {=u8:#x}: coordinates clamped to panel", command.opcode());
        }
        if status.truncated {
            debug!("frame {=u8:#x}: payload truncated to buffer", command.opcode());
        }
        status
    }

    /// Draw text with its upper-left corner at (x, y)
    pub fn draw_string<'a>(
        &mut self,
        style: TextStyle,
        x: u16,
        y: u16,
        text: impl Into<TextSource<'a>>,
    ) -> EncodeStatus {
        self.send(&Command::DrawString {
            style,
            x,
            y,
            text: text.into(),
        })
    }

    /// Draw a fixed-point number
    ///
    /// `value` is the number scaled by 10^`fraction_digits`; the controller
    /// places the decimal point.
    pub fn draw_float(
        &mut self,
        style: NumberStyle,
        integer_digits: u8,
        fraction_digits: u8,
        x: u16,
        y: u16,
        value: i32,
    ) -> EncodeStatus {
        self.send(&Command::DrawFloat {
            style,
            integer_digits,
            fraction_digits,
            x,
            y,
            value,
        })
    }

    /// Draw a `width × height` dot
    pub fn draw_point(
        &mut self,
        color: Rgb565,
        width: u8,
        height: u8,
        x: u16,
        y: u16,
    ) -> EncodeStatus {
        self.send(&Command::DrawPoint {
            color,
            width,
            height,
            x,
            y,
        })
    }

    /// Draw a 4 × 4 degree sign with its upper-left corner at (x, y)
    ///
    /// Dot coordinates wrap modulo 2^16 like the controller's 16-bit
    /// registers, so a sign placed at `u16::MAX` spills over to 0.
    pub fn draw_degree_symbol(&mut self, color: Rgb565, x: u16, y: u16) -> EncodeStatus {
        DEGREE_DOTS
            .iter()
            .fold(EncodeStatus::default(), |status, &(dx, dy)| {
                status.merge(self.draw_point(
                    color,
                    1,
                    1,
                    x.wrapping_add(dx),
                    y.wrapping_add(dy),
                ))
            })
    }

    /// Show an icon from the controller's icon library
    pub fn icon_show(&mut self, library: u8, picture: u8, x: u16, y: u16) -> EncodeStatus {
        self.send(&Command::IconShow {
            library,
            picture,
            x,
            y,
        })
    }

    /// Show an icon previously written to data SRAM at `source_addr`
    pub fn sram_icon_display(&mut self, x: u16, y: u16, source_addr: u16) -> EncodeStatus {
        self.send(&Command::SramIconDisplay { x, y, source_addr })
    }

    /// Copy a rectangle of virtual area `cache` to (x, y) on screen
    #[allow(clippy::too_many_arguments)]
    pub fn area_copy(
        &mut self,
        cache: u8,
        x_start: u16,
        y_start: u16,
        x_end: u16,
        y_end: u16,
        x: u16,
        y: u16,
    ) -> EncodeStatus {
        self.send(&Command::AreaCopy {
            cache,
            x_start,
            y_start,
            x_end,
            y_end,
            x,
            y,
        })
    }

    /// Commit data SRAM into flash picture slot `picture`
    pub fn write_picture_memory(&mut self, picture: u8) -> EncodeStatus {
        self.send(&Command::WritePictureMemory { picture })
    }

    /// Upload `data` into data SRAM starting at `dest_addr`
    pub fn save_in_sram(&mut self, data: &[u8], dest_addr: u16) -> UploadSummary {
        self.write_memory(MemoryTarget::Sram, data, dest_addr)
    }

    /// Upload `data` into device memory in `max_chunk`-sized sub-frames
    ///
    /// Each sub-frame is the write-memory header, the raw chunk bytes and
    /// the terminator. Chunk data goes straight to the transport, so the
    /// payload is not limited by the frame buffer size.
    pub fn write_memory(&mut self, target: MemoryTarget, data: &[u8], base: u16) -> UploadSummary {
        let delay = self.config.byte_delay_us;
        let bounds = self.config.bounds();
        let plan = ChunkPlan::new(base, data.len(), usize::from(self.config.max_chunk));

        if usize::from(base) + data.len() > target.size() {
            warn!(
                "memory write of {} bytes at {=u16:#x} runs past end of region",
                data.len(),
                base
            );
        }
        debug!(
            "memory write: {} bytes at {=u16:#x} in {} chunks",
            data.len(),
            base,
            plan.chunk_count()
        );

        let mut summary = UploadSummary::default();
        for chunk in plan {
            let header = Command::WriteMemory {
                target,
                address: chunk.address,
            };
            let mut frame = FrameBuffer::<N>::new();
            header.encode_into(&bounds, &mut frame);

            transmitter::write_paced(&mut self.transport, frame.as_bytes(), delay);
            transmitter::write_paced(&mut self.transport, &data[chunk.range.clone()], delay);
            transmitter::write_tail(&mut self.transport, delay);

            summary.chunks += 1;
            summary.bytes += chunk.len();
        }

        debug!(
            "memory write done: {} chunks, {} bytes",
            summary.chunks,
            summary.bytes
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwin_protocol::{send_buf_size, ZeroMode, FRAME_TAIL, SEND_BUF_SIZE};

    /// Buffer capacity for a 480 px wide panel
    const WIDE: usize = send_buf_size(480);
    use proptest::prelude::*;

    /// Transport that records every byte and pause
    #[derive(Default)]
    struct MockTransport {
        wire: Vec<u8>,
        delays: Vec<u32>,
    }

    impl Transport for MockTransport {
        fn write_byte(&mut self, byte: u8) {
            self.wire.push(byte);
        }

        fn delay_us(&mut self, us: u32) {
            self.delays.push(us);
        }
    }

    impl MockTransport {
        /// Split the wire into frames at each terminator
        fn frames(&self) -> Vec<&[u8]> {
            let mut frames = Vec::new();
            let mut start = 0;
            let mut i = 0;
            while i + FRAME_TAIL.len() <= self.wire.len() {
                if self.wire[i..i + FRAME_TAIL.len()] == FRAME_TAIL {
                    frames.push(&self.wire[start..i]);
                    i += FRAME_TAIL.len();
                    start = i;
                } else {
                    i += 1;
                }
            }
            frames
        }
    }

    fn driver() -> Dwin<MockTransport> {
        Dwin::new(MockTransport::default(), PanelConfig::default()).unwrap()
    }

    /// Payload that never contains the terminator sequence
    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 200) as u8).collect()
    }

    fn number_style() -> NumberStyle {
        NumberStyle {
            show_background: false,
            zero_fill: false,
            zero_mode: ZeroMode::Space,
            size: 0,
            color: Rgb565::WHITE,
            background: Rgb565::BLACK,
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PanelConfig {
            max_chunk: 0,
            ..PanelConfig::default()
        };
        assert!(matches!(
            Dwin::new(MockTransport::default(), config),
            Err(ConfigError::ZeroChunkSize)
        ));
    }

    #[test]
    fn test_draw_float_on_wire() {
        let mut dwin = driver();
        let status = dwin.draw_float(number_style(), 4, 0, 10, 20, 1234);

        assert!(status.is_clean());
        let wire = &dwin.transport().wire;
        assert_eq!(
            wire.as_slice(),
            &[
                0xAA, 0x14, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x04, 0x00, 0x00, 0x0A, 0x00, 0x14,
                0x00, 0x00, 0x04, 0xD2, 0xCC, 0x33, 0xC3, 0x3C,
            ]
        );
    }

    #[test]
    fn test_every_byte_paced() {
        let mut dwin = Dwin::new(
            MockTransport::default(),
            PanelConfig {
                byte_delay_us: 2,
                ..PanelConfig::default()
            },
        )
        .unwrap();

        dwin.icon_show(1, 2, 3, 4);
        dwin.save_in_sram(&payload(200), 0);

        let transport = dwin.release();
        assert_eq!(transport.delays.len(), transport.wire.len());
        assert!(transport.delays.iter().all(|&us| us == 2));
    }

    #[test]
    fn test_icon_clamped_to_configured_panel() {
        let config = PanelConfig::with_size(480, 272);
        let mut dwin = Dwin::<_, WIDE>::with_buffer(MockTransport::default(), config).unwrap();
        let status = dwin.icon_show(0, 7, 600, 600);

        assert!(status.clamped);
        let frames = dwin.transport().frames();
        assert_eq!(frames[0], &[0xAA, 0x23, 0x01, 0xDF, 0x01, 0x0F, 0x80, 0x07]);
    }

    #[test]
    fn test_default_buffer_rejects_wide_panel() {
        let config = PanelConfig::with_size(480, 272);
        assert!(matches!(
            Dwin::new(MockTransport::default(), config),
            Err(ConfigError::BufferTooSmall)
        ));
    }

    #[test]
    fn test_new_rejects_oversized_chunk() {
        let config = PanelConfig {
            max_chunk: 1000,
            ..PanelConfig::default()
        };
        assert!(matches!(
            Dwin::new(MockTransport::default(), config),
            Err(ConfigError::ChunkTooLarge)
        ));
    }

    #[test]
    fn test_full_line_on_wide_panel() {
        let config = PanelConfig::with_size(480, 272);
        let mut dwin = Dwin::<_, WIDE>::with_buffer(MockTransport::default(), config).unwrap();
        // 80 two-byte glyphs fill one line of the 6 px font
        let text = [0xB0u8; 160];
        let style = TextStyle {
            width_adjust: false,
            show_background: false,
            size: 0,
            color: Rgb565::WHITE,
            background: Rgb565::BLACK,
        };
        let status = dwin.draw_string(style, 0, 0, TextSource::Runtime(&text));

        assert!(!status.truncated);
        let frames = dwin.transport().frames();
        assert_eq!(frames[0].len(), WIDE);
        assert_eq!(&frames[0][11..], &text[..]);
    }

    #[test]
    fn test_sram_icon_clamped() {
        let mut dwin = driver();
        let status = dwin.sram_icon_display(5000, 5000, 0x0100);

        assert!(status.clamped);
        assert_eq!(
            dwin.transport().frames()[0],
            &[0xAA, 0x24, 0x01, 0x0F, 0x01, 0xDF, 0x80, 0x01, 0x00]
        );
    }

    #[test]
    fn test_long_string_sent_truncated() {
        let mut dwin = driver();
        let text = "0123456789".repeat(20);
        let status = dwin.draw_string(
            TextStyle {
                width_adjust: false,
                show_background: false,
                size: 1,
                color: Rgb565::WHITE,
                background: Rgb565::BLACK,
            },
            0,
            0,
            text.as_str(),
        );

        assert!(status.truncated);
        let frames = dwin.transport().frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), SEND_BUF_SIZE);
        assert!(text.as_bytes().starts_with(&frames[0][11..]));
    }

    #[test]
    fn test_static_string() {
        static LABEL: &[u8] = b"Prepare";
        let mut dwin = driver();
        let style = TextStyle {
            width_adjust: true,
            show_background: false,
            size: 2,
            color: Rgb565::WHITE,
            background: Rgb565::BLACK,
        };
        dwin.draw_string(style, 8, 9, TextSource::Static(LABEL));

        assert!(dwin.transport().frames()[0].ends_with(b"Prepare"));
    }

    #[test]
    fn test_area_copy_not_clamped() {
        let mut dwin = driver();
        let status = dwin.area_copy(2, 0, 0, 300, 500, 1000, 1000);

        assert!(status.is_clean());
        let frame = dwin.transport().frames()[0];
        assert_eq!(&frame[1..3], &[0x27, 0x82]);
        assert_eq!(&frame[frame.len() - 4..], &[0x03, 0xE8, 0x03, 0xE8]);
    }

    #[test]
    fn test_degree_symbol_is_eight_points() {
        let mut dwin = driver();
        let status = dwin.draw_degree_symbol(Rgb565::RED, 100, 50);

        assert!(status.is_clean());
        let frames = dwin.transport().frames();
        assert_eq!(frames.len(), 8);
        for (frame, &(dx, dy)) in frames.iter().zip(DEGREE_DOTS.iter()) {
            assert_eq!(frame[1], 0x02);
            assert_eq!(&frame[2..6], &[0xF8, 0x00, 0x01, 0x01]);
            assert_eq!(u16::from_be_bytes([frame[6], frame[7]]), 100 + dx);
            assert_eq!(u16::from_be_bytes([frame[8], frame[9]]), 50 + dy);
        }
    }

    #[test]
    fn test_degree_symbol_wraps_at_u16_max() {
        let mut dwin = driver();
        dwin.draw_degree_symbol(Rgb565::WHITE, u16::MAX, u16::MAX);

        let frames = dwin.transport().frames();
        // Dot (3, 1) lands at x = 2, y = 0 after wrapping
        let frame = frames[3];
        assert_eq!(u16::from_be_bytes([frame[6], frame[7]]), 2);
        assert_eq!(u16::from_be_bytes([frame[8], frame[9]]), 0);
        // Dot (0, 1) keeps x at u16::MAX
        assert_eq!(u16::from_be_bytes([frames[2][6], frames[2][7]]), u16::MAX);
    }

    #[test]
    fn test_write_picture_memory() {
        let mut dwin = driver();
        dwin.write_picture_memory(4);
        assert_eq!(
            dwin.transport().frames()[0],
            &[0xAA, 0x33, 0x5A, 0xA5, 0x04]
        );
    }

    #[test]
    fn test_save_three_hundred_bytes() {
        let mut dwin = driver();
        let data = payload(300);
        let summary = dwin.save_in_sram(&data, 0x2000);

        assert_eq!(summary, UploadSummary { chunks: 3, bytes: 300 });

        let frames = dwin.transport().frames();
        assert_eq!(frames.len(), 3);

        let expected = [(0x2000u16, 0..128), (0x2080, 128..256), (0x2100, 256..300)];
        for (frame, (address, range)) in frames.iter().zip(expected) {
            let [hi, lo] = address.to_be_bytes();
            assert_eq!(&frame[..5], &[0xAA, 0x31, 0x5A, hi, lo]);
            assert_eq!(&frame[5..], &data[range]);
        }
    }

    #[test]
    fn test_flash_target_selector() {
        let mut dwin = driver();
        dwin.write_memory(MemoryTarget::Flash, &[1, 2, 3], 0x0010);
        assert_eq!(
            dwin.transport().frames()[0],
            &[0xAA, 0x31, 0xA5, 0x00, 0x10, 1, 2, 3]
        );
    }

    #[test]
    fn test_empty_upload_sends_nothing() {
        let mut dwin = driver();
        let summary = dwin.save_in_sram(&[], 0);

        assert_eq!(summary, UploadSummary::default());
        assert!(dwin.transport().wire.is_empty());
    }

    #[test]
    fn test_configured_chunk_size() {
        let mut dwin = Dwin::new(
            MockTransport::default(),
            PanelConfig {
                max_chunk: 64,
                ..PanelConfig::default()
            },
        )
        .unwrap();
        let summary = dwin.save_in_sram(&payload(130), 0);

        assert_eq!(summary.chunks, 3);
        let frames = dwin.transport().frames();
        assert_eq!(frames[2][3..5], [0x00, 0x80]);
        assert_eq!(frames[2].len(), 5 + 2);
    }

    #[test]
    fn test_repeated_commands_identical_on_wire() {
        let mut first = driver();
        let mut second = driver();

        first.draw_string(
            TextStyle {
                width_adjust: false,
                show_background: true,
                size: 3,
                color: Rgb565::GREEN,
                background: Rgb565::BLACK,
            },
            1,
            2,
            "abc",
        );
        first.icon_show(1, 1, 1, 1);

        second.icon_show(1, 1, 1, 1);

        let first_frames = first.transport().frames();
        assert_eq!(first_frames[1], second.transport().frames()[0]);
    }

    proptest! {
        #[test]
        fn prop_upload_frames(len in 0usize..2000, base in 0u16..0x4000) {
            let mut dwin = driver();
            let data = payload(len);
            let summary = dwin.save_in_sram(&data, base);

            let chunks = len.div_ceil(128);
            prop_assert_eq!(summary.chunks, chunks);
            prop_assert_eq!(summary.bytes, len);

            let transport = dwin.release();
            prop_assert_eq!(transport.wire.len(), len + chunks * (5 + FRAME_TAIL.len()));

            let frames = transport.frames();
            prop_assert_eq!(frames.len(), chunks);

            let mut reassembled = Vec::new();
            for (index, frame) in frames.iter().enumerate() {
                let address = u16::from_be_bytes([frame[3], frame[4]]);
                prop_assert_eq!(address, base + (index * 128) as u16);
                reassembled.extend_from_slice(&frame[5..]);
            }
            prop_assert_eq!(reassembled, data);
        }
    }
}
