//! DWIN Serial LCD Command Protocol
//!
//! This crate builds the command frames understood by DWIN intelligent
//! graphics LCD modules (the controller family found on many 3D printer
//! front panels). The module has its own command processor, 32 KiB of SRAM
//! and a flash-backed picture store; the host only streams commands.
//!
//! # Frame Format
//!
//! ```text
//! ┌──────┬────────┬──────────────────┬──────────────┬─────────────┐
//! │ 0xAA │ OPCODE │ PARAMETERS       │ TEXT / DATA  │ CC 33 C3 3C │
//! │ 1B   │ 1B     │ big-endian words │ 0–N bytes    │ 4B          │
//! └──────┴────────┴──────────────────┴──────────────┴─────────────┘
//! ```
//!
//! Encoding is pure: every [`Command`] is turned into a fresh [`FrameBuffer`]
//! owned by the caller, so no state is shared between two encodings.
//! Putting the bytes on the wire is the job of `dwin-display`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod command;
pub mod frame;
pub mod geometry;
pub mod memory;
pub mod text;

pub use color::Rgb565;
pub use command::{Command, EncodeStatus, NumberStyle, TextStyle, ZeroMode};
pub use frame::{send_buf_size, FrameBuffer, FRAME_START, FRAME_TAIL, SEND_BUF_SIZE};
pub use geometry::{Bounds, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use memory::{Chunk, ChunkPlan, MemoryTarget, MAX_CHUNK_SIZE};
pub use text::TextSource;
