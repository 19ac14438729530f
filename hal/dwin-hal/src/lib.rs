//! DWIN Hardware Abstraction Layer
//!
//! The command encoder only ever needs two things from the hardware: a way
//! to push one byte onto the serial line, and a way to busy-wait a few
//! microseconds between bytes. This crate names that seam so the encoder
//! can run against a real UART, a test recorder, or anything in between.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dwin-display (driver, frame transmit)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dwin-hal (this crate - Transport)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-io Write + embedded-hal Delay │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - byte sink with microsecond pacing
//!
//! # Adapters
//!
//! - [`serial::SerialTransport`] - `Transport` over any `embedded_io::Write`
//!   sink and `embedded_hal::delay::DelayNs` provider

#![no_std]
#![deny(unsafe_code)]

pub mod serial;
pub mod transport;

// Re-export key types at crate root for convenience
pub use serial::SerialTransport;
pub use transport::Transport;
