//! Driver for DWIN serial graphics LCD modules
//!
//! This crate provides:
//! - [`Dwin`], a driver that encodes drawing and memory commands and
//!   streams them over any [`dwin_hal::Transport`]
//! - [`PanelConfig`], the per-panel dimensions, pacing and chunk size
//! - [`transmitter`], the byte-paced frame writer used by the driver
//!
//! # Example
//!
//! ```ignore
//! use dwin_display::{Dwin, PanelConfig};
//! use dwin_hal::SerialTransport;
//! use dwin_protocol::{Rgb565, TextStyle};
//!
//! let transport = SerialTransport::new(uart_tx, delay);
//! let mut lcd = Dwin::new(transport, PanelConfig::default())?;
//!
//! let style = TextStyle {
//!     width_adjust: false,
//!     show_background: true,
//!     size: 2,
//!     color: Rgb565::WHITE,
//!     background: Rgb565::BLACK,
//! };
//! lcd.draw_string(style, 12, 40, "Ready");
//! lcd.icon_show(9, 3, 20, 100);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules.
#[macro_use]
mod fmt;

pub mod config;
pub mod driver;
pub mod transmitter;

// Re-export key types
pub use config::{ConfigError, PanelConfig};
pub use driver::{Dwin, UploadSummary};
