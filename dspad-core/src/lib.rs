//! Platform-agnostic controller logic for the DS pad bridge.
//!
//! This crate provides the bridge's state machine and seams without any
//! platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`pins`]: The GPIO seam ([`PinBank`]) and the fixed pin plan
//! - [`controller`]: Command interpretation and probe scanning ([`PadController`])
//! - [`input`]: Command source trait ([`CommandSource`])
//! - [`output`]: Report sink trait ([`ReportSink`])
//! - [`bridge`]: The run-to-completion loop ([`PadBridge`])
//!
//! # Operating model
//!
//! The device powers on in Normal mode with every button line an output
//! idling High. Each loop iteration drains at most one host command line
//! and, in Probe mode, scans the button pins once, emitting one report
//! byte per observed level change. All mutable state lives in a single
//! [`PadController`] owned by the loop; there is no second execution
//! context and nothing to lock.
//!
//! # Example
//!
//! ```
//! use dspad_core::{Level, PadController, PinBank, PinMode};
//!
//! struct FlatBank([Level; 31]);
//!
//! impl PinBank for FlatBank {
//!     fn set_mode(&mut self, _pin: u8, _mode: PinMode) {}
//!     fn write(&mut self, pin: u8, level: Level) {
//!         self.0[pin as usize] = level;
//!     }
//!     fn read(&mut self, pin: u8) -> Level {
//!         self.0[pin as usize]
//!     }
//! }
//!
//! let mut bank = FlatBank([Level::High; 31]);
//! let mut controller = PadController::new(&mut bank);
//!
//! // Map button A onto pin 1 and press it.
//! controller.handle_line(b"CCD @ABCDEFGHIJK\n", &mut bank).unwrap();
//! controller.handle_line(b"KEY A1\n", &mut bank).unwrap();
//! assert_eq!(bank.0[1], Level::Low);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod controller;
pub mod input;
pub mod output;
pub mod pins;

// Re-export main types at crate root
pub use bridge::{BridgeError, PadBridge};
pub use controller::PadController;
pub use input::{CommandSource, InputError};
pub use output::{OutputError, ReportSink};
pub use pins::{button_pins, scan_pins, Level, PinBank, PinMode};

// Re-export the wire protocol for consumers that only depend on this crate
pub use dspad_proto::{
    parse_line, Button, Command, Mode, PadCode, ParseError, MAX_LINE_LENGTH, MODE_INDICATOR_PIN,
    PROTOCOL_VERSION, REPORT_BASE, STATUS_LED_PIN, VERSION_REPLY,
};
