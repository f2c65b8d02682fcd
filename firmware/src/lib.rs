//! Serial command bridge firmware for a DS pad, for RP2040.
//!
//! This crate provides the embedded implementation of a bridge that lets a
//! host press a physical pad's buttons over a serial line, or watch the
//! pad's own buttons being pressed.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Enumerates as a USB CDC-ACM serial port (the command channel)
//! 2. Interprets newline-terminated commands (`VER`, `MOD`, `CCD`, `KEY`)
//! 3. Drives or samples the pad's button lines through GPIO
//!
//! # Hardware Configuration
//!
//! | Function           | GPIO        | Description                          |
//! |--------------------|-------------|--------------------------------------|
//! | Button lines       | 0-16, 18-21 | Wired to the pad (protocol pins 0..=21) |
//! | Status LED         | 17          | Board-owned, never touched           |
//! | Mode indicator     | 25          | Onboard LED (protocol pin 30): High = Normal, Low = Probe |
//!
//! The wire protocol's pin numbering is preserved verbatim; only the mode
//! indicator is relocated (the RP2040 has no GPIO30).
//!
//! # Architecture
//!
//! Two futures run concurrently, joined in `main`:
//!
//! - **USB stack**: the USB device state machine
//! - **Bridge loop**: the single command/scan loop ([`PadBridge`])
//!
//! All controller state is owned by the bridge loop; the two share
//! nothing but the CDC class itself.
//!
//! # Modules
//!
//! - [`gpio_bank`]: protocol-pin-indexed GPIO bank ([`BoardPins`])
//! - [`usb_serial`]: CDC-ACM link ([`UsbCommandSource`], [`UsbReportSink`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports all public items from [`dspad_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

// Re-export core types for convenience
pub use dspad_core::{
    button_pins, parse_line, scan_pins, BridgeError, Button, Command, CommandSource, InputError,
    Level, Mode, OutputError, PadBridge, PadCode, PadController, ParseError, PinBank, PinMode,
    ReportSink, MAX_LINE_LENGTH, MODE_INDICATOR_PIN, PROTOCOL_VERSION, REPORT_BASE,
    STATUS_LED_PIN, VERSION_REPLY,
};

pub mod gpio_bank;
pub mod usb_serial;

pub use gpio_bank::{BoardPins, LINE_COUNT};
pub use usb_serial::{configure_usb_serial, UsbCommandSource, UsbReportSink, READ_TIMEOUT};
