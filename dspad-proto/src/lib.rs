//! Serial wire protocol types and parsing for the DS pad bridge.
//!
//! This crate provides everything needed to speak the bridge's line
//! protocol:
//!
//! - **Types**: Core data structures for the bridge's configuration
//!   - [`Mode`] - Operating mode (Normal / Probe)
//!   - [`Button`] - Logical pad button and the `KEY` dispatch table
//!   - [`PadCode`] - Decoded button-to-pin mapping
//! - **Parsing**: [`parse_line()`] turns one host line into a [`Command`]
//!
//! # Protocol
//!
//! Newline-terminated ASCII lines; the first three bytes are the command
//! tag, matched exactly, and the body starts at byte offset 4:
//!
//! | Command | Format           | Effect                                  | Response |
//! |---------|------------------|-----------------------------------------|----------|
//! | VER     | `VER`            | none                                    | `1.0\n`  |
//! | MOD     | `MOD <digit>`    | `1` = Normal, `2` = Probe               | none     |
//! | CCD     | `CCD <12 chars>` | replaces the pad code wholesale         | none     |
//! | KEY     | `KEY <id><0/1>`  | drives one button line (Normal mode)    | none     |
//!
//! In Probe mode the device additionally emits one unsolicited byte per
//! observed pin change, value `pin +`[`REPORT_BASE`], with no
//! acknowledgement.
//!
//! # Example
//!
//! ```
//! use dspad_proto::{parse_line, Button, Command, Mode};
//!
//! assert_eq!(parse_line(b"MOD 2\n"), Ok(Command::SetMode(Mode::Probe)));
//! assert_eq!(
//!     parse_line(b"KEY A1\n"),
//!     Ok(Command::Key { button: Button::A, pressed: true })
//! );
//! assert!(parse_line(b"KEY Z1\n").is_err());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod parser;
pub mod types;

// Re-export types at crate root for convenience
pub use parser::{parse_line, Command, ParseError, MAX_LINE_LENGTH};
pub use types::{
    Button, CodeError, Mode, PadCode, BUTTON_COUNT, CODE_PIN_OFFSET, MAX_PIN, MODE_INDICATOR_PIN,
    PROTOCOL_VERSION, REPORT_BASE, STATUS_LED_PIN, VERSION_REPLY,
};
