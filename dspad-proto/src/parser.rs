//! Line parser for host commands.
//!
//! Every command is a newline-terminated ASCII line whose first three bytes
//! are the tag, matched exactly and case-sensitively. The body, where a
//! command has one, starts at byte offset 4:
//!
//! ```text
//! VER              -> version query
//! MOD <digit>      -> 1 = Normal, 2 = Probe
//! CCD <12 chars>   -> replace the pad code wholesale
//! KEY <id><0/1>    -> drive one button line (1 = pressed, 0 = released)
//! ```
//!
//! A malformed line is rejected as a whole - unknown tag, short body, bad
//! digit - so garbage input never reaches a pin.

use crate::types::{Button, CodeError, Mode, PadCode};

/// Maximum line length for the protocol (including newline).
///
/// The longest valid line is `CCD` + space + 12 code characters = 16 bytes
/// plus the line ending. We use 24 for margin.
pub const MAX_LINE_LENGTH: usize = 24;

/// A fully validated host command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Command {
    /// `VER` - version query, answered with [`VERSION_REPLY`](crate::VERSION_REPLY).
    Version,
    /// `MOD` - switch operating mode.
    SetMode(Mode),
    /// `CCD` - replace the button-to-pin mapping.
    SetCode(PadCode),
    /// `KEY` - press or release one logical button.
    Key { button: Button, pressed: bool },
}

/// Why a line was rejected. Every variant is ignorable: the line is dropped
/// with no pin effect and no response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// First three bytes are not a known tag.
    UnknownTag,
    /// Line too short to carry the command's body.
    Truncated,
    /// `MOD` digit outside `1`/`2`.
    BadMode,
    /// `CCD` body rejected (see [`CodeError`]).
    BadCode(CodeError),
    /// `KEY` identifier character not in the dispatch table.
    UnknownKey,
    /// `KEY` state byte other than `0`/`1`.
    BadKeyState,
}

impl From<CodeError> for ParseError {
    fn from(err: CodeError) -> Self {
        ParseError::BadCode(err)
    }
}

/// Parse one line into a [`Command`].
///
/// Trailing LF and CR are stripped; the body is everything from byte
/// offset 4. The byte at offset 3 is not inspected - the layout is
/// fixed-offset, not token-separated.
pub fn parse_line(line: &[u8]) -> Result<Command, ParseError> {
    let line = strip_line_ending(line);
    let tag = line.get(..3).ok_or(ParseError::Truncated)?;
    let body = line.get(4..).unwrap_or(&[]);

    match tag {
        b"VER" => Ok(Command::Version),
        b"MOD" => {
            let digit = *body.first().ok_or(ParseError::Truncated)?;
            Mode::from_wire(digit)
                .map(Command::SetMode)
                .ok_or(ParseError::BadMode)
        }
        b"CCD" => Ok(Command::SetCode(PadCode::decode(body)?)),
        b"KEY" => parse_key(body),
        _ => Err(ParseError::UnknownTag),
    }
}

/// Parse a `KEY` body: identifier character followed by the state digit.
fn parse_key(body: &[u8]) -> Result<Command, ParseError> {
    let id = *body.first().ok_or(ParseError::Truncated)?;
    let state = *body.get(1).ok_or(ParseError::Truncated)?;

    let button = Button::from_key_char(id).ok_or(ParseError::UnknownKey)?;
    let pressed = match state {
        b'1' => true,
        b'0' => false,
        _ => return Err(ParseError::BadKeyState),
    };

    Ok(Command::Key { button, pressed })
}

/// Strip trailing CR and/or LF from a line.
#[inline]
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    &line[..end]
}
