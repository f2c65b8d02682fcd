//! Command source trait and error types.

use core::future::Future;
use dspad_proto::{Command, ParseError};

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Serial/communication I/O error.
    Io,
    /// The line was rejected by the protocol parser.
    Parse(ParseError),
    /// Connection lost (host detached).
    Disconnected,
    /// Line exceeded the protocol bounds and was discarded.
    BufferOverflow,
}

impl From<ParseError> for InputError {
    fn from(err: ParseError) -> Self {
        InputError::Parse(err)
    }
}

/// Async source of host command lines.
///
/// Implementations own the line assembly and the serial read timeout, so
/// the bridge loop stays executor-agnostic.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait CommandSource {
    /// Poll for the next complete command line.
    ///
    /// Resolves with `Ok(None)` when no complete line arrived within the
    /// implementation's read timeout; partial input stays buffered for the
    /// next poll. A rejected line resolves with [`InputError::Parse`] and
    /// is dropped whole.
    fn poll_line(&mut self) -> impl Future<Output = Result<Option<Command>, InputError>>;
}
