//! Report sink trait and error types.

use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Serial/communication I/O error.
    Io,
    /// Link not ready (e.g. USB not enumerated).
    NotReady,
}

/// Async sink for device-to-host bytes: the `VER` reply and probe reports.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait ReportSink {
    /// Write raw bytes to the host.
    ///
    /// May block until the link accepts the data.
    fn send(&mut self, bytes: &[u8]) -> impl Future<Output = Result<(), OutputError>>;
}
