//! USB CDC-ACM serial link: command source and report sink.
//!
//! The command channel is a native USB serial port: the host sees a COM
//! port, and the nominal 9600 baud line coding is cosmetic on the USB
//! transport. Command lines are assembled
//! from bulk packets with a bounded buffer; a line that outgrows the
//! protocol bounds is discarded up to its newline so one oversized line
//! cannot corrupt the next.

use dspad_core::{CommandSource, InputError, OutputError, ReportSink};
use dspad_proto::{parse_line, Command, MAX_LINE_LENGTH};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{with_timeout, Duration};
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, Sender, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use heapless::{Deque, Vec};

/// Bound on one blocking serial poll, so a partial line never stalls the
/// bridge loop.
pub const READ_TIMEOUT: Duration = Duration::from_millis(5);

/// USB full-speed bulk packet size.
const PACKET_SIZE: usize = 64;

/// Carry-over capacity for bytes that arrive behind a completed line.
const PENDING_CAPACITY: usize = 2 * PACKET_SIZE;

/// Register the CDC-ACM serial function on the USB builder.
pub fn configure_usb_serial<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
) -> CdcAcmClass<'d, Driver<'d, USB>> {
    CdcAcmClass::new(builder, state, PACKET_SIZE as u16)
}

/// Command source reading newline-terminated lines from the CDC port.
pub struct UsbCommandSource<'d> {
    rx: Receiver<'d, Driver<'d, USB>>,
    /// Bytes received behind the last completed line.
    pending: Deque<u8, PENDING_CAPACITY>,
    line: Vec<u8, MAX_LINE_LENGTH>,
    /// Discarding an oversized line until its newline arrives.
    overflow: bool,
}

impl<'d> UsbCommandSource<'d> {
    #[must_use]
    pub fn new(rx: Receiver<'d, Driver<'d, USB>>) -> Self {
        Self {
            rx,
            pending: Deque::new(),
            line: Vec::new(),
            overflow: false,
        }
    }

    /// Feed one byte into the line buffer. Returns the parse outcome once
    /// a full line has been assembled.
    fn accept(&mut self, byte: u8) -> Option<Result<Command, InputError>> {
        if byte == b'\n' {
            if self.overflow {
                self.overflow = false;
                return Some(Err(InputError::BufferOverflow));
            }
            let parsed = parse_line(&self.line).map_err(InputError::Parse);
            self.line.clear();
            return Some(parsed);
        }

        if self.overflow {
            return None;
        }
        if self.line.push(byte).is_err() {
            // Oversized line - drop it up to its newline.
            self.overflow = true;
            self.line.clear();
        }
        None
    }
}

impl CommandSource for UsbCommandSource<'_> {
    async fn poll_line(&mut self) -> Result<Option<Command>, InputError> {
        // Serve bytes buffered from an earlier packet first.
        while let Some(byte) = self.pending.pop_front() {
            if let Some(result) = self.accept(byte) {
                return result.map(Some);
            }
        }

        let mut packet = [0u8; PACKET_SIZE];
        loop {
            let read = match with_timeout(READ_TIMEOUT, self.rx.read_packet(&mut packet)).await {
                Err(_) => return Ok(None),
                Ok(Err(EndpointError::Disabled)) => {
                    // Host detached: block until the port is back rather
                    // than spinning through empty polls.
                    self.rx.wait_connection().await;
                    return Err(InputError::Disconnected);
                }
                Ok(Err(_)) => return Err(InputError::Io),
                Ok(Ok(read)) => read,
            };

            for (i, &byte) in packet[..read].iter().enumerate() {
                if let Some(result) = self.accept(byte) {
                    // Stash whatever followed the line for the next poll.
                    for &rest in &packet[i + 1..read] {
                        if self.pending.push_back(rest).is_err() {
                            return Err(InputError::BufferOverflow);
                        }
                    }
                    return result.map(Some);
                }
            }
        }
    }
}

/// Report sink writing reply/report bytes to the CDC port.
pub struct UsbReportSink<'d> {
    tx: Sender<'d, Driver<'d, USB>>,
}

impl<'d> UsbReportSink<'d> {
    #[must_use]
    pub fn new(tx: Sender<'d, Driver<'d, USB>>) -> Self {
        Self { tx }
    }
}

impl ReportSink for UsbReportSink<'_> {
    async fn send(&mut self, bytes: &[u8]) -> Result<(), OutputError> {
        for chunk in bytes.chunks(PACKET_SIZE) {
            self.tx.write_packet(chunk).await.map_err(|e| match e {
                EndpointError::Disabled => OutputError::NotReady,
                _ => OutputError::Io,
            })?;
        }
        Ok(())
    }
}
