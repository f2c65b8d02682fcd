//! PadBridge: the single run-to-completion loop.
//!
//! One iteration drains at most one command line from the source, applies
//! it to the [`PadController`], and then (in Probe mode) scans the button
//! pins once, forwarding any change reports to the sink. There is exactly
//! one execution context; the controller state is owned here and never
//! shared.

use crate::controller::PadController;
use crate::input::{CommandSource, InputError};
use crate::output::{OutputError, ReportSink};
use crate::pins::{PinBank, SNAPSHOT_SLOTS};

/// A bridge that interprets host commands and drives/samples the pin bank.
pub struct PadBridge<S, K, B> {
    source: S,
    sink: K,
    bank: B,
    controller: PadController,
}

impl<S: CommandSource, K: ReportSink, B: PinBank> PadBridge<S, K, B> {
    /// Create a bridge. Brings the bank up in Normal mode, as the device
    /// does at power-on.
    pub fn new(source: S, sink: K, mut bank: B) -> Self {
        let controller = PadController::new(&mut bank);
        Self {
            source,
            sink,
            bank,
            controller,
        }
    }

    /// Run the bridge loop indefinitely.
    ///
    /// Per-iteration errors are swallowed: nothing is fatal and the loop
    /// never halts.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.step().await;
        }
    }

    /// One loop iteration.
    ///
    /// Returns the iteration's first error for observability; a rejected
    /// line still lets the probe scan run, like any other iteration.
    pub async fn step(&mut self) -> Result<(), BridgeError> {
        let input_err = match self.source.poll_line().await {
            Ok(Some(command)) => {
                if let Some(reply) = self.controller.apply(command, &mut self.bank) {
                    self.sink.send(reply).await.map_err(BridgeError::Output)?;
                }
                None
            }
            Ok(None) => None,
            Err(err) => Some(err),
        };

        // A scan can report at most one byte per snapshot slot.
        let mut reports = [0u8; SNAPSHOT_SLOTS];
        let mut count = 0;
        self.controller.scan(&mut self.bank, |byte| {
            reports[count] = byte;
            count += 1;
        });
        if count > 0 {
            self.sink
                .send(&reports[..count])
                .await
                .map_err(BridgeError::Output)?;
        }

        match input_err {
            Some(err) => Err(BridgeError::Input(err)),
            None => Ok(()),
        }
    }

    /// Get a reference to the controller state.
    pub fn controller(&self) -> &PadController {
        &self.controller
    }

    /// Decompose the bridge into its parts.
    pub fn into_parts(self) -> (S, K, B, PadController) {
        (self.source, self.sink, self.bank, self.controller)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the command source.
    Input(InputError),
    /// Error from the report sink.
    Output(OutputError),
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::pins::{Level, PinMode};
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use dspad_proto::{Command, Mode, ParseError, MODE_INDICATOR_PIN};
    use std::sync::{Arc, Mutex};
    use std::vec;
    use std::vec::Vec;

    // Scripted command source: one entry per poll.
    struct MockSource {
        polls: Vec<Result<Option<Command>, InputError>>,
        index: usize,
    }

    impl MockSource {
        fn new(polls: Vec<Result<Option<Command>, InputError>>) -> Self {
            Self { polls, index: 0 }
        }
    }

    impl CommandSource for MockSource {
        fn poll_line(&mut self) -> impl Future<Output = Result<Option<Command>, InputError>> {
            let result = if self.index < self.polls.len() {
                let r = self.polls[self.index];
                self.index += 1;
                r
            } else {
                Ok(None)
            };
            core::future::ready(result)
        }
    }

    // Collecting report sink; the Arc handle stays inspectable after the
    // sink moves into the bridge.
    struct MockSink {
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ReportSink for MockSink {
        fn send(&mut self, bytes: &[u8]) -> impl Future<Output = Result<(), OutputError>> {
            self.sent.lock().unwrap().push(bytes.to_vec());
            core::future::ready(Ok(()))
        }
    }

    struct BankState {
        levels: [Level; 31],
        modes: [Option<PinMode>; 31],
    }

    // Shared-handle pin bank, pokeable while the bridge owns its clone.
    #[derive(Clone)]
    struct MockBank {
        inner: Arc<Mutex<BankState>>,
    }

    impl MockBank {
        fn new() -> Self {
            Self {
                inner: Arc::new(Mutex::new(BankState {
                    levels: [Level::High; 31],
                    modes: [None; 31],
                })),
            }
        }

        fn set_level(&self, pin: usize, level: Level) {
            self.inner.lock().unwrap().levels[pin] = level;
        }

        fn level(&self, pin: usize) -> Level {
            self.inner.lock().unwrap().levels[pin]
        }

        fn mode(&self, pin: usize) -> Option<PinMode> {
            self.inner.lock().unwrap().modes[pin]
        }
    }

    impl PinBank for MockBank {
        fn set_mode(&mut self, pin: u8, mode: PinMode) {
            self.inner.lock().unwrap().modes[pin as usize] = Some(mode);
        }

        fn write(&mut self, pin: u8, level: Level) {
            self.inner.lock().unwrap().levels[pin as usize] = level;
        }

        fn read(&mut self, pin: u8) -> Level {
            self.inner.lock().unwrap().levels[pin as usize]
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    #[test]
    fn test_power_on_configures_normal_mode() {
        let bank = MockBank::new();
        let bridge = PadBridge::new(MockSource::new(vec![]), MockSink::new(), bank.clone());

        assert_eq!(bridge.controller().mode(), Mode::Normal);
        assert_eq!(bank.mode(2), Some(PinMode::Output));
        assert_eq!(bank.level(MODE_INDICATOR_PIN as usize), Level::High);
    }

    #[test]
    fn test_version_reply_is_forwarded() {
        let sink = MockSink::new();
        let sent = sink.sent.clone();
        let source = MockSource::new(vec![Ok(Some(Command::Version))]);
        let mut bridge = PadBridge::new(source, sink, MockBank::new());

        assert!(block_on(bridge.step()).is_ok());
        assert_eq!(*sent.lock().unwrap(), vec![b"1.0\n".to_vec()]);
    }

    #[test]
    fn test_probe_reports_flow_to_the_sink() {
        let bank = MockBank::new();
        let sink = MockSink::new();
        let sent = sink.sent.clone();
        let source = MockSource::new(vec![
            Ok(Some(Command::SetMode(Mode::Probe))),
            Ok(None),
            Ok(None),
        ]);
        let mut bridge = PadBridge::new(source, sink, bank.clone());

        // Iteration 1: mode switch, all pins still released.
        assert!(block_on(bridge.step()).is_ok());
        // Iteration 2: pin 5 goes low between iterations.
        bank.set_level(5, Level::Low);
        assert!(block_on(bridge.step()).is_ok());
        // Iteration 3: stable, nothing to report.
        assert!(block_on(bridge.step()).is_ok());

        assert_eq!(*sent.lock().unwrap(), vec![vec![53]]);
    }

    #[test]
    fn test_rejected_line_still_scans() {
        let bank = MockBank::new();
        let sink = MockSink::new();
        let sent = sink.sent.clone();
        let source = MockSource::new(vec![
            Ok(Some(Command::SetMode(Mode::Probe))),
            Err(InputError::Parse(ParseError::UnknownTag)),
        ]);
        let mut bridge = PadBridge::new(source, sink, bank.clone());

        assert!(block_on(bridge.step()).is_ok());
        bank.set_level(8, Level::Low);

        let result = block_on(bridge.step());
        assert!(matches!(
            result,
            Err(BridgeError::Input(InputError::Parse(_)))
        ));
        // The scan ran despite the rejected line.
        assert_eq!(*sent.lock().unwrap(), vec![vec![56]]);
    }
}
