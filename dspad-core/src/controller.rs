//! The command interpreter and pin controller.
//!
//! [`PadController`] owns the bridge's entire mutable state: the operating
//! mode, the current pad code, and the probe snapshot. Commands and scans
//! run against a [`PinBank`], so the logic is fully testable on host.

use crate::pins::{button_pins, scan_pins, Level, PinBank, PinMode, SNAPSHOT_SLOTS};
use dspad_proto::{
    parse_line, Button, Command, Mode, PadCode, ParseError, MODE_INDICATOR_PIN, REPORT_BASE,
    VERSION_REPLY,
};

/// Mode, mapping, and snapshot state, exclusively owned by the bridge loop.
#[derive(Debug)]
pub struct PadController {
    mode: Mode,
    code: Option<PadCode>,
    snapshot: [Level; SNAPSHOT_SLOTS],
}

impl PadController {
    /// Create a controller and bring the bank up in Normal mode, as the
    /// device does at power-on.
    pub fn new<B: PinBank>(bank: &mut B) -> Self {
        let mut controller = Self {
            mode: Mode::Normal,
            code: None,
            snapshot: [Level::High; SNAPSHOT_SLOTS],
        };
        controller.configure_mode(Mode::Normal, bank);
        controller
    }

    /// Current operating mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current pad code, if one has been accepted.
    #[inline]
    #[must_use]
    pub fn code(&self) -> Option<&PadCode> {
        self.code.as_ref()
    }

    /// Parse and apply one line. Returns the reply bytes to write, if any.
    ///
    /// A rejected line is reported but has no pin effect.
    pub fn handle_line<B: PinBank>(
        &mut self,
        line: &[u8],
        bank: &mut B,
    ) -> Result<Option<&'static [u8]>, ParseError> {
        parse_line(line).map(|command| self.apply(command, bank))
    }

    /// Apply one parsed command. Returns the reply bytes to write, if any.
    pub fn apply<B: PinBank>(&mut self, command: Command, bank: &mut B) -> Option<&'static [u8]> {
        match command {
            Command::Version => Some(VERSION_REPLY),
            Command::SetMode(mode) => {
                self.configure_mode(mode, bank);
                None
            }
            Command::SetCode(code) => {
                self.code = Some(code);
                None
            }
            Command::Key { button, pressed } => {
                self.drive_key(button, pressed, bank);
                None
            }
        }
    }

    /// Reconfigure every pin for the given mode. Also the power-on path.
    pub fn configure_mode<B: PinBank>(&mut self, mode: Mode, bank: &mut B) {
        self.mode = mode;

        match mode {
            Mode::Normal => {
                bank.write(MODE_INDICATOR_PIN, Level::High);
                // Button lines are active-low, so outputs idle High.
                for pin in button_pins() {
                    bank.set_mode(pin, PinMode::Output);
                    bank.write(pin, Level::High);
                }
            }
            Mode::Probe => {
                bank.write(MODE_INDICATOR_PIN, Level::Low);
                self.snapshot = [Level::High; SNAPSHOT_SLOTS];
                for pin in scan_pins() {
                    bank.set_mode(pin, PinMode::InputPullUp);
                }
            }
        }
    }

    /// Drive one mapped button line. Honored only in Normal mode, and only
    /// once a pad code has been accepted.
    fn drive_key<B: PinBank>(&mut self, button: Button, pressed: bool, bank: &mut B) {
        if self.mode != Mode::Normal {
            return;
        }
        let Some(code) = self.code else {
            return;
        };

        let level = if pressed { Level::Low } else { Level::High };
        bank.write(code.pin(button), level);
    }

    /// Sample every scannable pin once, reporting changes.
    ///
    /// Calls `report` with one byte (`pin +`[`REPORT_BASE`]) per pin whose
    /// level differs from the snapshot, updating the snapshot as it goes.
    /// Does nothing outside Probe mode.
    pub fn scan<B: PinBank>(&mut self, bank: &mut B, mut report: impl FnMut(u8)) {
        if self.mode != Mode::Probe {
            return;
        }

        for pin in scan_pins() {
            let level = bank.read(pin);
            if level != self.snapshot[pin as usize] {
                self.snapshot[pin as usize] = level;
                report(pin + REPORT_BASE);
            }
        }
    }

    /// Last-known level for a snapshot slot. Probe-mode bookkeeping only.
    #[inline]
    #[must_use]
    pub fn snapshot(&self, pin: u8) -> Level {
        self.snapshot[pin as usize]
    }
}
