//! GPIO bank over RP2040 pins.
//!
//! The bank is indexed by wire-protocol pin numbers, keeping the host's
//! numbering intact: protocol pins 0..=21 land on GPIO0..=GPIO21, GPIO17
//! (the status LED, owned by the board) is never touched, and protocol
//! pin 30 (the mode indicator) lands on the onboard LED, GPIO25, since
//! the RP2040 has no GPIO30.
//!
//! [`Flex`] pins carry both personalities a button line needs: driven
//! output in Normal mode, pull-up input in Probe mode. Writes latch the
//! level even while a pin is an input; the latch takes effect when the
//! line next becomes an output.

use dspad_core::{Level, PinBank, PinMode};
use dspad_proto::{MODE_INDICATOR_PIN, STATUS_LED_PIN};
use embassy_rp::gpio::{Flex, Level as GpioLevel, Output, Pull};

/// Directly mapped line slots: protocol pins 0..=21.
const LINE_SLOTS: usize = 22;

/// Number of [`Flex`] pins handed to the bank (every slot except the
/// status LED).
pub const LINE_COUNT: usize = LINE_SLOTS - 1;

/// The RP2040 pin bank.
pub struct BoardPins<'d> {
    lines: [Option<Flex<'d>>; LINE_SLOTS],
    indicator: Output<'d>,
}

impl<'d> BoardPins<'d> {
    /// Build the bank from the 21 line pins (GPIO0..=16, 18..=21, in
    /// ascending order) and the indicator output.
    pub fn new(line_pins: [Flex<'d>; LINE_COUNT], indicator: Output<'d>) -> Self {
        let mut lines: [Option<Flex<'d>>; LINE_SLOTS] = core::array::from_fn(|_| None);

        let mut slot = 0;
        for pin in line_pins {
            if slot == STATUS_LED_PIN as usize {
                slot += 1;
            }
            lines[slot] = Some(pin);
            slot += 1;
        }

        Self { lines, indicator }
    }

    fn line_mut(&mut self, pin: u8) -> Option<&mut Flex<'d>> {
        self.lines.get_mut(pin as usize).and_then(Option::as_mut)
    }
}

fn gpio_level(level: Level) -> GpioLevel {
    match level {
        Level::Low => GpioLevel::Low,
        Level::High => GpioLevel::High,
    }
}

impl PinBank for BoardPins<'_> {
    fn set_mode(&mut self, pin: u8, mode: PinMode) {
        if let Some(line) = self.line_mut(pin) {
            match mode {
                PinMode::Output => line.set_as_output(),
                PinMode::InputPullUp => {
                    line.set_pull(Pull::Up);
                    line.set_as_input();
                }
            }
        }
    }

    fn write(&mut self, pin: u8, level: Level) {
        if pin == MODE_INDICATOR_PIN {
            self.indicator.set_level(gpio_level(level));
            return;
        }
        if let Some(line) = self.line_mut(pin) {
            line.set_level(gpio_level(level));
        }
    }

    fn read(&mut self, pin: u8) -> Level {
        // Unmapped slots read as released.
        match self.line_mut(pin) {
            Some(line) => {
                if line.is_low() {
                    Level::Low
                } else {
                    Level::High
                }
            }
            None => Level::High,
        }
    }
}
