//! GPIO seam and the fixed pin plan.
//!
//! Pin numbers throughout are wire-protocol pin numbers: the numbering the
//! host sees in pad codes and probe reports. How they land on physical
//! GPIOs is the [`PinBank`] implementation's concern.

use dspad_proto::STATUS_LED_PIN;

/// Digital level on a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Electrical configuration of a button line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Driven output (Normal mode). Button lines are active-low, idle High.
    Output,
    /// Pull-up input (Probe mode).
    InputPullUp,
}

/// Inclusive pin ranges wired to the pad's button lines.
///
/// The status LED (17) and the mode indicator (30) live outside these
/// ranges and are never part of the plan.
pub const BUTTON_PIN_RANGES: [(u8, u8); 3] = [(2, 10), (14, 16), (18, 20)];

/// Number of snapshot slots, one per physical pin index 0..=21.
pub const SNAPSHOT_SLOTS: usize = 22;

/// The button line pins, in ascending order.
pub fn button_pins() -> impl Iterator<Item = u8> {
    BUTTON_PIN_RANGES.iter().flat_map(|&(lo, hi)| lo..=hi)
}

/// The pins sampled in Probe mode: 2..=21, skipping the status LED.
pub fn scan_pins() -> impl Iterator<Item = u8> {
    (2..SNAPSHOT_SLOTS as u8).filter(|&pin| pin != STATUS_LED_PIN)
}

/// Synchronous GPIO boundary.
///
/// Implementations must tolerate writes to pins that are not currently
/// outputs, by latching the level for when the pin next becomes one, and
/// must answer reads on any mapped pin.
pub trait PinBank {
    /// Reconfigure a pin as a driven output or a pull-up input.
    fn set_mode(&mut self, pin: u8, mode: PinMode);

    /// Drive (or latch) a pin's output level.
    fn write(&mut self, pin: u8, level: Level);

    /// Sample a pin's current level.
    fn read(&mut self, pin: u8) -> Level;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_button_pins_cover_the_three_ranges() {
        let pins: std::vec::Vec<u8> = button_pins().collect();
        assert_eq!(
            pins,
            [2, 3, 4, 5, 6, 7, 8, 9, 10, 14, 15, 16, 18, 19, 20]
        );
    }

    #[test]
    fn test_scan_pins_skip_the_status_led() {
        assert!(scan_pins().all(|pin| pin != STATUS_LED_PIN));
        assert_eq!(scan_pins().count(), 19);
        assert_eq!(scan_pins().next(), Some(2));
        assert_eq!(scan_pins().last(), Some(21));
    }
}
