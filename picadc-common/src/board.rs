//! Supported development boards and their fixed ADC wiring
//!

use core::str::FromStr;

use crate::{
    channel::AnalogChannel,
    options::{ReadOptions, TimerIrqGuard},
};

/// How the end of the sampling phase is triggered
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleMode {
    /// Software holds SAMP for a timed window, and clearing it starts the conversion
    Manual,
    /// The ADC internal counter ends sampling and starts conversion, clearing SAMP itself
    AutoConvert,
}

/// A supported board
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "String"))]
pub enum Board {
    /// Explorer16/32 with a PIC32MX PIM
    Explorer16_32,
    /// Digilent Basys MX3 (PIC32MX370)
    Mx3,
    /// Microstick II (PIC32MX250)
    MicrostickII,
}

const EXPLORER16_32_PINS: &[AnalogChannel] =
    &[AnalogChannel::AN1, AnalogChannel::AN4, AnalogChannel::AN2];
const MICROSTICK_II_PINS: &[AnalogChannel] = &[AnalogChannel::AN4];

impl Board {
    /// All supported boards
    pub const ALL: [Board; 3] = [Board::Explorer16_32, Board::Mx3, Board::MicrostickII];

    /// The configuration name of the board
    pub const fn name(&self) -> &'static str {
        match self {
            Board::Explorer16_32 => "explorer16_32",
            Board::Mx3 => "mx3",
            Board::MicrostickII => "microstick_ii",
        }
    }

    /// The channels which initialization switches to analog mode
    ///
    /// The MX3 relies on the reset state of its analog select registers, so no pins are listed.
    pub const fn analog_pins(&self) -> &'static [AnalogChannel] {
        match self {
            Board::Explorer16_32 => EXPLORER16_32_PINS,
            Board::Mx3 => &[],
            Board::MicrostickII => MICROSTICK_II_PINS,
        }
    }

    /// How sampling is ended on this board
    pub const fn sample_mode(&self) -> SampleMode {
        match self {
            Board::Explorer16_32 => SampleMode::Manual,
            Board::Mx3 | Board::MicrostickII => SampleMode::AutoConvert,
        }
    }

    /// The read options the board firmware has always used
    ///
    /// Only the MX3 masks the Timer 2 interrupt during a conversion.
    pub const fn default_options(&self) -> ReadOptions {
        match self {
            Board::Mx3 => ReadOptions::new().with_timer_guard(Some(TimerIrqGuard::TIMER2)),
            Board::Explorer16_32 | Board::MicrostickII => ReadOptions::new(),
        }
    }
}

impl core::fmt::Display for Board {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for parsing a board name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBoardError;

impl core::fmt::Display for InvalidBoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Unknown board name. Expected one of explorer16_32, mx3, microstick_ii"
        )
    }
}
impl core::error::Error for InvalidBoardError {}

impl FromStr for Board {
    type Err = InvalidBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let matches = |name: &str| {
            s.len() == name.len()
                && s.bytes().zip(name.bytes()).all(|(a, b)| {
                    let a = if a == b'-' { b'_' } else { a.to_ascii_lowercase() };
                    a == b
                })
        };
        Board::ALL
            .into_iter()
            .find(|b| matches(b.name()))
            .ok_or(InvalidBoardError)
    }
}

impl TryFrom<&str> for Board {
    type Error = InvalidBoardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(feature = "std")]
impl TryFrom<String> for Board {
    type Error = InvalidBoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_board_names() {
        assert_eq!(Ok(Board::Explorer16_32), "explorer16_32".parse());
        assert_eq!(Ok(Board::Explorer16_32), "Explorer16-32".parse());
        assert_eq!(Ok(Board::MicrostickII), "MICROSTICK_II".parse());
        assert_eq!(Ok(Board::Mx3), "mx3".parse());
        assert_eq!(Err(InvalidBoardError), "mx4".parse::<Board>());
        assert_eq!(Err(InvalidBoardError), "".parse::<Board>());
    }

    #[test]
    fn test_display_round_trips() {
        for board in Board::ALL {
            assert_eq!(Ok(board), board.to_string().parse());
        }
    }

    #[test]
    fn test_default_guards() {
        assert_eq!(
            Some(TimerIrqGuard::TIMER2),
            Board::Mx3.default_options().timer_guard
        );
        assert_eq!(None, Board::Explorer16_32.default_options().timer_guard);
        assert_eq!(None, Board::MicrostickII.default_options().timer_guard);
    }
}
