//! The board independent converter interface

use picadc_common::{AnalogChannel, Board, ConversionPhase};
use snafu::Snafu;

/// Error returned by [`Converter::read_channel`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AdcError {
    /// A read was attempted before [`Converter::initialize`] was called
    #[snafu(display("ADC read attempted before initialization"))]
    NotInitialized,
    /// A busy-wait used up its [`PollLimit`](picadc_common::PollLimit)
    ///
    /// Only possible when a bounded poll limit is configured. The peripheral is left as it was
    /// found, and the next read starts over from channel selection.
    #[snafu(display("ADC timed out in {phase} phase after {polls} polls"))]
    Timeout {
        /// The phase which failed to complete
        phase: ConversionPhase,
        /// The number of polls made before giving up
        polls: u32,
    },
}

/// A single ADC peripheral, configured for one board
///
/// Each supported board has its own implementation, see [`boards`](crate::boards). Use
/// [`BoardConverter`](crate::BoardConverter) to choose one at run time.
pub trait Converter {
    /// The board this converter is configured for
    fn board(&self) -> Board;

    /// Configure the analog pins, voltage reference, conversion clock and trigger source, then
    /// turn the ADC on
    ///
    /// Writes the same configuration every time, so calling it again reproduces the same register
    /// state.
    fn initialize(&mut self);

    /// Sample and convert one channel, blocking until the result is available
    ///
    /// `channel` must be one of the inputs initialize configured as analog.
    fn read_channel(&mut self, channel: AnalogChannel) -> Result<u16, AdcError>;

    /// The phase of the most recent conversion
    ///
    /// `Idle` after a successful read. After a timeout, the phase which stalled.
    fn phase(&self) -> ConversionPhase;

    /// Has initialize been called
    fn is_initialized(&self) -> bool;
}

impl<C: Converter + ?Sized> Converter for &mut C {
    fn board(&self) -> Board {
        (**self).board()
    }

    fn initialize(&mut self) {
        (**self).initialize()
    }

    fn read_channel(&mut self, channel: AnalogChannel) -> Result<u16, AdcError> {
        (**self).read_channel(channel)
    }

    fn phase(&self) -> ConversionPhase {
        (**self).phase()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }
}
