use picadc_common::{traits::RegisterFile, AnalogChannel, Board, ConversionPhase, ReadOptions};

use crate::{converter::AdcError, sequencer::Sequencer, Converter};

/// Converter for the Digilent Basys MX3
///
/// Uses auto-convert sampling, and masks the Timer 2 interrupt around each read by default so the
/// scheduler tick cannot stall the sampling window. The analog pins are left in their reset
/// (analog) state.
#[derive(Debug)]
pub struct Mx3<R> {
    seq: Sequencer<R>,
}

impl<R: RegisterFile> Mx3<R> {
    /// Create a converter using the board's default options
    pub fn new(regs: R) -> Self {
        Self::with_options(regs, Board::Mx3.default_options())
    }

    /// Create a converter with explicit options
    pub fn with_options(regs: R, options: ReadOptions) -> Self {
        Self {
            seq: Sequencer::new(Board::Mx3, regs, options),
        }
    }

    /// The options in use
    pub fn options(&self) -> &ReadOptions {
        &self.seq.options
    }

    /// Give back the register file
    pub fn release(self) -> R {
        self.seq.regs
    }
}

impl<R: RegisterFile> Converter for Mx3<R> {
    fn board(&self) -> Board {
        self.seq.board()
    }

    fn initialize(&mut self) {
        self.seq.begin_initialize();
        self.seq.init_auto_convert();
        self.seq.finish_initialize();
    }

    fn read_channel(&mut self, channel: AnalogChannel) -> Result<u16, AdcError> {
        self.seq.read_auto_convert(channel)
    }

    fn phase(&self) -> ConversionPhase {
        self.seq.phase()
    }

    fn is_initialized(&self) -> bool {
        self.seq.is_initialized()
    }
}
