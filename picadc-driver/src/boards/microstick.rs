use picadc_common::{
    traits::RegisterFile, AnalogChannel, Board, ConversionPhase, ReadOptions, Register,
};

use crate::{converter::AdcError, sequencer::Sequencer, Converter};

/// The port B bit of RB2, which carries AN4 on the PIC32MX250
pub const RB2_AN4: u32 = 1 << 2;

/// Converter for the Microstick II
///
/// Switches RB2 (AN4) to an analog input, then uses the same auto-convert setup as the MX3. No
/// timer interrupt is masked by default.
#[derive(Debug)]
pub struct MicrostickII<R> {
    seq: Sequencer<R>,
}

impl<R: RegisterFile> MicrostickII<R> {
    /// Create a converter using the board's default options
    pub fn new(regs: R) -> Self {
        Self::with_options(regs, Board::MicrostickII.default_options())
    }

    /// Create a converter with explicit options
    pub fn with_options(regs: R, options: ReadOptions) -> Self {
        Self {
            seq: Sequencer::new(Board::MicrostickII, regs, options),
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

impl<R: RegisterFile> Converter for MicrostickII<R> {
    fn board(&self) -> Board {
        self.seq.board()
    }

    fn initialize(&mut self) {
        self.seq.begin_initialize();
        // RB2 as an input, with the analog function enabled
        self.seq.regs.set_bits(Register::TrisB, RB2_AN4);
        self.seq.regs.set_bits(Register::AnselB, RB2_AN4);
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
