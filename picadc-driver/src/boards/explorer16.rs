use picadc_common::{
    registers::{ad1con1, ad1con2, ad1con3},
    traits::{RegisterFile, TickCounter},
    AnalogChannel, Board, ConversionPhase, ReadOptions, Register,
};

use crate::{converter::AdcError, sequencer::Sequencer, Converter};

/// Conversion clock divisor for the Explorer16/32
///
/// Tad = 2 * (ADCS + 1) * Tpb = 2 * 3 * 12.5ns = 75ns with an 80 MHz peripheral bus
pub const EXPLORER_ADCS: u32 = 2;

/// Converter for the Explorer16/32 with a PIC32MX PIM
///
/// Sampling is manual: SAMP is held for [`ReadOptions::sample_ticks`] ticks of the provided tick
/// counter, then cleared to start the conversion.
///
/// The PIM socket pins do not map 1:1 to PIC pins. The potentiometer on PIM pin 20 is wired to
/// device pin 23, which is AN2. AN1 (pin 24) and AN4 (pin 21) are also set up as analog inputs.
#[derive(Debug)]
pub struct Explorer16<R, T> {
    seq: Sequencer<R>,
    ticks: T,
}

impl<R: RegisterFile, T: TickCounter> Explorer16<R, T> {
    /// Create a converter using the board's default options
    pub fn new(regs: R, ticks: T) -> Self {
        Self::with_options(regs, ticks, Board::Explorer16_32.default_options())
    }

    /// Create a converter with explicit options
    pub fn with_options(regs: R, ticks: T, options: ReadOptions) -> Self {
        Self {
            seq: Sequencer::new(Board::Explorer16_32, regs, options),
            ticks,
        }
    }

    /// The options in use
    pub fn options(&self) -> &ReadOptions {
        &self.seq.options
    }

    /// Give back the register file and tick counter
    pub fn release(self) -> (R, T) {
        (self.seq.regs, self.ticks)
    }
}

impl<R: RegisterFile, T: TickCounter> Converter for Explorer16<R, T> {
    fn board(&self) -> Board {
        self.seq.board()
    }

    fn initialize(&mut self) {
        self.seq.begin_initialize();
        let analog_mask = Board::Explorer16_32
            .analog_pins()
            .iter()
            .fold(0, |mask, pin| mask | pin.pin_mask());

        let regs = &mut self.seq.regs;
        // A cleared PCFG bit makes the pin analog
        regs.clear_bits(Register::Ad1Pcfg, analog_mask);
        regs.write_field(Register::Ad1Con2, ad1con2::VCFG, ad1con2::VCFG_AVDD_AVSS);
        regs.write_field(Register::Ad1Con1, ad1con1::SSRC, ad1con1::SSRC_MANUAL);
        regs.write_field(Register::Ad1Con1, ad1con1::FORM, ad1con1::FORM_INTEGER16);
        // Sampling starts only when SAMP is set
        regs.clear_bits(Register::Ad1Con1, ad1con1::ASAM.mask());
        // Conversion clock from PBCLK, so ADCS applies
        regs.clear_bits(Register::Ad1Con3, ad1con3::ADRC.mask());
        regs.write_field(Register::Ad1Con3, ad1con3::ADCS, EXPLORER_ADCS);
        regs.set_bits(Register::Ad1Con1, ad1con1::ON.mask());
        self.seq.finish_initialize();
    }

    fn read_channel(&mut self, channel: AnalogChannel) -> Result<u16, AdcError> {
        self.seq.ensure_initialized()?;
        let ticks = &mut self.ticks;
        self.seq.with_timer_masked(|seq| {
            seq.select_channel_field(channel);
            seq.start_sampling();
            seq.hold_sampling(ticks)?;
            seq.stop_sampling();
            seq.wait_conversion_done()?;
            Ok(seq.read_result())
        })
    }

    fn phase(&self) -> ConversionPhase {
        self.seq.phase()
    }

    fn is_initialized(&self) -> bool {
        self.seq.is_initialized()
    }
}
