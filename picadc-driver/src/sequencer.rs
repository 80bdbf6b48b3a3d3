//! Register sequences shared by the board implementations
use defmt_or_log::{debug, trace};
use picadc_common::{
    registers::{ad1chs, ad1con1, ad1con2, RESULT_MASK},
    traits::{RegisterFile, TickCounter},
    AnalogChannel, Board, ConversionPhase, ReadOptions, Register,
};

use crate::{
    converter::{AdcError, NotInitializedSnafu},
    poll::poll_until,
};

/// AD1CON3 for the auto-convert boards: PBCLK conversion clock, Tad = 6 Tpb
pub const AUTO_CONVERT_AD1CON3: u32 = 0x0002;

/// State common to every board implementation
#[derive(Debug)]
pub(crate) struct Sequencer<R> {
    pub(crate) regs: R,
    pub(crate) options: ReadOptions,
    board: Board,
    phase: ConversionPhase,
    initialized: bool,
}

impl<R: RegisterFile> Sequencer<R> {
    pub(crate) fn new(board: Board, regs: R, options: ReadOptions) -> Self {
        Self {
            regs,
            options,
            board,
            phase: ConversionPhase::Idle,
            initialized: false,
        }
    }

    pub(crate) fn board(&self) -> Board {
        self.board
    }

    pub(crate) fn phase(&self) -> ConversionPhase {
        self.phase
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn set_phase(&mut self, phase: ConversionPhase) {
        trace!("ADC phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    pub(crate) fn begin_initialize(&mut self) {
        debug!("Initializing ADC for {} board", self.board);
        self.phase = ConversionPhase::Idle;
    }

    pub(crate) fn finish_initialize(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn ensure_initialized(&self) -> Result<(), AdcError> {
        if self.initialized {
            Ok(())
        } else {
            NotInitializedSnafu.fail()
        }
    }

    /// Run `f` with the configured timer interrupt masked
    ///
    /// The interrupt enable is restored to its prior state afterwards, whether `f` succeeds or
    /// not. With no guard configured, `f` is simply called.
    pub(crate) fn with_timer_masked<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let Some(guard) = self.options.timer_guard else {
            return f(self);
        };
        let was_enabled = self.regs.read(Register::Iec0) & guard.mask() != 0;
        self.regs.clear_bits(Register::Iec0, guard.mask());
        let result = f(self);
        if was_enabled {
            self.regs.set_bits(Register::Iec0, guard.mask());
        }
        result
    }

    /// Route a channel to MUX A by updating only the CH0SA field
    pub(crate) fn select_channel_field(&mut self, channel: AnalogChannel) {
        self.regs
            .write_field(Register::Ad1Chs, ad1chs::CH0SA, channel.raw() as u32);
    }

    /// Route a channel to MUX A by rewriting the whole selector register
    pub(crate) fn select_channel(&mut self, channel: AnalogChannel) {
        self.regs
            .write(Register::Ad1Chs, ad1chs::CH0SA.set(0, channel.raw() as u32));
    }

    pub(crate) fn start_sampling(&mut self) {
        self.regs.set_bits(Register::Ad1Con1, ad1con1::SAMP.mask());
        self.set_phase(ConversionPhase::Sampling);
    }

    /// Keep sampling until `sample_ticks` ticks have passed since the call
    pub(crate) fn hold_sampling(&mut self, ticks: &mut impl TickCounter) -> Result<(), AdcError> {
        let sample_ticks = self.options.sample_ticks;
        let start = ticks.now();
        poll_until(self.options.poll_limit, ConversionPhase::Sampling, || {
            ticks.elapsed_since(start) >= sample_ticks
        })
    }

    /// Clear SAMP, ending sampling and starting the conversion in manual mode
    pub(crate) fn stop_sampling(&mut self) {
        self.regs.clear_bits(Register::Ad1Con1, ad1con1::SAMP.mask());
        self.set_phase(ConversionPhase::Converting);
    }

    /// Wait for the ADC's internal counter to end sampling, in auto-convert mode
    pub(crate) fn wait_sampling_done(&mut self) -> Result<(), AdcError> {
        let regs = &mut self.regs;
        poll_until(self.options.poll_limit, ConversionPhase::Sampling, || {
            !ad1con1::SAMP.is_set(regs.read(Register::Ad1Con1))
        })?;
        self.set_phase(ConversionPhase::Converting);
        Ok(())
    }

    pub(crate) fn wait_conversion_done(&mut self) -> Result<(), AdcError> {
        let regs = &mut self.regs;
        poll_until(self.options.poll_limit, ConversionPhase::Converting, || {
            ad1con1::DONE.is_set(regs.read(Register::Ad1Con1))
        })?;
        self.set_phase(ConversionPhase::ResultReady);
        Ok(())
    }

    pub(crate) fn read_result(&mut self) -> u16 {
        let value = self.regs.read(Register::Adc1Buf0) & RESULT_MASK;
        self.set_phase(ConversionPhase::Idle);
        value as u16
    }

    /// Configure for auto-convert sampling with a PBCLK derived conversion clock, referenced to
    /// the supply rails, and turn the ADC on
    pub(crate) fn init_auto_convert(&mut self) {
        let regs = &mut self.regs;
        regs.write(Register::Ad1Con1, 0);
        regs.write_field(Register::Ad1Con1, ad1con1::SSRC, ad1con1::SSRC_AUTO);
        regs.write_field(Register::Ad1Con1, ad1con1::FORM, ad1con1::FORM_INTEGER16);
        // No input scanning
        regs.write(Register::Ad1Cssl, 0);
        regs.write(Register::Ad1Con3, AUTO_CONVERT_AD1CON3);
        regs.write(Register::Ad1Con2, 0);
        regs.write_field(Register::Ad1Con2, ad1con2::VCFG, ad1con2::VCFG_AVDD_AVSS);
        regs.set_bits(Register::Ad1Con1, ad1con1::ON.mask());
    }

    /// A single conversion where the ADC internal counter ends sampling
    pub(crate) fn read_auto_convert(&mut self, channel: AnalogChannel) -> Result<u16, AdcError> {
        self.ensure_initialized()?;
        self.with_timer_masked(|seq| {
            seq.select_channel(channel);
            seq.start_sampling();
            seq.wait_sampling_done()?;
            seq.wait_conversion_done()?;
            Ok(seq.read_result())
        })
    }
}
