//! A simulated PIC32 ADC for running the driver on a host
//!
//! [`SimAdc`] holds the peripheral state. It hands out a [`SimRegisters`] register file and a
//! [`SimTicks`] tick counter for the driver to own, while the test (or demo) keeps the `SimAdc` to
//! set analog inputs, inject faults, and inspect what the driver did.
//!
//! The model covers the parts of the ADC the driver uses:
//!
//! - Setting SAMP while ON is set starts sampling and clears DONE.
//! - In manual mode (SSRC = 0), clearing SAMP starts a conversion.
//! - In auto-convert mode (SSRC = 7), the "internal counter" clears SAMP and starts the conversion
//!   after a configurable number of AD1CON1 reads.
//! - A conversion sets DONE after a configurable number of AD1CON1 reads, latching the input of
//!   the channel selected by CH0SA into ADC1BUF0, masked to 10 bits.
//! - Clearing ON abandons any conversion in progress.
//!
//! Simulated time only moves when the tick counter is read. Every register access is recorded
//! with the tick count at which it happened.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use picadc_common::{
    channel::CHANNEL_COUNT,
    registers::{ad1chs, ad1con1, RESULT_MASK},
    traits::{RegisterFile, TickCounter},
    AnalogChannel, ConversionPhase, Register,
};

/// Default number of AD1CON1 reads before the internal counter ends sampling
pub const DEFAULT_AUTO_SAMPLE_READS: u32 = 2;
/// Default number of AD1CON1 reads before a conversion completes
pub const DEFAULT_CONVERSION_READS: u32 = 3;

/// The direction of a recorded register access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// The driver read the register
    Read,
    /// The driver wrote the register
    Write,
}

/// A recorded register access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimEvent {
    /// The simulated tick count when the access happened
    pub tick: u32,
    /// Read or write
    pub access: Access,
    /// The register accessed
    pub register: Register,
    /// The value read or written
    pub value: u32,
}

impl SimEvent {
    /// Return true if this is a write to `reg`
    pub fn is_write_to(&self, reg: Register) -> bool {
        self.access == Access::Write && self.register == reg
    }
}

/// Hardware faults which can be injected into the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimFault {
    /// The internal counter never ends sampling
    StuckSampling,
    /// DONE is never set
    StuckConverting,
    /// The tick counter stops advancing
    FrozenTicks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Activity {
    Idle,
    Sampling { remaining: u32 },
    Converting { remaining: u32 },
}

#[derive(Debug)]
struct SimState {
    regs: [u32; Register::COUNT],
    inputs: [u16; CHANNEL_COUNT as usize],
    activity: Activity,
    auto_sample_reads: u32,
    conversion_reads: u32,
    tick: u32,
    tick_step: u32,
    fault: Option<SimFault>,
    events: Vec<SimEvent>,
    recording: bool,
    conversions: u32,
}

impl SimState {
    fn new() -> Self {
        Self {
            regs: Register::ALL.map(Register::reset_value),
            inputs: [0; CHANNEL_COUNT as usize],
            activity: Activity::Idle,
            auto_sample_reads: DEFAULT_AUTO_SAMPLE_READS,
            conversion_reads: DEFAULT_CONVERSION_READS,
            tick: 0,
            tick_step: 1,
            fault: None,
            events: Vec::new(),
            recording: true,
            conversions: 0,
        }
    }

    fn reg(&self, reg: Register) -> u32 {
        self.regs[reg.index()]
    }

    fn reg_mut(&mut self, reg: Register) -> &mut u32 {
        &mut self.regs[reg.index()]
    }

    fn record(&mut self, access: Access, register: Register, value: u32) {
        if !self.recording {
            return;
        }
        self.events.push(SimEvent {
            tick: self.tick,
            access,
            register,
            value,
        });
    }

    fn auto_convert(&self) -> bool {
        ad1con1::SSRC.get(self.reg(Register::Ad1Con1)) == ad1con1::SSRC_AUTO
    }

    fn start_conversion(&mut self) {
        *self.reg_mut(Register::Ad1Con1) &= !ad1con1::DONE.mask();
        self.activity = Activity::Converting {
            remaining: self.conversion_reads,
        };
    }

    fn finish_conversion(&mut self) {
        let channel = ad1chs::CH0SA.get(self.reg(Register::Ad1Chs)) as usize;
        let result = self.inputs[channel] as u32 & RESULT_MASK;
        *self.reg_mut(Register::Adc1Buf0) = result;
        *self.reg_mut(Register::Ad1Con1) |= ad1con1::DONE.mask();
        self.activity = Activity::Idle;
        self.conversions += 1;
    }

    /// Advance the peripheral by one AD1CON1 read
    fn step(&mut self) {
        match self.activity {
            Activity::Sampling { remaining }
                if self.auto_convert() && self.fault != Some(SimFault::StuckSampling) =>
            {
                if remaining == 0 {
                    *self.reg_mut(Register::Ad1Con1) &= !ad1con1::SAMP.mask();
                    self.start_conversion();
                } else {
                    self.activity = Activity::Sampling {
                        remaining: remaining - 1,
                    };
                }
            }
            Activity::Converting { remaining } if self.fault != Some(SimFault::StuckConverting) => {
                if remaining == 0 {
                    self.finish_conversion();
                } else {
                    self.activity = Activity::Converting {
                        remaining: remaining - 1,
                    };
                }
            }
            _ => (),
        }
    }

    fn read(&mut self, reg: Register) -> u32 {
        if reg == Register::Ad1Con1 {
            self.step();
        }
        let value = self.reg(reg);
        self.record(Access::Read, reg, value);
        value
    }

    fn write(&mut self, reg: Register, value: u32) {
        self.record(Access::Write, reg, value);
        match reg {
            // Result buffers are read-only
            Register::Adc1Buf0 => (),
            Register::Ad1Con1 => self.write_ad1con1(value),
            _ => *self.reg_mut(reg) = value,
        }
    }

    fn write_ad1con1(&mut self, value: u32) {
        let old = self.reg(Register::Ad1Con1);
        *self.reg_mut(Register::Ad1Con1) = value;

        if !ad1con1::ON.is_set(value) {
            self.activity = Activity::Idle;
            return;
        }

        let samp_was = ad1con1::SAMP.is_set(old);
        let samp_now = ad1con1::SAMP.is_set(value);
        if !samp_was && samp_now {
            *self.reg_mut(Register::Ad1Con1) &= !ad1con1::DONE.mask();
            self.activity = Activity::Sampling {
                remaining: self.auto_sample_reads,
            };
        } else if samp_was
            && !samp_now
            && !self.auto_convert()
            && matches!(self.activity, Activity::Sampling { .. })
        {
            self.start_conversion();
        }
    }

    fn now(&mut self) -> u32 {
        let tick = self.tick;
        if self.fault != Some(SimFault::FrozenTicks) {
            self.tick = self.tick.wrapping_add(self.tick_step);
        }
        tick
    }
}

/// A simulated ADC peripheral
///
/// Cloning gives another handle to the same peripheral.
#[derive(Clone, Debug)]
pub struct SimAdc {
    state: Arc<Mutex<SimState>>,
}

impl Default for SimAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl SimAdc {
    /// Create a peripheral with all registers at their reset values
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState::new())),
        }
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a register file handle for the driver
    pub fn registers(&self) -> SimRegisters {
        SimRegisters { adc: self.clone() }
    }

    /// Get a tick counter handle for the driver
    pub fn ticks(&self) -> SimTicks {
        SimTicks { adc: self.clone() }
    }

    /// Set the value an input will convert to
    pub fn set_input(&self, channel: AnalogChannel, value: u16) {
        self.state().inputs[channel.raw() as usize] = value;
    }

    /// Set how many AD1CON1 reads the internal sample counter and the conversion take
    pub fn set_timing(&self, auto_sample_reads: u32, conversion_reads: u32) {
        let mut state = self.state();
        state.auto_sample_reads = auto_sample_reads;
        state.conversion_reads = conversion_reads;
    }

    /// Set the current tick count
    pub fn set_tick(&self, tick: u32) {
        self.state().tick = tick;
    }

    /// Set how far the tick counter advances on each read
    pub fn set_tick_step(&self, step: u32) {
        self.state().tick_step = step;
    }

    /// The current tick count
    pub fn tick(&self) -> u32 {
        self.state().tick
    }

    /// Inject a fault, or clear it with None
    pub fn set_fault(&self, fault: Option<SimFault>) {
        self.state().fault = fault;
    }

    /// Read a register without side effects or recording
    pub fn peek(&self, reg: Register) -> u32 {
        self.state().reg(reg)
    }

    /// Write a register without side effects or recording
    pub fn poke(&self, reg: Register, value: u32) {
        *self.state().reg_mut(reg) = value;
    }

    /// All register values
    pub fn snapshot(&self) -> [u32; Register::COUNT] {
        self.state().regs
    }

    /// The recorded register accesses, oldest first
    pub fn events(&self) -> Vec<SimEvent> {
        self.state().events.clone()
    }

    /// Turn the access log on or off
    ///
    /// Recording is on for a new peripheral. Long running users which never inspect the log
    /// should turn it off, since it otherwise grows with every access.
    pub fn set_recording(&self, recording: bool) {
        self.state().recording = recording;
    }

    /// Discard the recorded register accesses
    pub fn clear_events(&self) {
        self.state().events.clear();
    }

    /// The number of conversions completed
    pub fn conversions(&self) -> u32 {
        self.state().conversions
    }

    /// The phase the peripheral is in
    pub fn phase(&self) -> ConversionPhase {
        let state = self.state();
        match state.activity {
            Activity::Sampling { .. } => ConversionPhase::Sampling,
            Activity::Converting { .. } => ConversionPhase::Converting,
            Activity::Idle if ad1con1::DONE.is_set(state.reg(Register::Ad1Con1)) => {
                ConversionPhase::ResultReady
            }
            Activity::Idle => ConversionPhase::Idle,
        }
    }
}

/// The register file handle of a [`SimAdc`]
#[derive(Clone, Debug)]
pub struct SimRegisters {
    adc: SimAdc,
}

impl RegisterFile for SimRegisters {
    fn read(&mut self, reg: Register) -> u32 {
        self.adc.state().read(reg)
    }

    fn write(&mut self, reg: Register, value: u32) {
        self.adc.state().write(reg, value)
    }
}

/// The tick counter handle of a [`SimAdc`]
#[derive(Clone, Debug)]
pub struct SimTicks {
    adc: SimAdc,
}

impl TickCounter for SimTicks {
    fn now(&mut self) -> u32 {
        self.adc.state().now()
    }
}
