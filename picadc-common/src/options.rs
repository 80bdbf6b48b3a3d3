//! Run-time options controlling how a conversion is sequenced
//!

use core::num::NonZeroU32;

/// Core timer ticks held in the sampling phase by default
///
/// With an 80 MHz system clock the core timer counts at 40 MHz, so 10 ticks is 250 ns.
pub const DEFAULT_SAMPLE_TICKS: u32 = 10;

/// The IEC0 bit of the Timer 2 interrupt enable (T2IE) on PIC32MX1xx/2xx/3xx parts
pub const T2IE_BIT: u8 = 9;

/// Bound applied to every busy-wait in a conversion
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollLimit {
    /// Wait forever, as the hardware guarantees completion
    #[default]
    Unbounded,
    /// Give up after this many reads of the polled flag or tick counter
    Polls(NonZeroU32),
}

impl PollLimit {
    /// Create a bounded limit, or `Unbounded` if `polls` is zero
    pub const fn polls(polls: u32) -> Self {
        match NonZeroU32::new(polls) {
            Some(n) => PollLimit::Polls(n),
            None => PollLimit::Unbounded,
        }
    }

    /// Return true if `count` polls have used up the limit
    pub fn is_exhausted(&self, count: u32) -> bool {
        match self {
            PollLimit::Unbounded => false,
            PollLimit::Polls(max) => count >= max.get(),
        }
    }
}

/// A periodic timer interrupt which is masked for the duration of a conversion
///
/// Masking the scheduler tick keeps its handler from stretching the sampling window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerIrqGuard {
    bit: u8,
}

impl TimerIrqGuard {
    /// Guard the Timer 2 interrupt
    pub const TIMER2: TimerIrqGuard = TimerIrqGuard { bit: T2IE_BIT };

    /// Guard the interrupt enabled by `bit` of IEC0
    ///
    /// Returns None if `bit` is not a bit of the 32-bit register.
    pub const fn new(bit: u8) -> Option<Self> {
        if bit < 32 {
            Some(Self { bit })
        } else {
            None
        }
    }

    /// The interrupt enable bit in IEC0
    pub const fn bit(&self) -> u8 {
        self.bit
    }

    /// The IEC0 mask of the guarded interrupt
    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }
}

/// Options controlling how a converter sequences each conversion
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadOptions {
    /// Bound on busy-waits
    pub poll_limit: PollLimit,
    /// Number of tick counter ticks to hold SAMP in manual sampling mode
    pub sample_ticks: u32,
    /// Periodic interrupt to mask around each conversion, if any
    pub timer_guard: Option<TimerIrqGuard>,
}

impl ReadOptions {
    /// Options with an unbounded poll, the default sample time and no timer guard
    pub const fn new() -> Self {
        Self {
            poll_limit: PollLimit::Unbounded,
            sample_ticks: DEFAULT_SAMPLE_TICKS,
            timer_guard: None,
        }
    }

    /// Set the poll limit
    pub const fn with_poll_limit(mut self, poll_limit: PollLimit) -> Self {
        self.poll_limit = poll_limit;
        self
    }

    /// Set the sample time in ticks
    pub const fn with_sample_ticks(mut self, sample_ticks: u32) -> Self {
        self.sample_ticks = sample_ticks;
        self
    }

    /// Set or clear the timer guard
    pub const fn with_timer_guard(mut self, timer_guard: Option<TimerIrqGuard>) -> Self {
        self.timer_guard = timer_guard;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a sampling time in nanoseconds to tick counter ticks, rounding up
///
/// Returns None if `tick_hz` is zero or the result does not fit in a u32
pub const fn sample_ticks_for(nanos: u32, tick_hz: u32) -> Option<u32> {
    if tick_hz == 0 {
        return None;
    }
    let ticks = (nanos as u64 * tick_hz as u64).div_ceil(1_000_000_000);
    if ticks > u32::MAX as u64 {
        None
    } else {
        Some(ticks as u32)
    }
}
