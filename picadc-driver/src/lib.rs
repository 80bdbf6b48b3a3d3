//! A blocking, single-channel ADC driver for PIC32MX development boards
//!
//! Picadc-driver configures the PIC32 10-bit ADC for single conversions of one multiplexer input
//! at a time, and performs blocking reads of a selected channel. It is no_std compatible and
//! performs no heap allocation. Three boards are supported, each wired and configured a little
//! differently:
//!
//! * *Explorer16/32* (PIC32MX PIM): manual sampling. The driver holds SAMP for a fixed number of
//!   core timer ticks, then clears it to start the conversion.
//! * *Basys MX3* (PIC32MX370): auto-convert. The ADC's internal counter ends sampling. The Timer 2
//!   interrupt is masked for the duration of each read.
//! * *Microstick II* (PIC32MX250): auto-convert, with RB2/AN4 switched to an analog input.
//!
//! # Getting Started
//!
//! ## Register access
//!
//! The driver never touches hardware addresses itself. Every board implementation is handed a
//! [`RegisterFile`](common::traits::RegisterFile). On target this is [`Pic32Mmio`], which maps
//! register names to the PIC32MX SFR space. On a host it can be the simulated peripheral from the
//! `sim` module (feature `sim`).
//!
//! The Explorer16/32 implementation also needs a [`TickCounter`](common::traits::TickCounter) to
//! time the sampling window. On target this should read the CP0 Count register, which the
//! application supplies, e.g. via a small assembly shim.
//!
//! ## Creating a converter
//!
//! A converter for a board known at build time can be created directly:
//!
//! ```ignore
//! let regs = unsafe { picadc_driver::Pic32Mmio::new() };
//! let mut adc = picadc_driver::Explorer16::new(regs, CoreTimer);
//! adc.initialize();
//! let pot = adc.read_channel(AnalogChannel::POTENTIOMETER)?;
//! ```
//!
//! When the board is chosen at startup, use [`BoardConverter`], which wraps whichever board
//! implementation matches a [`Board`](common::Board):
//!
//! ```ignore
//! let config = BoardConfig::load("board.toml")?;
//! let mut adc = BoardConverter::from_config(&config, regs, ticks)?;
//! ```
//!
//! ## Calling contract
//!
//! [`Converter::initialize`] must be called once before any read. Reads before initialization fail
//! with [`AdcError::NotInitialized`]. The channel passed to [`Converter::read_channel`] must be one
//! which initialization configured as analog; this is not checked, and a digital pin converts to a
//! meaningless value.
//!
//! Reads block for the full sample and conversion time. By default every busy-wait is unbounded,
//! as the hardware guarantees completion. A [`PollLimit`](common::PollLimit) can be set in the
//! [`ReadOptions`](common::ReadOptions) to fail with [`AdcError::Timeout`] instead of hanging on a
//! stuck peripheral.
//!
//! ## Sharing the converter
//!
//! The peripheral has a single channel selector and a single set of status flags, so two contexts
//! reading at once corrupt each other's conversions. [`SharedConverter`] stores a converter in a
//! `static` behind a critical section, so reads from a main loop and from interrupt handlers are
//! serialized.
//!
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod any;
pub mod boards;
mod converter;
mod mmio;
mod poll;
mod sequencer;
mod shared;
#[cfg(feature = "sim")]
#[cfg_attr(docsrs, doc(cfg(feature = "sim")))]
pub mod sim;

// Re-export types used in the public API
pub use critical_section;
pub use picadc_common as common;

pub use any::BoardConverter;
pub use boards::{Explorer16, MicrostickII, Mx3};
pub use converter::{AdcError, Converter};
pub use mmio::{sfr_address, Pic32Mmio, SfrAlias};
pub use shared::{SharedConverter, SharedError};
