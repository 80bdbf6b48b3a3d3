//! Common types shared by the picadc crates.
//!
//! Most users will have no reason to depend on this crate directly, as it is re-exported by
//! `picadc-driver`.
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs, missing_copy_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod board;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod board_config;
pub mod channel;
pub mod options;
mod phase;
pub mod registers;
pub mod traits;

pub use board::{Board, SampleMode};
pub use channel::AnalogChannel;
pub use options::{PollLimit, ReadOptions, TimerIrqGuard};
pub use phase::ConversionPhase;
pub use registers::Register;
