//! Run-time board selection
use picadc_common::{
    traits::{RegisterFile, TickCounter},
    AnalogChannel, Board, ConversionPhase, ReadOptions,
};

#[cfg(feature = "std")]
use picadc_common::board_config::{BoardConfig, ConfigError};

use crate::{
    boards::{Explorer16, MicrostickII, Mx3},
    converter::AdcError,
    Converter,
};

/// A converter for a board chosen at startup
///
/// Wraps one of the board implementations and forwards [`Converter`] calls to it. The tick
/// counter is only used by boards which time sampling in software; the others drop it.
#[derive(Debug)]
pub enum BoardConverter<R, T> {
    /// Explorer16/32
    Explorer16_32(Explorer16<R, T>),
    /// Basys MX3
    Mx3(Mx3<R>),
    /// Microstick II
    MicrostickII(MicrostickII<R>),
}

impl<R: RegisterFile, T: TickCounter> BoardConverter<R, T> {
    /// Create a converter for `board` with explicit options
    pub fn new(board: Board, regs: R, ticks: T, options: ReadOptions) -> Self {
        match board {
            Board::Explorer16_32 => {
                Self::Explorer16_32(Explorer16::with_options(regs, ticks, options))
            }
            Board::Mx3 => Self::Mx3(Mx3::with_options(regs, options)),
            Board::MicrostickII => Self::MicrostickII(MicrostickII::with_options(regs, options)),
        }
    }

    /// Create a converter for `board` with the board's default options
    pub fn with_defaults(board: Board, regs: R, ticks: T) -> Self {
        Self::new(board, regs, ticks, board.default_options())
    }

    /// Create a converter for the board and options described by a board config
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn from_config(config: &BoardConfig, regs: R, ticks: T) -> Result<Self, ConfigError> {
        let options = config.read_options()?;
        Ok(Self::new(config.board, regs, ticks, options))
    }

    /// The options in use
    pub fn options(&self) -> &ReadOptions {
        match self {
            Self::Explorer16_32(c) => c.options(),
            Self::Mx3(c) => c.options(),
            Self::MicrostickII(c) => c.options(),
        }
    }

    /// Give back the register file
    pub fn release(self) -> R {
        match self {
            Self::Explorer16_32(c) => c.release().0,
            Self::Mx3(c) => c.release(),
            Self::MicrostickII(c) => c.release(),
        }
    }

    fn as_converter(&self) -> &dyn Converter {
        match self {
            Self::Explorer16_32(c) => c,
            Self::Mx3(c) => c,
            Self::MicrostickII(c) => c,
        }
    }

    fn as_converter_mut(&mut self) -> &mut dyn Converter {
        match self {
            Self::Explorer16_32(c) => c,
            Self::Mx3(c) => c,
            Self::MicrostickII(c) => c,
        }
    }
}

impl<R: RegisterFile, T: TickCounter> Converter for BoardConverter<R, T> {
    fn board(&self) -> Board {
        self.as_converter().board()
    }

    fn initialize(&mut self) {
        self.as_converter_mut().initialize()
    }

    fn read_channel(&mut self, channel: AnalogChannel) -> Result<u16, AdcError> {
        self.as_converter_mut().read_channel(channel)
    }

    fn phase(&self) -> ConversionPhase {
        self.as_converter().phase()
    }

    fn is_initialized(&self) -> bool {
        self.as_converter().is_initialized()
    }
}
