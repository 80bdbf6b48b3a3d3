//! A converter which can be shared between execution contexts
use core::cell::RefCell;

use critical_section::Mutex;
use picadc_common::AnalogChannel;
use snafu::{OptionExt, ResultExt, Snafu};

use crate::{converter::AdcError, Converter};

/// Error returned by [`SharedConverter`] methods
#[derive(Clone, Copy, Debug, PartialEq, Eq, Snafu)]
pub enum SharedError {
    /// No converter has been installed
    #[snafu(display("No converter installed"))]
    NotInstalled,
    /// The conversion itself failed
    #[snafu(display("{source}"))]
    Adc {
        /// The converter error
        source: AdcError,
    },
}

/// Holds a converter so that it can be stored in a static and used from several contexts
///
/// Each access runs inside a critical section, so a read started from the main loop cannot be
/// interleaved with a read from an interrupt handler. On a single core target the critical section
/// masks all interrupts, which also keeps the sampling window from being stretched.
///
/// ```ignore
/// static ADC: SharedConverter<Mx3<Pic32Mmio>> = SharedConverter::new();
///
/// ADC.install(Mx3::new(unsafe { Pic32Mmio::new() }));
/// ADC.initialize()?;
/// let value = ADC.read_channel(AnalogChannel::AN4)?;
/// ```
#[allow(missing_debug_implementations)]
pub struct SharedConverter<C> {
    inner: Mutex<RefCell<Option<C>>>,
}

impl<C> Default for SharedConverter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SharedConverter<C> {
    /// Create an empty SharedConverter
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store a converter, returning the previously installed one if any
    pub fn install(&self, converter: C) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(converter))
    }

    /// Remove the installed converter
    pub fn take(&self) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Return true if a converter is installed
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }
}

impl<C: Converter> SharedConverter<C> {
    /// Run `f` with exclusive access to the installed converter
    pub fn with<T>(&self, f: impl FnOnce(&mut C) -> T) -> Result<T, SharedError> {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            let converter = inner.as_mut().context(NotInstalledSnafu)?;
            Ok(f(converter))
        })
    }

    /// Initialize the installed converter
    pub fn initialize(&self) -> Result<(), SharedError> {
        self.with(|c| c.initialize())
    }

    /// Read a channel on the installed converter
    pub fn read_channel(&self, channel: AnalogChannel) -> Result<u16, SharedError> {
        self.with(|c| c.read_channel(channel))?
            .context(AdcSnafu)
    }
}
