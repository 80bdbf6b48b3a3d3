//! Types for representing analog input channels
//!

/// The number of inputs reachable through the CH0SA multiplexer field
pub const CHANNEL_COUNT: u8 = 16;

/// A newtype on u8 to enforce a valid analog multiplexer input (0-15)
///
/// A valid `AnalogChannel` only guarantees that the value fits the multiplexer selector. The pin
/// behind it must also have been configured as an analog input when the converter was initialized.
/// This is not checked; a conversion of a digital pin returns a meaningless value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogChannel(u8);

impl AnalogChannel {
    /// AN1, pin 24 on the Explorer16/32 PIM
    pub const AN1: AnalogChannel = AnalogChannel(1);
    /// AN2, wired to the potentiometer on the Explorer16/32
    pub const AN2: AnalogChannel = AnalogChannel(2);
    /// AN4, pin 21 on the Explorer16/32 PIM, and RB2 on the Microstick II
    pub const AN4: AnalogChannel = AnalogChannel(4);
    /// The potentiometer input on the Explorer16/32
    pub const POTENTIOMETER: AnalogChannel = Self::AN2;

    /// Try to create a new AnalogChannel
    ///
    /// It will fail if value is greater than 15
    pub const fn new(value: u8) -> Result<Self, InvalidChannelError> {
        if value < CHANNEL_COUNT {
            Ok(AnalogChannel(value))
        } else {
            Err(InvalidChannelError { value })
        }
    }

    /// Get the raw channel number as a u8
    pub const fn raw(&self) -> u8 {
        self.0
    }

    /// Bit mask for this channel in per-pin registers such as AD1PCFG or ANSELB
    pub const fn pin_mask(&self) -> u32 {
        1 << self.0
    }
}

impl core::fmt::Display for AnalogChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "AN{}", self.0)
    }
}

impl TryFrom<u8> for AnalogChannel {
    type Error = InvalidChannelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnalogChannel> for u8 {
    fn from(value: AnalogChannel) -> Self {
        value.raw()
    }
}

/// Error for converting u8 to an AnalogChannel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidChannelError {
    /// The rejected channel number
    pub value: u8,
}

impl core::fmt::Display for InvalidChannelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Invalid analog channel {}, must be less than 16", self.value)
    }
}
impl core::error::Error for InvalidChannelError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_channel_range() {
        assert_eq!(15, AnalogChannel::new(15).unwrap().raw());
        assert_eq!(Err(InvalidChannelError { value: 16 }), AnalogChannel::new(16));
        assert!(AnalogChannel::try_from(255).is_err());
    }

    #[test]
    fn test_channel_display() {
        assert_eq!("AN2", format!("{}", AnalogChannel::POTENTIOMETER));
        assert_eq!(1 << 4, AnalogChannel::AN4.pin_mask());
    }
}
