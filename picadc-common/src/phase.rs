/// The phases a single conversion passes through
///
/// Phase transitions are driven by hardware flags which the driver polls: SAMP for the end of
/// sampling, DONE for the end of conversion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionPhase {
    /// No conversion in progress
    #[default]
    Idle,
    /// The sample capacitor is connected to the selected input
    Sampling,
    /// The sampled voltage is being quantized
    Converting,
    /// DONE has been observed and the result buffer holds the conversion
    ResultReady,
}

impl core::fmt::Display for ConversionPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConversionPhase::Idle => write!(f, "Idle"),
            ConversionPhase::Sampling => write!(f, "Sampling"),
            ConversionPhase::Converting => write!(f, "Converting"),
            ConversionPhase::ResultReady => write!(f, "ResultReady"),
        }
    }
}
