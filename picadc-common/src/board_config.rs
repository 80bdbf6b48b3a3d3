//! Board configuration file
//!
//! A board config is a TOML file which selects the board variant, and optionally overrides the
//! read options the board uses by default.
//!
//! # Example
//!
//! ```toml
//! board = "explorer16_32"
//! # Optional. Override whether the board masks a timer interrupt around each conversion, and
//! # which IEC0 bit it masks.
//! timer_guard = true
//! timer_irq_bit = 9
//!
//! # Optional. Defaults to 10 ticks.
//! [sampling]
//! sample_ticks = 10
//! # Alternatively, give a time and the tick counter frequency
//! # sample_ns = 250
//! # core_timer_hz = 40_000_000
//!
//! # Optional. Without a limit every busy-wait is unbounded. Zero is rejected.
//! [polling]
//! limit = 100000
//!
//! # Channels for the application to read
//! [[channels]]
//! name = "pot"
//! channel = 2
//! ```
//!
//! Note that top-level keys (`timer_guard`, `timer_irq_bit`) must come before the first table in
//! the file.
use std::path::Path;

use defmt_or_log::debug;
use serde::Deserialize;
use snafu::{OptionExt, ResultExt, Snafu};

use crate::{
    board::Board,
    channel::{AnalogChannel, InvalidChannelError},
    options::{sample_ticks_for, PollLimit, ReadOptions, TimerIrqGuard},
};

/// Error returned when loading a board config
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// The config file could not be read
    #[snafu(display("IO error reading board config: {source}"))]
    Io {
        /// The underlying IO error
        source: std::io::Error,
    },
    /// The config file is not valid TOML, or does not match the schema
    #[snafu(display("Error parsing board config: {source}"))]
    Parse {
        /// The underlying TOML error
        source: toml::de::Error,
    },
    /// A channel entry has a channel number outside the multiplexer range
    #[snafu(display("Channel '{name}' is invalid: {source}"))]
    InvalidChannel {
        /// Name of the channel entry
        name: String,
        /// The underlying channel error
        source: InvalidChannelError,
    },
    /// The sampling section does not describe a usable sample time
    #[snafu(display("Invalid sampling config: {message}"))]
    InvalidSampleTime {
        /// Description of the problem
        message: String,
    },
    /// The poll limit is zero. Omit the limit for unbounded polling.
    #[snafu(display("Poll limit must be at least 1, omit it for unbounded polling"))]
    InvalidPollLimit,
    /// The timer interrupt bit is outside of IEC0
    #[snafu(display("Timer IRQ bit {bit} is out of range for IEC0"))]
    InvalidTimerIrqBit {
        /// The configured bit
        bit: u8,
    },
}

/// Sampling window configuration
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Sample window in ticks
    pub sample_ticks: Option<u32>,
    /// Sample window in nanoseconds. Requires `core_timer_hz`.
    pub sample_ns: Option<u32>,
    /// Tick counter frequency used to convert `sample_ns`
    pub core_timer_hz: Option<u32>,
}

/// Busy-wait bound configuration
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PollingConfig {
    /// The maximum polls per busy-wait
    pub limit: Option<u32>,
}

/// A named channel for the application to read
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// A label used when reporting readings
    pub name: String,
    /// The multiplexer input number
    pub channel: u8,
}

/// The raw configuration as read from a TOML file
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// The board variant
    pub board: Board,
    /// Override for the board's timer guard default
    pub timer_guard: Option<bool>,
    /// The IEC0 bit masked by the timer guard. Defaults to T2IE.
    pub timer_irq_bit: Option<u8>,
    /// Sampling window configuration
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Busy-wait configuration
    #[serde(default)]
    pub polling: PollingConfig,
    /// Channels for the application to read
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

impl BoardConfig {
    /// Read a board config from a file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(config_path).context(IoSnafu)?;
        Self::load_from_str(&config_str)
    }

    /// Read a board config from a string
    pub fn load_from_str(config_str: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = toml::from_str(config_str).context(ParseSnafu)?;
        // Validate everything up front, so later accessors cannot fail on a loaded config
        config.read_options()?;
        config.analog_channels()?;
        debug!(
            "Loaded board config for {} with {} channels",
            config.board,
            config.channels.len()
        );
        Ok(config)
    }

    /// The read options described by the config, starting from the board defaults
    pub fn read_options(&self) -> Result<ReadOptions, ConfigError> {
        let defaults = self.board.default_options();

        let sample_ticks = match (
            self.sampling.sample_ticks,
            self.sampling.sample_ns,
            self.sampling.core_timer_hz,
        ) {
            (Some(_), Some(_), _) => {
                return InvalidSampleTimeSnafu {
                    message: "sample_ticks and sample_ns are mutually exclusive",
                }
                .fail()
            }
            (Some(ticks), None, _) => ticks,
            (None, Some(ns), Some(hz)) => {
                sample_ticks_for(ns, hz).ok_or_else(|| {
                    InvalidSampleTimeSnafu {
                        message: format!("{ns} ns at {hz} Hz is not representable in ticks"),
                    }
                    .build()
                })?
            }
            (None, Some(_), None) => {
                return InvalidSampleTimeSnafu {
                    message: "sample_ns requires core_timer_hz",
                }
                .fail()
            }
            (None, None, _) => defaults.sample_ticks,
        };

        let bit = self
            .timer_irq_bit
            .or(defaults.timer_guard.map(|g| g.bit()))
            .unwrap_or(TimerIrqGuard::TIMER2.bit());
        let guard = TimerIrqGuard::new(bit).context(InvalidTimerIrqBitSnafu { bit })?;
        let guarded = self.timer_guard.unwrap_or(defaults.timer_guard.is_some());
        let timer_guard = guarded.then_some(guard);

        let poll_limit = match self.polling.limit {
            Some(0) => return InvalidPollLimitSnafu.fail(),
            Some(limit) => PollLimit::polls(limit),
            None => defaults.poll_limit,
        };

        Ok(ReadOptions {
            poll_limit,
            sample_ticks,
            timer_guard,
        })
    }

    /// The configured channels, paired with their names
    pub fn analog_channels(&self) -> Result<Vec<(&str, AnalogChannel)>, ConfigError> {
        self.channels
            .iter()
            .map(|c| {
                AnalogChannel::new(c.channel)
                    .map(|ch| (c.name.as_str(), ch))
                    .context(InvalidChannelSnafu {
                        name: c.name.clone(),
                    })
            })
            .collect()
    }
}
