//! Names and bit-field layouts of the PIC32 special function registers used by the ADC driver
//!
//! Field positions follow the PIC32MX family reference manual, section 17 (10-bit ADC).

/// A special function register touched by the driver
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// ADC control register 1: power, output format, trigger source, sample/done flags
    Ad1Con1 = 0,
    /// ADC control register 2: voltage reference and scan configuration
    Ad1Con2 = 1,
    /// ADC control register 3: conversion clock source and divisor, auto-sample time
    Ad1Con3 = 2,
    /// ADC input select register: multiplexer A/B positive and negative inputs
    Ad1Chs = 3,
    /// ADC input scan select register
    Ad1Cssl = 4,
    /// ADC port configuration register (PIC32MX3xx-7xx). A cleared bit makes the pin analog.
    Ad1Pcfg = 5,
    /// First ADC result buffer
    Adc1Buf0 = 6,
    /// Port B analog select register (PIC32MX1xx/2xx/3xx). A set bit makes the pin analog.
    AnselB = 7,
    /// Port B direction register. A set bit makes the pin an input.
    TrisB = 8,
    /// Interrupt enable control register 0
    Iec0 = 9,
}

impl Register {
    /// The number of registers in the enum
    pub const COUNT: usize = 10;

    /// All registers, in index order
    pub const ALL: [Register; Self::COUNT] = [
        Register::Ad1Con1,
        Register::Ad1Con2,
        Register::Ad1Con3,
        Register::Ad1Chs,
        Register::Ad1Cssl,
        Register::Ad1Pcfg,
        Register::Adc1Buf0,
        Register::AnselB,
        Register::TrisB,
        Register::Iec0,
    ];

    /// Index of the register, suitable for table-backed register files
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The datasheet name of the register
    pub const fn name(self) -> &'static str {
        match self {
            Register::Ad1Con1 => "AD1CON1",
            Register::Ad1Con2 => "AD1CON2",
            Register::Ad1Con3 => "AD1CON3",
            Register::Ad1Chs => "AD1CHS",
            Register::Ad1Cssl => "AD1CSSL",
            Register::Ad1Pcfg => "AD1PCFG",
            Register::Adc1Buf0 => "ADC1BUF0",
            Register::AnselB => "ANSELB",
            Register::TrisB => "TRISB",
            Register::Iec0 => "IEC0",
        }
    }

    /// Value of the register after a device reset
    ///
    /// Port analog select registers come out of reset with every pin analog; everything else the
    /// driver touches resets to zero.
    pub const fn reset_value(self) -> u32 {
        match self {
            Register::AnselB | Register::TrisB => 0xFFFF,
            _ => 0,
        }
    }
}

impl core::fmt::Display for Register {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A contiguous bit-field within a 32-bit register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    shift: u8,
    width: u8,
}

impl Field {
    /// Create a field of `width` bits starting at bit `shift`
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    /// Create a single bit field
    pub const fn bit(shift: u8) -> Self {
        Self::new(shift, 1)
    }

    /// The field mask, in register position
    pub const fn mask(&self) -> u32 {
        let unshifted = if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        };
        unshifted << self.shift
    }

    /// Extract the field value from a register value
    pub const fn get(&self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.shift
    }

    /// Return `reg` with the field replaced by `value`
    ///
    /// Bits of `value` wider than the field are discarded
    pub const fn set(&self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask()) | ((value << self.shift) & self.mask())
    }

    /// Test a single bit field
    pub const fn is_set(&self, reg: u32) -> bool {
        reg & self.mask() != 0
    }
}

/// AD1CON1 fields
pub mod ad1con1 {
    use super::Field;

    /// ADC operating mode bit
    pub const ON: Field = Field::bit(15);
    /// Data output format
    pub const FORM: Field = Field::new(8, 3);
    /// Conversion trigger source select
    pub const SSRC: Field = Field::new(5, 3);
    /// Sample auto-start
    pub const ASAM: Field = Field::bit(2);
    /// Sample enable
    pub const SAMP: Field = Field::bit(1);
    /// Conversion status
    pub const DONE: Field = Field::bit(0);

    /// Clearing SAMP ends sampling and starts conversion
    pub const SSRC_MANUAL: u32 = 0;
    /// The internal counter ends sampling and starts conversion
    pub const SSRC_AUTO: u32 = 7;
    /// Integer 16-bit output
    pub const FORM_INTEGER16: u32 = 0;
}

/// AD1CON2 fields
pub mod ad1con2 {
    use super::Field;

    /// Voltage reference configuration
    pub const VCFG: Field = Field::new(13, 3);

    /// VREFH = AVDD, VREFL = AVSS
    pub const VCFG_AVDD_AVSS: u32 = 0;
}

/// AD1CON3 fields
pub mod ad1con3 {
    use super::Field;

    /// Conversion clock source. Set selects the internal RC clock.
    pub const ADRC: Field = Field::bit(15);
    /// Auto-sample time, in Tad
    pub const SAMC: Field = Field::new(8, 5);
    /// Conversion clock select. Tad = 2 * (ADCS + 1) * Tpb
    pub const ADCS: Field = Field::new(0, 8);
}

/// AD1CHS fields
pub mod ad1chs {
    use super::Field;

    /// Positive input select for sample A (MUX A)
    pub const CH0SA: Field = Field::new(16, 4);
}

/// Result width of the 10-bit converter
pub const RESULT_MASK: u32 = 0x3FF;
