//! Memory mapped access to the PIC32MX special function registers
use picadc_common::{traits::RegisterFile, Register};

/// The atomic alias registers every PIC32 SFR has alongside it
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SfrAlias {
    /// The register itself
    Base,
    /// Writing 1s clears the corresponding bits
    Clr,
    /// Writing 1s sets the corresponding bits
    Set,
    /// Writing 1s inverts the corresponding bits
    Inv,
}

impl SfrAlias {
    const fn offset(self) -> usize {
        match self {
            SfrAlias::Base => 0x0,
            SfrAlias::Clr => 0x4,
            SfrAlias::Set => 0x8,
            SfrAlias::Inv => 0xC,
        }
    }
}

/// The KSEG1 (uncached) address of a register, or one of its alias registers
///
/// The ADC block is at the same place on the PIC32MX1xx/2xx, 3xx and 5xx-7xx families. AD1PCFG only
/// exists on the PIC32MX3xx-7xx, and ANSELB only on the families with per-port analog select.
pub const fn sfr_address(reg: Register, alias: SfrAlias) -> usize {
    let base = match reg {
        Register::Ad1Con1 => 0xBF80_9000,
        Register::Ad1Con2 => 0xBF80_9010,
        Register::Ad1Con3 => 0xBF80_9020,
        Register::Ad1Chs => 0xBF80_9040,
        Register::Ad1Cssl => 0xBF80_9050,
        Register::Ad1Pcfg => 0xBF80_9060,
        Register::Adc1Buf0 => 0xBF80_9070,
        Register::Iec0 => 0xBF88_1060,
        Register::AnselB => 0xBF88_6100,
        Register::TrisB => 0xBF88_6110,
    };
    base + alias.offset()
}

/// Register file for the on-chip peripheral registers
///
/// Bit set and clear operations use the SET and CLR alias registers, so they are atomic with
/// respect to interrupt handlers touching other bits of the same register.
#[derive(Debug)]
pub struct Pic32Mmio {
    _private: (),
}

impl Pic32Mmio {
    /// Create a register file for the SFR space
    ///
    /// # Safety
    ///
    /// Must only be used on a PIC32MX, and only one instance should exist, since the driver
    /// assumes it is the only writer of the ADC registers.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }

    fn ptr(reg: Register, alias: SfrAlias) -> *mut u32 {
        sfr_address(reg, alias) as *mut u32
    }
}

impl RegisterFile for Pic32Mmio {
    fn read(&mut self, reg: Register) -> u32 {
        // Safety: the address is a valid, aligned SFR on the target
        unsafe { core::ptr::read_volatile(Self::ptr(reg, SfrAlias::Base)) }
    }

    fn write(&mut self, reg: Register, value: u32) {
        // Safety: the address is a valid, aligned SFR on the target
        unsafe { core::ptr::write_volatile(Self::ptr(reg, SfrAlias::Base), value) }
    }

    fn set_bits(&mut self, reg: Register, mask: u32) {
        // Safety: the address is a valid, aligned SFR on the target
        unsafe { core::ptr::write_volatile(Self::ptr(reg, SfrAlias::Set), mask) }
    }

    fn clear_bits(&mut self, reg: Register, mask: u32) {
        // Safety: the address is a valid, aligned SFR on the target
        unsafe { core::ptr::write_volatile(Self::ptr(reg, SfrAlias::Clr), mask) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_adc_addresses() {
        assert_eq!(0xBF80_9000, sfr_address(Register::Ad1Con1, SfrAlias::Base));
        assert_eq!(0xBF80_9070, sfr_address(Register::Adc1Buf0, SfrAlias::Base));
        assert_eq!(0xBF88_1064, sfr_address(Register::Iec0, SfrAlias::Clr));
        assert_eq!(0xBF80_9008, sfr_address(Register::Ad1Con1, SfrAlias::Set));
        assert_eq!(0xBF88_611C, sfr_address(Register::TrisB, SfrAlias::Inv));
    }

    #[test]
    fn test_addresses_are_distinct_and_aligned() {
        for (i, a) in Register::ALL.iter().enumerate() {
            let addr = sfr_address(*a, SfrAlias::Base);
            assert_eq!(0, addr % 16);
            for b in &Register::ALL[i + 1..] {
                assert_ne!(addr, sfr_address(*b, SfrAlias::Base));
            }
        }
    }
}
