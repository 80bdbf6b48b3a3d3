//! Hardware access traits
//!
//! The driver never touches hardware addresses directly. It is handed a [`RegisterFile`], which
//! on target is the memory mapped SFR space, and in tests is a simulated peripheral.

use crate::registers::{Field, Register};

/// Access to the special function registers used by the ADC driver
///
/// Reads take `&mut self` because reading a hardware register may have side effects, and a
/// simulated register file advances its state on every read.
pub trait RegisterFile {
    /// Read the current value of a register
    fn read(&mut self, reg: Register) -> u32;

    /// Write a new value to a register
    fn write(&mut self, reg: Register, value: u32);

    /// Read-modify-write a register
    fn modify(&mut self, reg: Register, f: impl FnOnce(u32) -> u32) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Set the bits of `mask` in a register
    fn set_bits(&mut self, reg: Register, mask: u32) {
        self.modify(reg, |v| v | mask);
    }

    /// Clear the bits of `mask` in a register
    fn clear_bits(&mut self, reg: Register, mask: u32) {
        self.modify(reg, |v| v & !mask);
    }

    /// Replace a single bit-field in a register
    fn write_field(&mut self, reg: Register, field: Field, value: u32) {
        self.modify(reg, |v| field.set(v, value));
    }

    /// Read a single bit-field from a register
    fn read_field(&mut self, reg: Register, field: Field) -> u32 {
        field.get(self.read(reg))
    }
}

impl<R: RegisterFile + ?Sized> RegisterFile for &mut R {
    fn read(&mut self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u32) {
        (**self).write(reg, value)
    }

    fn modify(&mut self, reg: Register, f: impl FnOnce(u32) -> u32) {
        (**self).modify(reg, f)
    }

    fn set_bits(&mut self, reg: Register, mask: u32) {
        (**self).set_bits(reg, mask)
    }

    fn clear_bits(&mut self, reg: Register, mask: u32) {
        (**self).clear_bits(reg, mask)
    }

    fn write_field(&mut self, reg: Register, field: Field, value: u32) {
        (**self).write_field(reg, field, value)
    }

    fn read_field(&mut self, reg: Register, field: Field) -> u32 {
        (**self).read_field(reg, field)
    }
}

/// A free-running 32-bit tick counter, such as the MIPS core timer
///
/// The counter is expected to wrap, and users compare ticks with wrapping arithmetic.
pub trait TickCounter {
    /// Read the current tick count
    fn now(&mut self) -> u32;

    /// Ticks elapsed since `start`, correct across a single counter wrap
    fn elapsed_since(&mut self, start: u32) -> u32 {
        self.now().wrapping_sub(start)
    }
}

impl<T: TickCounter + ?Sized> TickCounter for &mut T {
    fn now(&mut self) -> u32 {
        (**self).now()
    }

    fn elapsed_since(&mut self, start: u32) -> u32 {
        (**self).elapsed_since(start)
    }
}

/// A tick counter for boards which never time the sampling window in software
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTicks;

impl TickCounter for NoTicks {
    fn now(&mut self) -> u32 {
        0
    }
}
