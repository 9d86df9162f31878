use crate::emulator::errors::CpuError;
use std::cmp::Ordering;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 8;

/// Index of the register serving as the stack pointer.
pub const SP: u8 = 7;

/// Boot value of the stack pointer. The stack grows down from here; the
/// addresses above are reserved by ISA convention.
pub const SP_INIT: u8 = 0xF4;

/// Register file holding the CPU's working storage.
///
/// Eight byte-wide registers with no type tagging. R7 is the stack pointer.
pub struct Registers {
    regs: [u8; NUM_REGISTERS],
}

impl Registers {
    /// Creates a zeroed register file with the stack pointer at [`SP_INIT`].
    pub fn new() -> Self {
        let mut regs = [0; NUM_REGISTERS];
        regs[SP as usize] = SP_INIT;
        Self { regs }
    }

    /// Returns the value in register `idx`.
    ///
    /// Returns [`CpuError::InvalidRegisterIndex`] if `idx` is out of bounds.
    pub fn get(&self, idx: u8) -> Result<u8, CpuError> {
        self.regs
            .get(idx as usize)
            .copied()
            .ok_or(CpuError::InvalidRegisterIndex {
                index: idx,
                available: NUM_REGISTERS,
            })
    }

    /// Stores `value` into register `idx`.
    ///
    /// Returns [`CpuError::InvalidRegisterIndex`] if `idx` is out of bounds.
    pub fn set(&mut self, idx: u8, value: u8) -> Result<(), CpuError> {
        let slot = self
            .regs
            .get_mut(idx as usize)
            .ok_or(CpuError::InvalidRegisterIndex {
                index: idx,
                available: NUM_REGISTERS,
            })?;
        *slot = value;
        Ok(())
    }

    /// Current stack pointer (R7).
    pub fn sp(&self) -> u8 {
        self.regs[SP as usize]
    }

    /// Overwrites the stack pointer (R7).
    pub fn set_sp(&mut self, value: u8) {
        self.regs[SP as usize] = value;
    }

    /// All register values, for trace output.
    pub fn snapshot(&self) -> [u8; NUM_REGISTERS] {
        self.regs
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// Condition flags written by `CMP` and consumed by conditional jumps.
///
/// Every compare writes all three bits: exactly one true, the other two
/// false. Stale state from an earlier compare never leaks through.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub equal: bool,
    pub less: bool,
    pub greater: bool,
}

impl Flags {
    /// Records the outcome of a compare.
    pub fn record(&mut self, ordering: Ordering) {
        self.equal = ordering == Ordering::Equal;
        self.less = ordering == Ordering::Less;
        self.greater = ordering == Ordering::Greater;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_pointer_boots_below_top_of_ram() {
        let regs = Registers::new();
        assert_eq!(regs.sp(), SP_INIT);
        assert_eq!(regs.get(SP).unwrap(), SP_INIT);
    }

    #[test]
    fn get_set_roundtrip() {
        let mut regs = Registers::new();
        regs.set(3, 0x2A).unwrap();
        assert_eq!(regs.get(3).unwrap(), 0x2A);
    }

    #[test]
    fn out_of_bounds_index_is_an_error() {
        let mut regs = Registers::new();
        assert!(matches!(
            regs.get(8),
            Err(CpuError::InvalidRegisterIndex { index: 8, available }) if available == NUM_REGISTERS
        ));
        assert!(matches!(
            regs.set(255, 1),
            Err(CpuError::InvalidRegisterIndex { index: 255, .. })
        ));
    }

    #[test]
    fn record_sets_exactly_one_flag() {
        let mut flags = Flags::default();
        flags.record(Ordering::Less);
        assert_eq!((flags.equal, flags.less, flags.greater), (false, true, false));
        flags.record(Ordering::Equal);
        assert_eq!((flags.equal, flags.less, flags.greater), (true, false, false));
        flags.record(Ordering::Greater);
        assert_eq!((flags.equal, flags.less, flags.greater), (false, false, true));
    }
}
