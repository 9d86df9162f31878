use crate::emulator::errors::CpuError;

/// RAM capacity in bytes.
pub const RAM_SIZE: usize = 256;

/// Flat byte-addressable RAM.
///
/// Every access is bounds-checked: addresses at or beyond [`RAM_SIZE`]
/// return [`CpuError::AddressOutOfRange`] instead of wrapping.
pub struct Memory {
    cells: [u8; RAM_SIZE],
}

impl Memory {
    /// Creates zeroed RAM.
    pub fn new() -> Self {
        Self {
            cells: [0; RAM_SIZE],
        }
    }

    /// Reads the byte at `address`.
    pub fn read(&self, address: usize) -> Result<u8, CpuError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(CpuError::AddressOutOfRange {
                address,
                size: RAM_SIZE,
            })
    }

    /// Writes `value` at `address`.
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), CpuError> {
        let slot = self
            .cells
            .get_mut(address)
            .ok_or(CpuError::AddressOutOfRange {
                address,
                size: RAM_SIZE,
            })?;
        *slot = value;
        Ok(())
    }

    /// Copies `bytes` into RAM starting at `start`.
    pub fn load_at(&mut self, start: usize, bytes: &[u8]) -> Result<(), CpuError> {
        let end = start
            .checked_add(bytes.len())
            .filter(|end| *end <= RAM_SIZE)
            .ok_or(CpuError::ProgramTooLarge {
                len: bytes.len(),
                capacity: RAM_SIZE.saturating_sub(start),
            })?;
        self.cells[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_roundtrip() {
        let mut mem = Memory::new();
        mem.write(0x10, 0xAB).unwrap();
        assert_eq!(mem.read(0x10).unwrap(), 0xAB);
        assert_eq!(mem.read(0x11).unwrap(), 0);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut mem = Memory::new();
        assert!(matches!(
            mem.read(RAM_SIZE),
            Err(CpuError::AddressOutOfRange { address, size })
                if address == RAM_SIZE && size == RAM_SIZE
        ));
        assert!(matches!(
            mem.write(RAM_SIZE, 1),
            Err(CpuError::AddressOutOfRange { .. })
        ));
    }

    #[test]
    fn load_at_bounds() {
        let mut mem = Memory::new();
        mem.load_at(0, &[1, 2, 3]).unwrap();
        assert_eq!(mem.read(2).unwrap(), 3);

        let too_big = vec![0u8; RAM_SIZE + 1];
        assert!(matches!(
            mem.load_at(0, &too_big),
            Err(CpuError::ProgramTooLarge { .. })
        ));
        assert!(matches!(
            mem.load_at(RAM_SIZE - 1, &[1, 2]),
            Err(CpuError::ProgramTooLarge { .. })
        ));
    }
}
