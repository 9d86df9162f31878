use thiserror::Error;

/// Errors that can occur while loading or executing a program.
#[derive(Debug, Error)]
pub enum CpuError {
    /// Byte at the program counter does not decode to any instruction.
    #[error("unknown opcode 0x{opcode:02X} at address 0x{address:02X}")]
    UnknownOpcode { opcode: u8, address: usize },
    /// An ALU-marked opcode has no ALU operation mapped to it. Signals an
    /// internal dispatch bug rather than bad input.
    #[error("unsupported ALU operation {mnemonic}")]
    UnsupportedAluOp { mnemonic: &'static str },
    /// Memory access beyond RAM capacity.
    #[error("address 0x{address:02X} out of range (memory size {size})")]
    AddressOutOfRange { address: usize, size: usize },
    /// Operand names a register the register file doesn't have.
    #[error("register index {index} out of bounds (register file size {available})")]
    InvalidRegisterIndex { index: u8, available: usize },
    /// Program does not fit into RAM.
    #[error("program of {len} bytes exceeds memory capacity {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },
    /// File read or output write failure at the I/O boundary.
    #[error("io error: {0}")]
    Io(String),
}
