//! Instruction Set Architecture (ISA) definitions.
//!
//! Defines the LS-8 instruction set. The
//! [`for_each_instruction!`](crate::for_each_instruction) macro holds the
//! canonical instruction definitions and invokes a callback macro for code
//! generation, so other modules can generate instruction-related code
//! without duplicating the table.
//!
//! This module generates:
//! - The [`Instruction`] enum with opcode mappings
//! - `TryFrom<u8>` for decoding opcodes
//! - Per-instruction `mnemonic()` / `operands()` / `length()` accessors
//!
//! # Opcode layout
//!
//! ```text
//! bits 7-6: number of operand bytes following the opcode (0, 1, or 2)
//! bit 5:    ALU operation marker
//! bit 4:    sets-PC marker (control flow)
//! bits 3-0: opcode identifier
//! ```
//!
//! The structural bits are informational: decoding always goes through the
//! full-byte table lookup, never through the bit fields. A `cfg(test)`
//! static check asserts the table and the bit conventions stay in sync.

use crate::emulator::errors::CpuError;

/// Bit position of the operand count in an opcode byte.
pub const OPERAND_COUNT_SHIFT: u8 = 6;
/// ALU operation marker bit.
pub const ALU_MARKER: u8 = 1 << 5;
/// Sets-PC marker bit (instruction assigns the program counter itself).
pub const SETS_PC_MARKER: u8 = 1 << 4;

/// Invokes a callback macro with the complete instruction definition list.
///
/// This macro enables code generation for instructions in multiple modules
/// without duplicating the instruction definitions.
#[macro_export]
macro_rules! for_each_instruction {
    ($callback:ident) => {
        $callback! {
            /// HLT ; halt the CPU and exit the run loop
            Hlt = 0b0000_0001, "HLT" => [],
            /// RET ; pop the return address off the stack into PC
            Ret = 0b0001_0001, "RET" => [],
            /// PUSH reg ; decrement SP, copy the register to the top of the stack
            Push = 0b0100_0101, "PUSH" => [reg: Reg],
            /// POP reg ; copy the top of the stack into the register, increment SP
            Pop = 0b0100_0110, "POP" => [reg: Reg],
            /// PRN reg ; print the register's value in decimal
            Prn = 0b0100_0111, "PRN" => [reg: Reg],
            /// CALL reg ; push PC+2, jump to the address held in the register
            Call = 0b0101_0000, "CALL" => [reg: Reg],
            /// JMP reg ; jump to the address held in the register
            Jmp = 0b0101_0100, "JMP" => [reg: Reg],
            /// JEQ reg ; jump to the address in the register if Equal is set
            Jeq = 0b0101_0101, "JEQ" => [reg: Reg],
            /// JNE reg ; jump to the address in the register if Equal is clear
            Jne = 0b0101_0110, "JNE" => [reg: Reg],
            /// LDI reg, value ; load an immediate value into the register
            Ldi = 0b1000_0010, "LDI" => [reg: Reg, value: Imm],
            /// ADD regA, regB ; regA += regB, wrapping at 8 bits
            Add = 0b1010_0000, "ADD" => [reg_a: Reg, reg_b: Reg],
            /// MUL regA, regB ; regA *= regB, wrapping at 8 bits
            Mul = 0b1010_0010, "MUL" => [reg_a: Reg, reg_b: Reg],
            /// CMP regA, regB ; compare the registers, set exactly one flag
            Cmp = 0b1010_0111, "CMP" => [reg_a: Reg, reg_b: Reg],
        }
    };
}

#[macro_export]
macro_rules! define_instructions {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $opcode:expr, $mnemonic:literal => [
                $( $field:ident : $kind:ident ),* $(,)?
            ]
        ),* $(,)?
    ) => {
        /// One decoded LS-8 instruction.
        ///
        /// Discriminants are the opcode byte values.
        #[derive(Copy, Clone, Debug, Eq, PartialEq)]
        pub enum Instruction {
            $(
                $(#[$doc])*
                $name = $opcode,
            )*
        }

        impl TryFrom<u8> for Instruction {
            type Error = CpuError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( v if v == $opcode => Ok(Instruction::$name), )*
                    _ => Err(CpuError::UnknownOpcode {
                        opcode: value,
                        address: 0,
                    }),
                }
            }
        }

        impl Instruction {
            /// Returns the assembly mnemonic for this instruction.
            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $( Instruction::$name => $mnemonic, )*
                }
            }

            /// Returns the number of operand bytes following the opcode.
            pub const fn operands(&self) -> usize {
                match self {
                    $(
                        Instruction::$name => {
                            0usize $( + define_instructions!(@one $field) )*
                        }
                    )*
                }
            }
        }
    };

    (@one $field:ident) => { 1usize };
}

for_each_instruction!(define_instructions);

impl Instruction {
    /// Total encoded length in bytes (opcode plus operands).
    pub const fn length(&self) -> usize {
        1 + self.operands()
    }

    /// True if the opcode carries the ALU operation marker.
    pub const fn is_alu(self) -> bool {
        (self as u8) & ALU_MARKER != 0
    }

    /// True if the opcode carries the sets-PC marker.
    pub const fn sets_pc(self) -> bool {
        (self as u8) & SETS_PC_MARKER != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_try_from_invalid() {
        assert!(matches!(
            Instruction::try_from(0xFF),
            Err(CpuError::UnknownOpcode { opcode: 0xFF, .. })
        ));
        assert!(matches!(
            Instruction::try_from(0x00),
            Err(CpuError::UnknownOpcode { opcode: 0x00, .. })
        ));
    }

    #[test]
    fn instruction_try_from_roundtrip() {
        assert_eq!(Instruction::try_from(0x82).unwrap(), Instruction::Ldi);
        assert_eq!(Instruction::try_from(0x01).unwrap(), Instruction::Hlt);
        assert_eq!(Instruction::try_from(0xA7).unwrap(), Instruction::Cmp);
    }

    #[test]
    fn instruction_lengths() {
        assert_eq!(Instruction::Hlt.length(), 1);
        assert_eq!(Instruction::Prn.length(), 2);
        assert_eq!(Instruction::Ldi.length(), 3);
    }

    #[test]
    fn mnemonics() {
        assert_eq!(Instruction::Ldi.mnemonic(), "LDI");
        assert_eq!(Instruction::Jne.mnemonic(), "JNE");
    }
}
