//! LS-8 instruction-execution engine.
//!
//! The emulator models a single 8-bit CPU with 256 bytes of flat RAM, eight
//! general-purpose byte registers (R7 doubles as the stack pointer), a
//! three-bit condition-flag register, and a sequential fetch-decode-execute
//! loop that runs until `HLT`.
//!
//! # Architecture
//!
//! - **Registers**: 8 × `u8`; R7 is the stack pointer and boots at `0xF4`
//! - **Memory**: 256 bytes, program loaded at address 0, stack growing down
//!   from the top
//! - **Instruction format**: 1 opcode byte plus 0-2 operand bytes; the
//!   operand count is carried in bits 7-6 of the opcode
//! - **Flags**: `equal` / `less` / `greater`, written only by `CMP`,
//!   consumed by `JEQ`/`JNE`
//!
//! # Modules
//!
//! - [`cpu`]: CPU state and the execution loop
//! - [`errors`]: emulation and I/O-boundary error types
//! - [`isa`]: instruction set definition and opcode mappings
//! - [`program`]: `.ls8` program text format parsing and file loading

pub mod cpu;
pub mod errors;
pub mod isa;
#[cfg(test)]
mod isa_static_check;
pub mod program;
