//! LS-8 microcomputer emulator.
//!
//! Provides the instruction-execution core (memory, registers, flags, ALU,
//! fetch-decode-execute loop) and the `.ls8` program text loader.

pub mod emulator;
pub mod utils;
