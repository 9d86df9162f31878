//! CPU state and the fetch-decode-execute loop.
//!
//! The [`Cpu`] owns all emulation state (RAM, register file, flags, program
//! counter, running flag) — no globals, so independent instances can run
//! side by side. All arithmetic wraps at 8 bits to match the register width.

use crate::emulator::cpu::memory::{Memory, RAM_SIZE};
use crate::emulator::cpu::registers::{Flags, Registers};
use crate::emulator::errors::CpuError;
use crate::emulator::isa::Instruction;
use crate::emulator::program::Program;
use std::io::Write;

pub mod memory;
pub mod registers;

/// Operations the ALU can apply to a register pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum AluOp {
    Add,
    Mul,
    Cmp,
}

impl AluOp {
    /// Maps an ALU-marked instruction to its ALU operation.
    ///
    /// Returns [`CpuError::UnsupportedAluOp`] for instructions routed here
    /// without a mapping — that is a dispatch bug, not bad input.
    fn for_instruction(instr: Instruction) -> Result<Self, CpuError> {
        match instr {
            Instruction::Add => Ok(AluOp::Add),
            Instruction::Mul => Ok(AluOp::Mul),
            Instruction::Cmp => Ok(AluOp::Cmp),
            other => Err(CpuError::UnsupportedAluOp {
                mnemonic: other.mnemonic(),
            }),
        }
    }
}

/// LS-8 CPU.
///
/// Executes instructions sequentially from RAM, starting the program counter
/// at address 0, until a `HLT` instruction clears the running flag or an
/// emulation error aborts the run. `PRN` output goes to the writer passed
/// into [`Cpu::run`] or [`Cpu::step`], in program order.
pub struct Cpu {
    /// Flat 256-byte RAM holding the program and the stack.
    memory: Memory,
    /// Eight general-purpose registers; R7 is the stack pointer.
    registers: Registers,
    /// Condition flags written by `CMP`.
    flags: Flags,
    /// Program counter: address of the opcode about to execute.
    pc: usize,
    /// Cleared by `HLT`; the run loop's sole termination condition.
    running: bool,
}

impl Cpu {
    /// Creates a CPU with zeroed RAM and registers, PC at 0.
    pub fn new() -> Self {
        Self {
            memory: Memory::new(),
            registers: Registers::new(),
            flags: Flags::default(),
            pc: 0,
            running: true,
        }
    }

    /// Copies a program into RAM starting at address 0.
    pub fn load_program(&mut self, program: &Program) -> Result<(), CpuError> {
        self.memory.load_at(0, program.bytes())
    }

    /// True until a `HLT` instruction executes.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs the fetch-decode-execute loop to completion.
    ///
    /// Returns when `HLT` executes. Decode and execution errors are fatal:
    /// the run aborts with no resume point.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), CpuError> {
        while self.running {
            self.step(out)?;
        }
        Ok(())
    }

    /// Executes a single instruction.
    ///
    /// Fetches the opcode at the program counter, decodes it by table
    /// lookup, reads as many operand bytes as the instruction declares, and
    /// dispatches to the handler. A no-op once the CPU has halted.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<(), CpuError> {
        if !self.running {
            return Ok(());
        }

        let address = self.pc;
        let opcode = self.memory.read(address)?;
        let instr = Instruction::try_from(opcode)
            .map_err(|_| CpuError::UnknownOpcode { opcode, address })?;

        let operand_a = if instr.operands() >= 1 {
            self.memory.read(address + 1)?
        } else {
            0
        };
        let operand_b = if instr.operands() >= 2 {
            self.memory.read(address + 2)?
        } else {
            0
        };

        self.exec(instr, operand_a, operand_b, out)
    }

    /// Formats the current machine state for debugging: the program counter,
    /// the three bytes at it, the flags, and all registers.
    pub fn trace(&self) -> String {
        let mut line = format!("TRACE: {:02X} |", self.pc);
        for offset in 0..3 {
            let byte = self.memory.read(self.pc + offset).unwrap_or(0);
            line.push_str(&format!(" {byte:02X}"));
        }
        line.push_str(&format!(
            " | FL {}{}{} |",
            if self.flags.equal { 'E' } else { '-' },
            if self.flags.less { 'L' } else { '-' },
            if self.flags.greater { 'G' } else { '-' },
        ));
        for reg in self.registers.snapshot() {
            line.push_str(&format!(" {reg:02X}"));
        }
        line
    }

    /// Routes a decoded instruction to its handler.
    fn exec<W: Write>(
        &mut self,
        instr: Instruction,
        operand_a: u8,
        operand_b: u8,
        out: &mut W,
    ) -> Result<(), CpuError> {
        match instr {
            Instruction::Hlt => self.op_hlt(),
            Instruction::Ldi => self.op_ldi(operand_a, operand_b)?,
            Instruction::Prn => self.op_prn(out, operand_a)?,
            Instruction::Push => self.op_push(operand_a)?,
            Instruction::Pop => self.op_pop(operand_a)?,
            Instruction::Call => self.op_call(operand_a)?,
            Instruction::Ret => self.op_ret()?,
            Instruction::Jmp => self.op_jmp(operand_a)?,
            Instruction::Jeq => self.op_jeq(operand_a)?,
            Instruction::Jne => self.op_jne(operand_a)?,
            alu_instr => self.op_alu(alu_instr, operand_a, operand_b)?,
        }
        Ok(())
    }

    /// Applies an ALU operation to a register pair.
    ///
    /// `ADD`/`MUL` write the wrapped result back into `reg_a`; `CMP` writes
    /// the flags and leaves the registers untouched.
    fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), CpuError> {
        let a = self.registers.get(reg_a)?;
        let b = self.registers.get(reg_b)?;
        match op {
            AluOp::Add => self.registers.set(reg_a, a.wrapping_add(b))?,
            AluOp::Mul => self.registers.set(reg_a, a.wrapping_mul(b))?,
            AluOp::Cmp => self.flags.record(a.cmp(&b)),
        }
        Ok(())
    }

    fn op_hlt(&mut self) {
        self.running = false;
    }

    fn op_ldi(&mut self, reg: u8, value: u8) -> Result<(), CpuError> {
        self.registers.set(reg, value)?;
        self.pc += 3;
        Ok(())
    }

    fn op_prn<W: Write>(&mut self, out: &mut W, reg: u8) -> Result<(), CpuError> {
        let value = self.registers.get(reg)?;
        writeln!(out, "{value}").map_err(|e| CpuError::Io(e.to_string()))?;
        self.pc += 2;
        Ok(())
    }

    fn op_push(&mut self, reg: u8) -> Result<(), CpuError> {
        let value = self.registers.get(reg)?;
        let sp = self.registers.sp().wrapping_sub(1);
        self.registers.set_sp(sp);
        self.memory.write(sp as usize, value)?;
        self.pc += 2;
        Ok(())
    }

    fn op_pop(&mut self, reg: u8) -> Result<(), CpuError> {
        let sp = self.registers.sp();
        let value = self.memory.read(sp as usize)?;
        self.registers.set(reg, value)?;
        self.registers.set_sp(sp.wrapping_add(1));
        self.pc += 2;
        Ok(())
    }

    fn op_call(&mut self, reg: u8) -> Result<(), CpuError> {
        let target = self.registers.get(reg)?;
        let return_addr = self.pc + 2;
        // The return address is pushed as a single byte cell.
        if return_addr >= RAM_SIZE {
            return Err(CpuError::AddressOutOfRange {
                address: return_addr,
                size: RAM_SIZE,
            });
        }
        let sp = self.registers.sp().wrapping_sub(1);
        self.registers.set_sp(sp);
        self.memory.write(sp as usize, return_addr as u8)?;
        self.pc = target as usize;
        Ok(())
    }

    fn op_ret(&mut self) -> Result<(), CpuError> {
        let sp = self.registers.sp();
        let return_addr = self.memory.read(sp as usize)?;
        self.registers.set_sp(sp.wrapping_add(1));
        self.pc = return_addr as usize;
        Ok(())
    }

    fn op_jmp(&mut self, reg: u8) -> Result<(), CpuError> {
        self.pc = self.registers.get(reg)? as usize;
        Ok(())
    }

    fn op_jeq(&mut self, reg: u8) -> Result<(), CpuError> {
        let target = self.registers.get(reg)?;
        if self.flags.equal {
            self.pc = target as usize;
        } else {
            self.pc += 2;
        }
        Ok(())
    }

    fn op_jne(&mut self, reg: u8) -> Result<(), CpuError> {
        let target = self.registers.get(reg)?;
        if self.flags.equal {
            self.pc += 2;
        } else {
            self.pc = target as usize;
        }
        Ok(())
    }

    fn op_alu(&mut self, instr: Instruction, reg_a: u8, reg_b: u8) -> Result<(), CpuError> {
        let op = AluOp::for_instruction(instr)?;
        self.alu(op, reg_a, reg_b)?;
        self.pc += 3;
        Ok(())
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
