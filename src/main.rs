//! LS-8 emulator CLI.
//!
//! Loads an `.ls8` program file into memory and runs it to completion,
//! printing `PRN` output to stdout one decimal value per line.
//!
//! # Usage
//! ```text
//! ls8 <program.ls8> [OPTIONS]
//! ```
//!
//! # Arguments
//! - `program.ls8`: Program file in the binary-literal text format
//!
//! # Options
//! - `-t, --trace`: Log the machine state before every instruction

use ls8::emulator::cpu::Cpu;
use ls8::emulator::program::Program;
use ls8::{error, trace};
use std::io;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let program_path = &args[1];
    let mut trace_mode = false;

    for arg in &args[2..] {
        match arg.as_str() {
            "--trace" | "-t" => trace_mode = true,
            other => {
                error!("Unexpected argument: {}\n", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    let program = match Program::from_file(program_path) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to load {}: {}", program_path, e);
            process::exit(1);
        }
    };

    let mut cpu = Cpu::new();
    if let Err(e) = cpu.load_program(&program) {
        error!("Failed to load {}: {}", program_path, e);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if trace_mode {
        loop {
            if !cpu.is_running() {
                break Ok(());
            }
            trace!("{}", cpu.trace());
            if let Err(e) = cpu.step(&mut out) {
                break Err(e);
            }
        }
    } else {
        cpu.run(&mut out)
    };

    if let Err(e) = result {
        error!("Emulation aborted: {}", e);
        process::exit(1);
    }
}

const USAGE: &str = "\
LS-8 Emulator

USAGE:
    {program} <program.ls8> [OPTIONS]

ARGS:
    <program.ls8>    Program file (one 8-bit binary literal per line)

OPTIONS:
    -t, --trace      Log the machine state before every instruction
    -h, --help       Print this help message

EXAMPLES:
    # Run a program
    {program} programs/print8.ls8

    # Run with a per-instruction state trace on stderr
    {program} programs/count.ls8 --trace
";

fn print_usage(program: &str) {
    eprintln!("{}", USAGE.replace("{program}", program));
}
