#[cfg(test)]
mod tests {
    use crate::emulator::isa::{Instruction, OPERAND_COUNT_SHIFT};

    macro_rules! isa_entries {
        (
            $( $(#[$doc:meta])* $name:ident = $opcode:expr, $mnemonic:literal => [
                $( $field:ident : $kind:ident ),* $(,)?
            ] ),* $(,)?
        ) => {
            vec![
                $( ($mnemonic, $opcode as u8, Instruction::$name), )*
            ]
        };
    }

    fn entries() -> Vec<(&'static str, u8, Instruction)> {
        crate::for_each_instruction!(isa_entries)
    }

    #[test]
    fn opcodes_are_unique() {
        let entries = entries();
        for (i, (_, a, _)) in entries.iter().enumerate() {
            for (_, b, _) in &entries[i + 1..] {
                assert_ne!(a, b, "duplicate opcode 0x{a:02X}");
            }
        }
    }

    #[test]
    fn every_opcode_decodes_to_its_instruction() {
        for (mnemonic, opcode, instr) in entries() {
            assert_eq!(
                Instruction::try_from(opcode).unwrap(),
                instr,
                "{mnemonic}"
            );
        }
    }

    #[test]
    fn operand_count_bits_match_table() {
        for (mnemonic, opcode, instr) in entries() {
            let encoded = (opcode >> OPERAND_COUNT_SHIFT) as usize;
            assert_eq!(
                encoded,
                instr.operands(),
                "{mnemonic}: opcode bits 7-6 disagree with the table arity"
            );
        }
    }

    #[test]
    fn alu_marker_matches_alu_ops() {
        for (mnemonic, _, instr) in entries() {
            let is_alu = matches!(mnemonic, "ADD" | "MUL" | "CMP");
            assert_eq!(instr.is_alu(), is_alu, "{mnemonic}: ALU marker bit");
        }
    }

    #[test]
    fn sets_pc_marker_matches_control_flow_ops() {
        for (mnemonic, _, instr) in entries() {
            let sets_pc = matches!(mnemonic, "CALL" | "RET" | "JMP" | "JEQ" | "JNE");
            assert_eq!(instr.sets_pc(), sets_pc, "{mnemonic}: sets-PC marker bit");
        }
    }
}
