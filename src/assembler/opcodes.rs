/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

// Structural category of an instruction, deciding operand shape and bit
// layout. The I family is split three ways because loads and jalr take
// their operands in different shapes than register-immediate arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    Load,
    Jalr,
    S,
    B,
    U,
    J,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub format: Format,
    pub opcode: u32, // 7-bit base opcode
}

/// Maps a mnemonic to its format and base opcode.
pub fn lookup(mnemonic: &str) -> Option<OpcodeEntry> {
    let entry = match mnemonic {
        // R-type, including the M multiply/divide extension
        "add" | "sub" | "sll" | "slt" | "sltu" | "xor" | "srl" | "sra" | "or" | "and" | "mul"
        | "mulh" | "mulhsu" | "mulhu" | "div" | "divu" | "rem" | "remu" => OpcodeEntry {
            format: Format::R,
            opcode: 0b0110011,
        },
        // I-type register-immediate arithmetic
        "addi" | "slti" | "sltiu" | "xori" | "ori" | "andi" | "slli" | "srli" | "srai" => {
            OpcodeEntry {
                format: Format::I,
                opcode: 0b0010011,
            }
        }
        // I-type loads
        "lb" | "lh" | "lw" | "lbu" | "lhu" => OpcodeEntry {
            format: Format::Load,
            opcode: 0b0000011,
        },
        "jalr" => OpcodeEntry {
            format: Format::Jalr,
            opcode: 0b1100111,
        },
        // S-type stores
        "sb" | "sh" | "sw" => OpcodeEntry {
            format: Format::S,
            opcode: 0b0100011,
        },
        // B-type conditional branches
        "beq" | "bne" | "blt" | "bge" | "bltu" | "bgeu" => OpcodeEntry {
            format: Format::B,
            opcode: 0b1100011,
        },
        "lui" => OpcodeEntry {
            format: Format::U,
            opcode: 0b0110111,
        },
        "auipc" => OpcodeEntry {
            format: Format::U,
            opcode: 0b0010111,
        },
        "jal" => OpcodeEntry {
            format: Format::J,
            opcode: 0b1101111,
        },
        _ => return None,
    };
    Some(entry)
}

/// Minimum operand count the validator requires for a format.
pub fn min_operands(format: Format) -> usize {
    match format {
        Format::R => 3,
        Format::I => 3,
        Format::Load => 2,  // rd, imm(rs1)
        Format::Jalr => 2,  // rd, imm(rs1) | rd, rs1 | rd, rs1, imm
        Format::S => 2,     // rs2, imm(rs1)
        Format::B => 3,
        Format::U => 2,
        Format::J => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_r_type() {
        let entry = lookup("add").unwrap();
        assert_eq!(entry.format, Format::R);
        assert_eq!(entry.opcode, 0b0110011);
        // The M extension shares the R-type base opcode
        assert_eq!(lookup("mulhsu").unwrap(), entry);
        assert_eq!(lookup("remu").unwrap(), entry);
    }

    #[test]
    fn test_lookup_i_family() {
        assert_eq!(lookup("addi").unwrap().opcode, 0b0010011);
        assert_eq!(lookup("srai").unwrap().format, Format::I);
        assert_eq!(lookup("lw").unwrap().opcode, 0b0000011);
        assert_eq!(lookup("lw").unwrap().format, Format::Load);
        assert_eq!(lookup("jalr").unwrap().opcode, 0b1100111);
        assert_eq!(lookup("jalr").unwrap().format, Format::Jalr);
    }

    #[test]
    fn test_lookup_store_branch_jump() {
        assert_eq!(lookup("sw").unwrap().opcode, 0b0100011);
        assert_eq!(lookup("bgeu").unwrap().opcode, 0b1100011);
        assert_eq!(lookup("lui").unwrap().opcode, 0b0110111);
        assert_eq!(lookup("auipc").unwrap().opcode, 0b0010111);
        assert_eq!(lookup("jal").unwrap().opcode, 0b1101111);
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup("ecall"), None);
        assert_eq!(lookup("mov"), None);
        // Pseudo-mnemonics are rewritten before the table is consulted
        assert_eq!(lookup("li"), None);
    }

    #[test]
    fn test_min_operands() {
        assert_eq!(min_operands(Format::R), 3);
        assert_eq!(min_operands(Format::Load), 2);
        assert_eq!(min_operands(Format::Jalr), 2);
        assert_eq!(min_operands(Format::B), 3);
        assert_eq!(min_operands(Format::J), 2);
    }
}
