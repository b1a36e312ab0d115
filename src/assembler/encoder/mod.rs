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

mod constants;
mod fields;

use crate::assembler::opcodes::{self, Format, OpcodeEntry};
use crate::assembler::registers;
use crate::assembler::symbol_table::{self, SymbolTable};
use crate::ast::{Instruction, Operand};
use crate::errors::AssemblyError;
use constants::*;
use fields::*;

// Branch offsets are signed 13-bit byte values with an implicit zero low
// bit. Jump offsets are signed 21-bit; the accepted magnitude stops two
// short of the field limit so the bound is symmetric.
const BRANCH_MIN: i32 = -(1 << 12);
const BRANCH_MAX: i32 = (1 << 12) - 1;
const JUMP_MAX: i32 = (1 << 20) - 2;

/// Translates one canonical instruction record into its 32-bit word.
/// `index` is the record's position in the instruction list; PC-relative
/// targets are computed against `index * 4`.
///
/// Operand counts and shapes were already checked by the validator; range
/// and alignment of immediates are checked here.
pub fn encode_instruction(
    instruction: &Instruction,
    index: usize,
    symbol_table: &SymbolTable,
) -> Result<u32, AssemblyError> {
    let entry = opcodes::lookup(&instruction.mnemonic).ok_or_else(|| {
        AssemblyError::UnknownMnemonic {
            line: instruction.line_number,
            mnemonic: instruction.mnemonic.clone(),
        }
    })?;

    match entry.format {
        Format::R => encode_r_type(instruction, entry),
        Format::I => encode_i_type(instruction, entry, symbol_table),
        Format::Load => encode_load(instruction, entry),
        Format::Jalr => encode_jalr(instruction, entry, symbol_table),
        Format::S => encode_s_type(instruction, entry),
        Format::B => encode_b_type(instruction, index, entry, symbol_table),
        Format::U => encode_u_type(instruction, entry, symbol_table),
        Format::J => encode_j_type(instruction, index, entry, symbol_table),
    }
}

// ------------- operand resolution -------------

fn resolve_register(operand: &Operand, line: usize) -> Result<u32, AssemblyError> {
    match operand {
        Operand::Ident(name) => registers::resolve(name).map(u32::from).ok_or_else(|| {
            AssemblyError::UnknownRegister {
                line,
                name: name.clone(),
            }
        }),
        other => Err(AssemblyError::UnknownRegister {
            line,
            name: other.to_string(),
        }),
    }
}

// An immediate slot holds either a literal or a label, which resolves to
// its absolute byte address.
fn resolve_immediate(
    operand: &Operand,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<i32, AssemblyError> {
    match operand {
        Operand::Immediate(value) => Ok(*value),
        Operand::Ident(name) => {
            symbol_table::get_symbol(symbol_table, name, line).map(|address| address as i32)
        }
        other => Err(AssemblyError::UndefinedLabel {
            line,
            name: other.to_string(),
        }),
    }
}

// A branch or jump target: labels resolve PC-relative to the referring
// instruction, integer literals are the byte offset itself.
fn resolve_target_offset(
    operand: &Operand,
    index: usize,
    symbol_table: &SymbolTable,
    line: usize,
) -> Result<i32, AssemblyError> {
    match operand {
        Operand::Immediate(value) => Ok(*value),
        Operand::Ident(name) => {
            let target = symbol_table::get_symbol(symbol_table, name, line)?;
            Ok(target as i32 - (index * 4) as i32)
        }
        other => Err(AssemblyError::UndefinedLabel {
            line,
            name: other.to_string(),
        }),
    }
}

fn check_even(offset: i32, line: usize) -> Result<(), AssemblyError> {
    if offset % 2 != 0 {
        return Err(AssemblyError::MisalignedTarget { line, offset });
    }
    Ok(())
}

// ------------- per-form encoders -------------

fn encode_r_type(instruction: &Instruction, entry: OpcodeEntry) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rd = resolve_register(&instruction.operands[0], line)?;
    let rs1 = resolve_register(&instruction.operands[1], line)?;
    let rs2 = resolve_register(&instruction.operands[2], line)?;

    Ok(r_instruction(
        r_funct7(&instruction.mnemonic),
        rs2,
        rs1,
        r_funct3(&instruction.mnemonic),
        rd,
        entry.opcode,
    ))
}

fn encode_i_type(
    instruction: &Instruction,
    entry: OpcodeEntry,
    symbol_table: &SymbolTable,
) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rd = resolve_register(&instruction.operands[0], line)?;
    let rs1 = resolve_register(&instruction.operands[1], line)?;
    let imm = resolve_immediate(&instruction.operands[2], symbol_table, line)?;
    let funct3 = i_funct3(&instruction.mnemonic);

    // Shifts repurpose the immediate field: the low five bits hold the
    // shift amount and the upper seven distinguish srai from srli.
    if matches!(instruction.mnemonic.as_str(), "slli" | "srli" | "srai") {
        if !(0..=31).contains(&imm) {
            return Err(AssemblyError::ImmediateOutOfRange {
                line,
                reason: format!("shift amount {} outside [0, 31]", imm),
            });
        }
        let upper = if instruction.mnemonic == "srai" {
            FUNCT7_ALT
        } else {
            FUNCT7_BASE
        };
        let shift_imm = ((upper << 5) | imm as u32) as i32;
        return Ok(i_instruction(shift_imm, rs1, funct3, rd, entry.opcode));
    }

    Ok(i_instruction(imm, rs1, funct3, rd, entry.opcode))
}

fn encode_load(instruction: &Instruction, entry: OpcodeEntry) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rd = resolve_register(&instruction.operands[0], line)?;
    let Operand::Memory { offset, base } = &instruction.operands[1] else {
        return Err(AssemblyError::MalformedMemoryOperand {
            line,
            operand: instruction.operands[1].to_string(),
        });
    };
    let rs1 = registers::resolve(base)
        .map(u32::from)
        .ok_or_else(|| AssemblyError::UnknownRegister {
            line,
            name: base.clone(),
        })?;

    Ok(i_instruction(
        *offset,
        rs1,
        i_funct3(&instruction.mnemonic),
        rd,
        entry.opcode,
    ))
}

fn encode_jalr(
    instruction: &Instruction,
    entry: OpcodeEntry,
    symbol_table: &SymbolTable,
) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rd = resolve_register(&instruction.operands[0], line)?;

    // "jalr rd, imm(rs1)" is the preferred spelling; "jalr rd, rs1" and
    // "jalr rd, rs1, imm" are also accepted.
    let (rs1, imm) = match &instruction.operands[1] {
        Operand::Memory { offset, base } => {
            let rs1 = registers::resolve(base).map(u32::from).ok_or_else(|| {
                AssemblyError::UnknownRegister {
                    line,
                    name: base.clone(),
                }
            })?;
            (rs1, *offset)
        }
        other => {
            let rs1 = resolve_register(other, line)?;
            let imm = match instruction.operands.get(2) {
                Some(operand) => resolve_immediate(operand, symbol_table, line)?,
                None => 0,
            };
            (rs1, imm)
        }
    };

    Ok(i_instruction(
        imm,
        rs1,
        i_funct3(&instruction.mnemonic),
        rd,
        entry.opcode,
    ))
}

fn encode_s_type(instruction: &Instruction, entry: OpcodeEntry) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rs2 = resolve_register(&instruction.operands[0], line)?;
    let Operand::Memory { offset, base } = &instruction.operands[1] else {
        return Err(AssemblyError::MalformedMemoryOperand {
            line,
            operand: instruction.operands[1].to_string(),
        });
    };
    let rs1 = registers::resolve(base)
        .map(u32::from)
        .ok_or_else(|| AssemblyError::UnknownRegister {
            line,
            name: base.clone(),
        })?;

    Ok(s_instruction(
        *offset,
        rs2,
        rs1,
        s_funct3(&instruction.mnemonic),
        entry.opcode,
    ))
}

fn encode_b_type(
    instruction: &Instruction,
    index: usize,
    entry: OpcodeEntry,
    symbol_table: &SymbolTable,
) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rs1 = resolve_register(&instruction.operands[0], line)?;
    let rs2 = resolve_register(&instruction.operands[1], line)?;
    let offset = resolve_target_offset(&instruction.operands[2], index, symbol_table, line)?;

    check_even(offset, line)?;
    if !(BRANCH_MIN..=BRANCH_MAX).contains(&offset) {
        return Err(AssemblyError::ImmediateOutOfRange {
            line,
            reason: format!("branch offset {} outside signed 13-bit range", offset),
        });
    }

    Ok(b_instruction(
        offset,
        rs2,
        rs1,
        b_funct3(&instruction.mnemonic),
        entry.opcode,
    ))
}

fn encode_u_type(
    instruction: &Instruction,
    entry: OpcodeEntry,
    symbol_table: &SymbolTable,
) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rd = resolve_register(&instruction.operands[0], line)?;
    let imm = resolve_immediate(&instruction.operands[1], symbol_table, line)?;

    Ok(u_instruction(imm, rd, entry.opcode))
}

fn encode_j_type(
    instruction: &Instruction,
    index: usize,
    entry: OpcodeEntry,
    symbol_table: &SymbolTable,
) -> Result<u32, AssemblyError> {
    let line = instruction.line_number;
    let rd = resolve_register(&instruction.operands[0], line)?;
    let offset = resolve_target_offset(&instruction.operands[1], index, symbol_table, line)?;

    check_even(offset, line)?;
    if !(-JUMP_MAX..=JUMP_MAX).contains(&offset) {
        return Err(AssemblyError::ImmediateOutOfRange {
            line,
            reason: format!("jump offset {} too far for jal", offset),
        });
    }

    Ok(j_instruction(offset, rd, entry.opcode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction(mnemonic: &str, operands: Vec<Operand>) -> Instruction {
        Instruction {
            line_number: 1,
            mnemonic: mnemonic.to_string(),
            operands,
        }
    }

    fn ident(name: &str) -> Operand {
        Operand::Ident(name.to_string())
    }

    fn regs3(mnemonic: &str, rd: &str, rs1: &str, rs2: &str) -> Instruction {
        instruction(mnemonic, vec![ident(rd), ident(rs1), ident(rs2)])
    }

    fn memory(offset: i32, base: &str) -> Operand {
        Operand::Memory {
            offset,
            base: base.to_string(),
        }
    }

    fn encode(record: &Instruction) -> Result<u32, AssemblyError> {
        encode_instruction(record, 0, &SymbolTable::new())
    }

    // --- R-type ---

    #[test]
    fn test_encode_add() {
        assert_eq!(encode(&regs3("add", "x3", "x1", "x2")).unwrap(), 0x002081B3);
    }

    #[test]
    fn test_encode_sub_uses_alternate_funct7() {
        assert_eq!(encode(&regs3("sub", "x3", "x1", "x2")).unwrap(), 0x402081B3);
    }

    #[test]
    fn test_encode_sra_combines_funct3_and_funct7() {
        assert_eq!(encode(&regs3("sra", "x3", "x1", "x2")).unwrap(), 0x4020D1B3);
    }

    #[test]
    fn test_encode_logical_r_type() {
        assert_eq!(encode(&regs3("and", "x3", "x1", "x2")).unwrap(), 0x0020F1B3);
        assert_eq!(encode(&regs3("or", "x3", "x1", "x2")).unwrap(), 0x0020E1B3);
        assert_eq!(encode(&regs3("xor", "x3", "x1", "x2")).unwrap(), 0x0020C1B3);
        assert_eq!(encode(&regs3("sltu", "x3", "x1", "x2")).unwrap(), 0x0020B1B3);
    }

    #[test]
    fn test_encode_m_extension() {
        assert_eq!(encode(&regs3("mul", "x3", "x1", "x2")).unwrap(), 0x022081B3);
        assert_eq!(encode(&regs3("mulh", "x3", "x1", "x2")).unwrap(), 0x022091B3);
        assert_eq!(encode(&regs3("div", "x3", "x1", "x2")).unwrap(), 0x0220C1B3);
        assert_eq!(encode(&regs3("divu", "x3", "x1", "x2")).unwrap(), 0x0220D1B3);
        assert_eq!(encode(&regs3("rem", "x3", "x1", "x2")).unwrap(), 0x0220E1B3);
        assert_eq!(encode(&regs3("remu", "x3", "x1", "x2")).unwrap(), 0x0220F1B3);
    }

    #[test]
    fn test_encode_r_type_with_abi_names() {
        // add t0, sp, a0 == add x5, x2, x10
        assert_eq!(encode(&regs3("add", "t0", "sp", "a0")).unwrap(), 0x00A102B3);
    }

    // --- I-type ---

    #[test]
    fn test_encode_addi_seed_vector() {
        let record = instruction("addi", vec![ident("x1"), ident("x0"), Operand::Immediate(5)]);
        assert_eq!(
            encode(&record).unwrap(),
            0b00000000010100000000000010010011
        );
    }

    #[test]
    fn test_encode_negative_immediate_wraps() {
        let record = instruction(
            "addi",
            vec![ident("x1"), ident("x0"), Operand::Immediate(-1)],
        );
        assert_eq!(encode(&record).unwrap(), 0xFFF00093);
    }

    #[test]
    fn test_encode_immediate_boundaries() {
        let record = instruction(
            "addi",
            vec![ident("x1"), ident("x0"), Operand::Immediate(-2048)],
        );
        assert_eq!(encode(&record).unwrap() >> 20, 0b100000000000);
        let record = instruction(
            "addi",
            vec![ident("x1"), ident("x0"), Operand::Immediate(2047)],
        );
        assert_eq!(encode(&record).unwrap() >> 20, 0b011111111111);
        // +2048 overflows the field and wraps to the same pattern as -2048
        let record = instruction(
            "addi",
            vec![ident("x1"), ident("x0"), Operand::Immediate(2048)],
        );
        assert_eq!(encode(&record).unwrap() >> 20, 0b100000000000);
    }

    #[test]
    fn test_encode_andi() {
        let record = instruction(
            "andi",
            vec![ident("x5"), ident("x6"), Operand::Immediate(255)],
        );
        assert_eq!(encode(&record).unwrap(), 0x0FF37293);
    }

    #[test]
    fn test_encode_symbolic_immediate_resolves_to_address() {
        let mut symbol_table = SymbolTable::new();
        symbol_table.insert("table".to_string(), 8);
        let record = instruction("addi", vec![ident("x5"), ident("zero"), ident("table")]);
        let word = encode_instruction(&record, 2, &symbol_table).unwrap();
        assert_eq!(word >> 20, 8);
    }

    // --- shifts ---

    #[test]
    fn test_encode_shifts() {
        let record = instruction(
            "slli",
            vec![ident("x1"), ident("x1"), Operand::Immediate(31)],
        );
        assert_eq!(encode(&record).unwrap(), 0x01F09093);
        let record = instruction(
            "srli",
            vec![ident("x2"), ident("x2"), Operand::Immediate(4)],
        );
        assert_eq!(encode(&record).unwrap(), 0x00415113);
        let record = instruction(
            "srai",
            vec![ident("x2"), ident("x2"), Operand::Immediate(4)],
        );
        assert_eq!(encode(&record).unwrap(), 0x40415113);
    }

    #[test]
    fn test_encode_shift_amount_out_of_range() {
        let record = instruction(
            "slli",
            vec![ident("x1"), ident("x1"), Operand::Immediate(32)],
        );
        assert!(matches!(
            encode(&record),
            Err(AssemblyError::ImmediateOutOfRange { .. })
        ));
        let record = instruction(
            "srai",
            vec![ident("x1"), ident("x1"), Operand::Immediate(-1)],
        );
        assert!(matches!(
            encode(&record),
            Err(AssemblyError::ImmediateOutOfRange { .. })
        ));
    }

    // --- loads ---

    #[test]
    fn test_encode_loads() {
        let record = instruction("lw", vec![ident("x5"), memory(16, "x6")]);
        assert_eq!(encode(&record).unwrap(), 0x01032283);
        let record = instruction("lbu", vec![ident("x1"), memory(-1, "x2")]);
        assert_eq!(encode(&record).unwrap(), 0xFFF14083);
    }

    // --- jalr ---

    #[test]
    fn test_encode_jalr_memory_form() {
        let record = instruction("jalr", vec![ident("x1"), memory(8, "x5")]);
        assert_eq!(encode(&record).unwrap(), 0x008280E7);
    }

    #[test]
    fn test_encode_jalr_two_operand_form() {
        let record = instruction("jalr", vec![ident("x0"), ident("x1")]);
        assert_eq!(encode(&record).unwrap(), 0x000080E7);
    }

    #[test]
    fn test_encode_jalr_three_operand_form() {
        let record = instruction(
            "jalr",
            vec![ident("x1"), ident("x5"), Operand::Immediate(8)],
        );
        assert_eq!(encode(&record).unwrap(), 0x008280E7);
    }

    // --- S-type ---

    #[test]
    fn test_encode_sw_seed_vector() {
        let record = instruction("sw", vec![ident("x1"), memory(8, "x2")]);
        assert_eq!(
            encode(&record).unwrap(),
            0b00000000000100010010010000100011
        );
    }

    #[test]
    fn test_encode_sh_negative_offset() {
        let record = instruction("sh", vec![ident("x3"), memory(-4, "x4")]);
        assert_eq!(encode(&record).unwrap(), 0xFE321E23);
    }

    // --- B-type ---

    #[test]
    fn test_encode_beq_backwards_seed_vector() {
        let mut symbol_table = SymbolTable::new();
        symbol_table.insert("loop".to_string(), 0);
        let record = instruction("beq", vec![ident("x2"), ident("x0"), ident("loop")]);
        // the beq sits at list index 1, so the offset is 0 - 4 = -4
        assert_eq!(
            encode_instruction(&record, 1, &symbol_table).unwrap(),
            0b11111110000000010000111011100011
        );
    }

    #[test]
    fn test_encode_branch_literal_offset() {
        let record = instruction("beq", vec![ident("x1"), ident("x2"), Operand::Immediate(8)]);
        assert_eq!(encode(&record).unwrap(), 0x00208463);
    }

    #[test]
    fn test_encode_branch_offset_boundaries() {
        let low = instruction(
            "beq",
            vec![ident("x0"), ident("x0"), Operand::Immediate(-4096)],
        );
        assert_eq!(encode(&low).unwrap(), 0x80000063);
        let high = instruction(
            "beq",
            vec![ident("x0"), ident("x0"), Operand::Immediate(4094)],
        );
        assert_eq!(encode(&high).unwrap(), 0x7E000FE3);
    }

    #[test]
    fn test_encode_branch_odd_offset_fails() {
        let record = instruction(
            "beq",
            vec![ident("x0"), ident("x0"), Operand::Immediate(4095)],
        );
        assert_eq!(
            encode(&record),
            Err(AssemblyError::MisalignedTarget {
                line: 1,
                offset: 4095
            })
        );
    }

    #[test]
    fn test_encode_branch_offset_out_of_range() {
        let record = instruction(
            "beq",
            vec![ident("x0"), ident("x0"), Operand::Immediate(4096)],
        );
        assert!(matches!(
            encode(&record),
            Err(AssemblyError::ImmediateOutOfRange { .. })
        ));
        let record = instruction(
            "beq",
            vec![ident("x0"), ident("x0"), Operand::Immediate(-4098)],
        );
        assert!(matches!(
            encode(&record),
            Err(AssemblyError::ImmediateOutOfRange { .. })
        ));
    }

    // --- U-type ---

    #[test]
    fn test_encode_lui_takes_field_value_directly() {
        let record = instruction("lui", vec![ident("x1"), Operand::Immediate(1)]);
        assert_eq!(encode(&record).unwrap(), 0x000010B7);
        let record = instruction("lui", vec![ident("x10"), Operand::Immediate(0xFFFFF)]);
        assert_eq!(encode(&record).unwrap(), 0xFFFFF537);
    }

    #[test]
    fn test_encode_auipc() {
        let record = instruction("auipc", vec![ident("x2"), Operand::Immediate(16)]);
        assert_eq!(encode(&record).unwrap(), 0x00010117);
    }

    #[test]
    fn test_encode_lui_with_symbol() {
        let mut symbol_table = SymbolTable::new();
        symbol_table.insert("data".to_string(), 64);
        let record = instruction("lui", vec![ident("x1"), ident("data")]);
        let word = encode_instruction(&record, 0, &symbol_table).unwrap();
        assert_eq!(word >> 12, 64);
    }

    // --- J-type ---

    #[test]
    fn test_encode_jal_to_self_seed_vector() {
        let mut symbol_table = SymbolTable::new();
        symbol_table.insert("start".to_string(), 0);
        let record = instruction("jal", vec![ident("ra"), ident("start")]);
        assert_eq!(
            encode_instruction(&record, 0, &symbol_table).unwrap(),
            0b00000000000000000000000011101111
        );
    }

    #[test]
    fn test_encode_jal_backwards() {
        let mut symbol_table = SymbolTable::new();
        symbol_table.insert("loop".to_string(), 0);
        let record = instruction("jal", vec![ident("x0"), ident("loop")]);
        assert_eq!(
            encode_instruction(&record, 1, &symbol_table).unwrap(),
            0xFFDFF06F
        );
    }

    #[test]
    fn test_encode_jal_offset_boundaries() {
        let record = instruction("jal", vec![ident("x1"), Operand::Immediate(1048574)]);
        assert_eq!(encode(&record).unwrap(), 0x7FFFF0EF);
        let record = instruction("jal", vec![ident("x1"), Operand::Immediate(-1048574)]);
        assert!(encode(&record).is_ok());
    }

    #[test]
    fn test_encode_jal_offset_out_of_range() {
        for offset in [1048576, -1048576] {
            let record = instruction("jal", vec![ident("x1"), Operand::Immediate(offset)]);
            assert!(matches!(
                encode(&record),
                Err(AssemblyError::ImmediateOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_encode_unknown_register_is_reported() {
        let record = regs3("add", "x1", "x2", "x99");
        assert_eq!(
            encode(&record),
            Err(AssemblyError::UnknownRegister {
                line: 1,
                name: "x99".to_string()
            })
        );
    }
}
