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

use crate::assembler::opcodes::{self, Format};
use crate::assembler::registers;
use crate::assembler::symbol_table::SymbolTable;
use crate::ast::{Instruction, Operand};
use crate::errors::AssemblyError;

/// Checks every instruction record against its form's operand rules,
/// accumulating all errors instead of stopping at the first one. An empty
/// result means the program may be encoded.
pub fn validate_program(program: &[Instruction], symbol_table: &SymbolTable) -> Vec<AssemblyError> {
    let mut errors = Vec::new();
    for instruction in program {
        validate_instruction(instruction, symbol_table, &mut errors);
    }
    errors
}

fn validate_instruction(
    instruction: &Instruction,
    symbol_table: &SymbolTable,
    errors: &mut Vec<AssemblyError>,
) {
    let line = instruction.line_number;

    let Some(entry) = opcodes::lookup(&instruction.mnemonic) else {
        errors.push(AssemblyError::UnknownMnemonic {
            line,
            mnemonic: instruction.mnemonic.clone(),
        });
        return;
    };

    let expected = opcodes::min_operands(entry.format);
    if instruction.operands.len() < expected {
        errors.push(AssemblyError::NotEnoughOperands {
            line,
            mnemonic: instruction.mnemonic.clone(),
            expected,
            found: instruction.operands.len(),
        });
        return;
    }

    let operands = &instruction.operands;
    match entry.format {
        Format::R => {
            for operand in &operands[..3] {
                check_register(operand, line, errors);
            }
        }
        Format::I => {
            check_register(&operands[0], line, errors);
            check_register(&operands[1], line, errors);
            check_immediate_or_label(&operands[2], symbol_table, line, errors);
        }
        Format::Load => {
            check_register(&operands[0], line, errors);
            check_memory(&operands[1], line, errors);
        }
        Format::Jalr => {
            check_register(&operands[0], line, errors);
            match &operands[1] {
                Operand::Memory { .. } => check_memory(&operands[1], line, errors),
                _ => {
                    check_register(&operands[1], line, errors);
                    if let Some(operand) = operands.get(2) {
                        check_immediate_or_label(operand, symbol_table, line, errors);
                    }
                }
            }
        }
        Format::S => {
            check_register(&operands[0], line, errors);
            check_memory(&operands[1], line, errors);
        }
        Format::B => {
            check_register(&operands[0], line, errors);
            check_register(&operands[1], line, errors);
            check_immediate_or_label(&operands[2], symbol_table, line, errors);
        }
        Format::U => {
            check_register(&operands[0], line, errors);
            check_immediate_or_label(&operands[1], symbol_table, line, errors);
        }
        Format::J => {
            check_register(&operands[0], line, errors);
            check_immediate_or_label(&operands[1], symbol_table, line, errors);
        }
    }
}

fn check_register(operand: &Operand, line: usize, errors: &mut Vec<AssemblyError>) {
    match operand {
        Operand::Ident(name) if registers::resolve(name).is_some() => {}
        Operand::Ident(name) => errors.push(AssemblyError::UnknownRegister {
            line,
            name: name.clone(),
        }),
        other => errors.push(AssemblyError::UnknownRegister {
            line,
            name: other.to_string(),
        }),
    }
}

fn check_memory(operand: &Operand, line: usize, errors: &mut Vec<AssemblyError>) {
    match operand {
        Operand::Memory { base, .. } => {
            if registers::resolve(base).is_none() {
                errors.push(AssemblyError::UnknownRegister {
                    line,
                    name: base.clone(),
                });
            }
        }
        other => errors.push(AssemblyError::MalformedMemoryOperand {
            line,
            operand: other.to_string(),
        }),
    }
}

fn check_immediate_or_label(
    operand: &Operand,
    symbol_table: &SymbolTable,
    line: usize,
    errors: &mut Vec<AssemblyError>,
) {
    match operand {
        Operand::Immediate(_) => {}
        Operand::Ident(name) if symbol_table.contains_key(name) => {}
        Operand::Ident(name) => errors.push(AssemblyError::UndefinedLabel {
            line,
            name: name.clone(),
        }),
        other => errors.push(AssemblyError::UndefinedLabel {
            line,
            name: other.to_string(),
        }),
    }
}
