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

mod encoder;
mod opcodes;
mod pseudo;
mod registers;
mod symbol_table;
mod validator;

use crate::ast::{AssemblyLine, Instruction};
use crate::errors::AssemblyError;
use symbol_table::SymbolTable;

/// Pass 1: expand pseudo-instructions, bind labels, build the instruction
/// list.
///
/// Each label binds to the address of the next instruction record, which is
/// `list length * 4` because every instruction occupies exactly four bytes.
/// Re-binding an existing label is a fatal error.
pub fn first_pass(
    lines: &[AssemblyLine],
) -> Result<(SymbolTable, Vec<Instruction>), AssemblyError> {
    let mut symbol_table = SymbolTable::new();
    let mut program: Vec<Instruction> = Vec::new();

    for line in lines {
        if let Some(label) = &line.label {
            if symbol_table.contains_key(label) {
                return Err(AssemblyError::DuplicateLabel {
                    line: line.line_number,
                    name: label.clone(),
                });
            }
            symbol_table.insert(label.clone(), (program.len() * 4) as u32);
        }

        if let Some(instruction) = &line.instruction {
            let mut instruction = instruction.clone();
            pseudo::expand(&mut instruction);
            program.push(instruction);
        }
    }

    Ok((symbol_table, program))
}

/// Syntax validation over the whole instruction list. Returns every error
/// found; an empty vector is the pass verdict.
pub fn validate_program(program: &[Instruction], symbol_table: &SymbolTable) -> Vec<AssemblyError> {
    validator::validate_program(program, symbol_table)
}

/// Pass 2: encode each instruction into its 32-bit word, in list order.
/// The list index gives the instruction address (`index * 4`) for
/// PC-relative targets.
pub fn encode_program(
    program: &[Instruction],
    symbol_table: &SymbolTable,
) -> Result<Vec<u32>, AssemblyError> {
    program
        .iter()
        .enumerate()
        .map(|(index, instruction)| encoder::encode_instruction(instruction, index, symbol_table))
        .collect()
}
