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

use crate::ast::{Instruction, Operand};

fn zero() -> Operand {
    Operand::Ident("zero".to_string())
}

/// Rewrites a pseudo-instruction into its canonical form, in place.
///
/// Every rewrite maps one pseudo-instruction to exactly one machine
/// instruction, so instruction addresses are unaffected. A record whose
/// operand count does not match the expected shape is left alone for the
/// validator to report.
pub fn expand(instruction: &mut Instruction) {
    match instruction.mnemonic.as_str() {
        // "j label" is shorthand for "jal zero, label"
        "j" if instruction.operands.len() == 1 => {
            instruction.mnemonic = "jal".to_string();
            instruction.operands.insert(0, zero());
        }
        // "jr rs" is shorthand for "jalr zero, rs, 0"
        "jr" if instruction.operands.len() == 1 => {
            instruction.mnemonic = "jalr".to_string();
            instruction.operands.insert(0, zero());
            instruction.operands.push(Operand::Immediate(0));
        }
        // "mv rd, rs" is shorthand for "addi rd, rs, 0"
        "mv" if instruction.operands.len() == 2 => {
            instruction.mnemonic = "addi".to_string();
            instruction.operands.push(Operand::Immediate(0));
        }
        // "li rd, imm" is shorthand for "addi rd, zero, imm"
        "li" if instruction.operands.len() == 2 => {
            instruction.mnemonic = "addi".to_string();
            instruction.operands.insert(1, zero());
        }
        // "nop" is shorthand for "addi zero, zero, 0"
        "nop" if instruction.operands.is_empty() => {
            instruction.mnemonic = "addi".to_string();
            instruction.operands = vec![zero(), zero(), Operand::Immediate(0)];
        }
        // "bgt a, b, L" is shorthand for "blt b, a, L"
        "bgt" if instruction.operands.len() == 3 => {
            instruction.mnemonic = "blt".to_string();
            instruction.operands.swap(0, 1);
        }
        // "ble a, b, L" is shorthand for "bge b, a, L"
        "ble" if instruction.operands.len() == 3 => {
            instruction.mnemonic = "bge".to_string();
            instruction.operands.swap(0, 1);
        }
        _ => {}
    }
}
