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

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AssemblyError {
    #[error("Syntax Error: {0}")]
    PestError(#[from] pest::error::Error<crate::parser::Rule>),

    #[error("Unknown mnemonic on line {line}: \"{mnemonic}\"")]
    UnknownMnemonic { line: usize, mnemonic: String },

    #[error("Unknown register on line {line}: \"{name}\"")]
    UnknownRegister { line: usize, name: String },

    #[error("Not enough operands on line {line}: \"{mnemonic}\" expects {expected}, found {found}")]
    NotEnoughOperands {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Malformed memory operand on line {line}: \"{operand}\", expected \"offset(register)\"")]
    MalformedMemoryOperand { line: usize, operand: String },

    #[error("Undefined label on line {line}: \"{name}\"")]
    UndefinedLabel { line: usize, name: String },

    #[error("Duplicate label definition on line {line}: \"{name}\"")]
    DuplicateLabel { line: usize, name: String },

    #[error("Immediate out of range on line {line}: {reason}")]
    ImmediateOutOfRange { line: usize, reason: String },

    #[error("Misaligned target on line {line}: byte offset {offset} is not a multiple of 2")]
    MisalignedTarget { line: usize, offset: i32 },
}
