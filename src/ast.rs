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

use std::fmt;

// Represents all possible forms an argument to an instruction can take.
// Register spellings and label references both parse as `Ident`; which one
// a given position must be is decided by the validator and the encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Ident(String),
    Immediate(i32),
    Memory { offset: i32, base: String }, // e.g. 8(x2)
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Ident(name) => write!(f, "{}", name),
            Operand::Immediate(value) => write!(f, "{}", value),
            Operand::Memory { offset, base } => write!(f, "{}({})", offset, base),
        }
    }
}

// A canonical instruction record: mnemonic plus ordered operands, with the
// 1-based source line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub line_number: usize,
    pub mnemonic: String,
    pub operands: Vec<Operand>,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for (position, operand) in self.operands.iter().enumerate() {
            if position == 0 {
                write!(f, " {}", operand)?;
            } else {
                write!(f, ", {}", operand)?;
            }
        }
        Ok(())
    }
}

// --- Assembly Line Structure ---

// Represents a single line of code, which can have a label, an instruction, or both.
#[derive(Debug, Clone, Default)]
pub struct AssemblyLine {
    pub line_number: usize,
    pub label: Option<String>,
    pub instruction: Option<Instruction>,
}
