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

use crate::ast::{AssemblyLine, Instruction, Operand};
use crate::errors::AssemblyError;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

// Derive the parser from our grammar file.
#[derive(Parser)]
#[grammar = "./grammar.pest"]
pub struct AsmParser;

// Main parsing function that takes the entire source code string.
pub fn parse_source(source: &str) -> Result<Vec<AssemblyLine>, AssemblyError> {
    let pairs = AsmParser::parse(Rule::program, source)?;
    let mut lines = Vec::new();

    for line_pair in pairs
        .flatten()
        .filter(|p| p.as_rule() == Rule::line_content)
    {
        let mut inner = line_pair.into_inner();
        let mut assembly_line = AssemblyLine::default();

        // Check for a label first
        if let Some(pair) = inner.peek() {
            assembly_line.line_number = pair.as_span().start_pos().line_col().0;
            if pair.as_rule() == Rule::label {
                assembly_line.label = Some(
                    inner
                        .next()
                        .unwrap()
                        .into_inner()
                        .next()
                        .unwrap()
                        .as_str()
                        .to_string(),
                );
            }
        }

        // Check for an instruction
        if let Some(pair) = inner.peek() {
            if pair.as_rule() == Rule::instruction {
                assembly_line.instruction = Some(build_instruction(inner.next().unwrap())?);
            }
        }

        // Only add non-empty lines
        if assembly_line.label.is_some() || assembly_line.instruction.is_some() {
            lines.push(assembly_line);
        }
    }

    Ok(lines)
}

// ------------- builder helpers -------------

// Build a canonical instruction record from an instruction pair.
fn build_instruction(pair: Pair<Rule>) -> Result<Instruction, AssemblyError> {
    let line_number = pair.as_span().start_pos().line_col().0;
    let mut inner = pair.into_inner();

    let mnemonic = inner.next().unwrap().as_str().to_string();

    let mut operands = Vec::new();
    for operand_pair in inner {
        operands.push(build_operand(operand_pair)?);
    }

    Ok(Instruction {
        line_number,
        mnemonic,
        operands,
    })
}

// Helper to build an Operand from a pest Pair
fn build_operand(pair: Pair<Rule>) -> Result<Operand, AssemblyError> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::immediate => Ok(Operand::Immediate(parse_immediate(&inner_pair)?)),
        Rule::identifier => Ok(Operand::Ident(inner_pair.as_str().to_string())),
        Rule::memory => build_memory(inner_pair),
        _ => unreachable!("Unknown operand rule: {:?}", inner_pair.as_rule()),
    }
}

// build a memory operand, e.g. "8(x2)"
fn build_memory(pair: Pair<Rule>) -> Result<Operand, AssemblyError> {
    let mut inner = pair.into_inner();
    let offset = parse_immediate(&inner.next().unwrap())?;
    let base = inner.next().unwrap().as_str().to_string();
    Ok(Operand::Memory { offset, base })
}

fn parse_immediate(pair: &Pair<Rule>) -> Result<i32, AssemblyError> {
    let line = pair.as_span().start_pos().line_col().0;
    pair.as_str()
        .parse::<i32>()
        .map_err(|_| AssemblyError::ImmediateOutOfRange {
            line,
            reason: format!("\"{}\" does not fit in a 32-bit immediate", pair.as_str()),
        })
}

// ------------- unit tests -------------
