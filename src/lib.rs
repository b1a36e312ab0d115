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

pub mod assembler;
pub mod ast;
pub mod emitter;
pub mod errors;
pub mod file_reader;
pub mod parser;

use std::path::Path;

use anyhow::{Context, Result, bail};
use file_reader::FileReader;

extern crate pest;
extern crate pest_derive;

/// Runs the whole two-pass pipeline over one source file and returns the
/// memory-initialization text. With `debug` set, the symbol table and a
/// per-instruction encoding listing are printed along the way.
pub fn assemble<F: FileReader>(source_path: &Path, debug: bool, reader: &F) -> Result<String> {
    let source = reader
        .read_to_string(source_path)
        .with_context(|| format!("Failed to read input file: {}", source_path.display()))?;

    let lines = parser::parse_source(&source).context("Failed during parsing stage")?;

    let (symbol_table, program) =
        assembler::first_pass(&lines).context("Failed during assembler pass 1")?;

    if debug {
        println!("Symbol table after pass 1:");
        let mut symbols: Vec<_> = symbol_table.iter().collect();
        symbols.sort();
        for (name, address) in symbols {
            println!("  {} = 0x{:x}", name, address);
        }
    }

    let errors = assembler::validate_program(&program, &symbol_table);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}", error);
        }
        bail!("{} error(s) found during syntax validation", errors.len());
    }

    let words =
        assembler::encode_program(&program, &symbol_table).context("Failed during assembler pass 2")?;

    if debug {
        for (index, (instruction, word)) in program.iter().zip(&words).enumerate() {
            println!("Instruction #{} (address 0x{:x})", index, index * 4);
            println!("  Parsed: {}", instruction);
            println!("  Encoded: {:032b}", word);
            for (position, byte) in word.to_le_bytes().iter().enumerate() {
                println!("  Byte {}: {:08b}", position, byte);
            }
        }
    }

    Ok(emitter::render(&words))
}
