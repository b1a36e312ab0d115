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

use anyhow::{Context, Result};
use clap::Parser as clap_parser;
use rvasm::assemble;
use rvasm::file_reader::AsmFileReader;
use std::fs;
use std::path::PathBuf;

#[derive(clap_parser)]
#[clap(version = "0.1.0", about = "Two-pass assembler for RV32I + M")]
struct Opts {
    /// Assembly source file
    #[clap(short, long)]
    input: PathBuf,
    /// Memory-initialization output file
    #[clap(short, long, default_value = "memory.mif")]
    output: PathBuf,
    /// Dump the symbol table and a per-instruction encoding listing
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    let reader = AsmFileReader;
    let output_text = assemble(&opts.input, opts.debug, &reader)?;

    fs::write(&opts.output, output_text)
        .with_context(|| format!("Failed to write output file: {}", opts.output.display()))?;
    println!(
        "Successfully assembled {} to {}",
        opts.input.display(),
        opts.output.display()
    );

    Ok(())
}
