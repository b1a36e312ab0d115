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

// Sub-opcode fields. funct7 selects between the base integer ops, the
// subtract/arithmetic-shift group and the M extension; funct3 picks the
// operation within a base opcode.

pub const FUNCT7_BASE: u32 = 0b0000000;
pub const FUNCT7_ALT: u32 = 0b0100000; // sub, sra, srai
pub const FUNCT7_MULDIV: u32 = 0b0000001; // M extension

pub fn r_funct7(mnemonic: &str) -> u32 {
    match mnemonic {
        "sub" | "sra" => FUNCT7_ALT,
        "mul" | "mulh" | "mulhsu" | "mulhu" | "div" | "divu" | "rem" | "remu" => FUNCT7_MULDIV,
        _ => FUNCT7_BASE,
    }
}

pub fn r_funct3(mnemonic: &str) -> u32 {
    match mnemonic {
        "add" | "sub" | "mul" => 0b000,
        "sll" | "mulh" => 0b001,
        "slt" | "mulhsu" => 0b010,
        "sltu" | "mulhu" => 0b011,
        "xor" | "div" => 0b100,
        "srl" | "sra" | "divu" => 0b101,
        "or" | "rem" => 0b110,
        "and" | "remu" => 0b111,
        _ => 0b000,
    }
}

pub fn i_funct3(mnemonic: &str) -> u32 {
    match mnemonic {
        "addi" | "jalr" | "lb" => 0b000,
        "slli" | "lh" => 0b001,
        "slti" | "lw" => 0b010,
        "sltiu" => 0b011,
        "xori" | "lbu" => 0b100,
        "srli" | "srai" | "lhu" => 0b101,
        "ori" => 0b110,
        "andi" => 0b111,
        _ => 0b000,
    }
}

pub fn s_funct3(mnemonic: &str) -> u32 {
    match mnemonic {
        "sb" => 0b000,
        "sh" => 0b001,
        "sw" => 0b010,
        _ => 0b000,
    }
}

pub fn b_funct3(mnemonic: &str) -> u32 {
    match mnemonic {
        "beq" => 0b000,
        "bne" => 0b001,
        "blt" => 0b100,
        "bge" => 0b101,
        "bltu" => 0b110,
        "bgeu" => 0b111,
        _ => 0b000,
    }
}
