//! Instruction encoding.
//!
//! A C-instruction is `111 a c1..c6 d1 d2 d3 j1 j2 j3`. Each field is looked up
//! on its own and appended to the word at its own width, so a field can never
//! spill into its neighbour. An unknown mnemonic is reported and encoded as an
//! all-zero field.

use phf::phf_map;
use std::fmt;

use crate::error::{AsmError, Diagnostics};
use crate::parser::{Located, ResolvedInstruction};

/// Destination mnemonic to d1 d2 d3
pub static DEST_TABLE: phf::Map<&'static str, u8> = phf_map! {
    "M" => 0b001,
    "D" => 0b010,
    "MD" => 0b011,
    "A" => 0b100,
    "AM" => 0b101,
    "AD" => 0b110,
    "AMD" => 0b111,
};

/// Jump mnemonic to j1 j2 j3
pub static JUMP_TABLE: phf::Map<&'static str, u8> = phf_map! {
    "JGT" => 0b001,
    "JEQ" => 0b010,
    "JGE" => 0b011,
    "JLT" => 0b100,
    "JNE" => 0b101,
    "JLE" => 0b110,
    "JMP" => 0b111,
};

/// Computation mnemonic to (a, c1..c6)
/// The A and M forms of an operation share c-bits and differ only in `a`
pub static COMP_TABLE: phf::Map<&'static str, (u8, u8)> = phf_map! {
    "0" => (0, 0b101010),
    "1" => (0, 0b111111),
    "-1" => (0, 0b111010),
    "D" => (0, 0b001100),
    "A" => (0, 0b110000),
    "M" => (1, 0b110000),
    "!D" => (0, 0b001101),
    "!A" => (0, 0b110001),
    "!M" => (1, 0b110001),
    "-D" => (0, 0b001111),
    "-A" => (0, 0b110011),
    "-M" => (1, 0b110011),
    "D+1" => (0, 0b011111),
    "A+1" => (0, 0b110111),
    "M+1" => (1, 0b110111),
    "D-1" => (0, 0b001110),
    "A-1" => (0, 0b110010),
    "M-1" => (1, 0b110010),
    "D+A" => (0, 0b000010),
    "D+M" => (1, 0b000010),
    "D-A" => (0, 0b010011),
    "D-M" => (1, 0b010011),
    "A-D" => (0, 0b000111),
    "M-D" => (1, 0b000111),
    "D&A" => (0, 0b000000),
    "D&M" => (1, 0b000000),
    "D|A" => (0, 0b010101),
    "D|M" => (1, 0b010101),
};

/// One 16-bit machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word(pub u16);

impl Word {
    pub fn bits(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

/// Builds a word left to right, one fixed-width field at a time.
#[derive(Debug, Default)]
struct FieldPacker {
    word: u16,
    width: u32,
}

impl FieldPacker {
    fn push(mut self, value: u16, width: u32) -> Self {
        let mask = (1u16 << width) - 1;
        self.word = (self.word << width) | (value & mask);
        self.width += width;
        self
    }

    fn finish(self) -> Word {
        debug_assert_eq!(self.width, 16, "fields must fill exactly one word");
        Word(self.word)
    }
}

pub fn encode_address(value: u16) -> Word {
    FieldPacker::default().push(0, 1).push(value, 15).finish()
}

pub fn encode_compute(a: u8, comp: u8, dest: u8, jump: u8) -> Word {
    FieldPacker::default()
        .push(0b111, 3)
        .push(a.into(), 1)
        .push(comp.into(), 6)
        .push(dest.into(), 3)
        .push(jump.into(), 3)
        .finish()
}

pub fn dest_bits(mnemonic: Option<&str>) -> Option<u8> {
    match mnemonic {
        None => Some(0b000),
        Some(m) => DEST_TABLE.get(m).copied(),
    }
}

pub fn jump_bits(mnemonic: Option<&str>) -> Option<u8> {
    match mnemonic {
        None => Some(0b000),
        Some(m) => JUMP_TABLE.get(m).copied(),
    }
}

pub fn comp_bits(mnemonic: &str) -> Option<(u8, u8)> {
    COMP_TABLE.get(mnemonic).copied()
}

/// Encode one resolved instruction, reporting unknown mnemonics.
pub fn encode(inst: &Located<ResolvedInstruction>, diagnostics: &mut Diagnostics) -> Word {
    let line = inst.line;
    match &inst.inner {
        ResolvedInstruction::Address(value) => encode_address(*value),
        ResolvedInstruction::Compute { dest, comp, jump } => {
            let (a, c) = comp_bits(comp).unwrap_or_else(|| {
                diagnostics.push(AsmError::UnknownComp {
                    line,
                    comp: comp.clone(),
                });
                (0, 0)
            });

            let d = dest_bits(dest.as_deref()).unwrap_or_else(|| {
                diagnostics.push(AsmError::UnknownDest {
                    line,
                    dest: dest.clone().unwrap_or_default(),
                });
                0
            });

            let j = jump_bits(jump.as_deref()).unwrap_or_else(|| {
                diagnostics.push(AsmError::UnknownJump {
                    line,
                    jump: jump.clone().unwrap_or_default(),
                });
                0
            });

            encode_compute(a, c, d, j)
        }
    }
}

/// Encode a whole program, one word per instruction in program order.
pub fn encode_all(instructions: &[Located<ResolvedInstruction>]) -> (Vec<Word>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let words = instructions
        .iter()
        .map(|inst| encode(inst, &mut diagnostics))
        .collect();
    (words, diagnostics)
}
