//! Two-pass symbol resolution.
//!
//! Pass 1 reads every source line, binds labels to the ROM index of the next
//! instruction and collects the instruction list. Pass 2 walks that list in
//! order and replaces symbolic operands with addresses, allocating variables
//! on first sight. [`Resolver::second_pass`] consumes the resolver, so no
//! lookup can happen before every label is known.

use std::io::BufRead;

use crate::error::{AsmError, Diagnostics, Result};
use crate::parser::{
    Instruction, Line, Located, MAX_ADDRESS, Operand, ResolvedInstruction, parse_line,
};
use crate::symbols::{SymbolKind, SymbolTable};

/// Output of both passes, ready for the encoder.
#[derive(Debug)]
pub struct Resolution {
    pub instructions: Vec<Located<ResolvedInstruction>>,
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
}

pub struct Resolver<F> {
    sanitize: F,
    symbols: SymbolTable,
    instructions: Vec<Located<Instruction>>,
    diagnostics: Diagnostics,
    line_num: usize,
}

impl<F> Resolver<F>
where
    F: Fn(&str) -> String,
{
    pub fn new(sanitize: F) -> Self {
        Self {
            sanitize,
            symbols: SymbolTable::new(),
            instructions: Vec::new(),
            diagnostics: Diagnostics::new(),
            line_num: 0,
        }
    }

    /// Feed the next raw source line to pass 1.
    pub fn feed(&mut self, raw: &str) {
        self.line_num += 1;
        let line_num = self.line_num;

        let clean = (self.sanitize)(raw);
        if clean.is_empty() {
            return;
        }

        match parse_line(&clean, line_num) {
            Ok(Line::Label(label)) => self.bind_label(label, line_num),
            Ok(Line::Instruction(inst)) => self.instructions.push(Located::new(line_num, inst)),
            Err(err) => {
                // A broken A-instruction still occupies its ROM word.
                if clean.starts_with('@') {
                    self.instructions
                        .push(Located::new(line_num, Instruction::Address(Operand::Literal(0))));
                }
                self.diagnostics.push(err);
            }
        }
    }

    fn bind_label(&mut self, label: String, line_num: usize) {
        let position = self.instructions.len();
        let address = match u16::try_from(position) {
            Ok(address) if address <= MAX_ADDRESS => address,
            _ => {
                self.diagnostics.push(AsmError::AddressOutOfRange {
                    line: line_num,
                    value: position.to_string(),
                });
                return;
            }
        };

        if let Err(existing) = self.symbols.insert_label(&label, address) {
            self.diagnostics.push(AsmError::DuplicateSymbol {
                line: line_num,
                name: label,
                existing: existing.address,
            });
            return;
        }
        log::trace!("label {} -> {}", label, address);
    }

    /// Run pass 1 over every line of `lines`.
    pub fn first_pass<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed(line.as_ref());
        }
    }

    /// Run pass 1 over a line source. A read failure aborts the run.
    pub fn first_pass_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            self.feed(&line?);
        }
        Ok(())
    }

    /// Pass 2: rewrite every symbolic operand into an address.
    pub fn second_pass(self) -> Resolution {
        let Resolver {
            mut symbols,
            instructions,
            mut diagnostics,
            ..
        } = self;

        log::debug!(
            "pass 1: {} instructions, {} labels",
            instructions.len(),
            symbols.count(SymbolKind::Label)
        );

        let instructions: Vec<_> = instructions
            .into_iter()
            .map(|Located { line, inner }| {
                let addr = match &inner {
                    Instruction::Address(Operand::Symbol(name)) => {
                        symbols.get_or_allocate(name).unwrap_or_else(|| {
                            diagnostics.push(AsmError::AddressOutOfRange {
                                line,
                                value: name.clone(),
                            });
                            0
                        })
                    }
                    _ => 0, // unused for literals and C-instructions
                };
                Located::new(line, inner.resolve(addr))
            })
            .collect();

        log::debug!(
            "pass 2: {} variables allocated",
            symbols.count(SymbolKind::Variable)
        );

        Resolution {
            instructions,
            symbols,
            diagnostics,
        }
    }
}

/// Resolve a whole program given as raw lines.
pub fn resolve<I, S, F>(lines: I, sanitize: F) -> Resolution
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let mut resolver = Resolver::new(sanitize);
    resolver.first_pass(lines);
    resolver.second_pass()
}

/// Resolve a whole program read from `reader`.
pub fn resolve_reader<R, F>(reader: R, sanitize: F) -> Result<Resolution>
where
    R: BufRead,
    F: Fn(&str) -> String,
{
    let mut resolver = Resolver::new(sanitize);
    resolver.first_pass_reader(reader)?;
    Ok(resolver.second_pass())
}
