//! Two-pass assembler for the Hack machine language.
//!
//! Raw lines go through the [`sanitizer`], then the [`resolver`] binds labels
//! (pass 1) and rewrites symbolic operands (pass 2), and the [`encoder`] turns
//! each resolved instruction into a 16-bit [`Word`]. Malformed input never stops
//! a run: it is reported as a diagnostic and every instruction still yields a
//! word. Only an unreadable source is fatal.
//!
//! ```
//! let asm = hack_asm::assemble("(LOOP)\n@LOOP\n0;JMP\n");
//! assert_eq!(asm.to_hack(), "0000000000000000\n1110101010000111\n");
//! assert_eq!(asm.symbols.lookup("LOOP"), Some(0));
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod parser;
pub mod resolver;
pub mod sanitizer;
pub mod symbols;
pub mod writer;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use encoder::Word;
use error::{AsmError, Result};
use resolver::Resolution;
use sanitizer::sanitize;
use symbols::SymbolTable;

/// Result of one assembly run.
#[derive(Debug)]
pub struct Assembly {
    /// One word per instruction, in ROM order.
    pub words: Vec<Word>,
    /// Final symbol table, for reporting.
    pub symbols: SymbolTable,
    /// Non-fatal errors, in the order they were found.
    pub diagnostics: Vec<AsmError>,
}

impl Assembly {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Output file contents: one 16-character line per word.
    pub fn to_hack(&self) -> String {
        writer::render(&self.words)
    }
}

fn finish(resolution: Resolution) -> Assembly {
    let Resolution {
        instructions,
        symbols,
        mut diagnostics,
    } = resolution;

    let (words, encode_diagnostics) = encoder::encode_all(&instructions);
    diagnostics.extend(encode_diagnostics);

    log::info!(
        "assembled {} words, {} symbols, {} diagnostics",
        words.len(),
        symbols.len(),
        diagnostics.len()
    );

    Assembly {
        words,
        symbols,
        diagnostics: diagnostics.into_errors(),
    }
}

/// Assemble Hack assembly source held in memory
pub fn assemble(source: &str) -> Assembly {
    finish(resolver::resolve(source.lines(), sanitize))
}

/// Assemble from any line source. A read failure aborts the run.
pub fn assemble_reader<R: BufRead>(reader: R) -> Result<Assembly> {
    Ok(finish(resolver::resolve_reader(reader, sanitize)?))
}

/// Assemble the file at `path`.
pub fn assemble_file(path: &Path) -> Result<Assembly> {
    let file = File::open(path).map_err(|source| AsmError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("assembling {}", path.display());
    assemble_reader(BufReader::new(file))
}
