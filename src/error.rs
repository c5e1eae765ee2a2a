//! Error kinds and the diagnostic accumulator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsmError {
    #[error("line {line}: unknown dest mnemonic: {dest:?}")]
    UnknownDest { line: usize, dest: String },

    #[error("line {line}: unknown comp mnemonic: {comp:?}")]
    UnknownComp { line: usize, comp: String },

    #[error("line {line}: unknown jump mnemonic: {jump:?}")]
    UnknownJump { line: usize, jump: String },

    #[error("line {line}: duplicate symbol {name} (already bound to {existing})")]
    DuplicateSymbol {
        line: usize,
        name: String,
        existing: u16,
    },

    #[error("line {line}: invalid syntax: {text}")]
    InvalidSyntax { line: usize, text: String },

    #[error("line {line}: address out of range: {value}")]
    AddressOutOfRange { line: usize, value: String },

    #[error("cannot read source {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AsmError {
    /// Source line the error points at, if it came from a source line.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::UnknownDest { line, .. }
            | AsmError::UnknownComp { line, .. }
            | AsmError::UnknownJump { line, .. }
            | AsmError::DuplicateSymbol { line, .. }
            | AsmError::InvalidSyntax { line, .. }
            | AsmError::AddressOutOfRange { line, .. } => Some(*line),
            AsmError::SourceUnreadable { .. } | AsmError::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AsmError>;

/// Non-fatal errors collected over one assembly run, in the order reported.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<AsmError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it on the log stream.
    pub fn push(&mut self, error: AsmError) {
        log::warn!("{}", error);
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[AsmError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<AsmError> {
        self.errors
    }

    /// Append everything from `other`, which has already been logged.
    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
    }
}
