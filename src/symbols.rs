use phf::phf_map;
use std::collections::HashMap;

use crate::parser::MAX_ADDRESS;

/// Predefined symbols (compile-time perfect hash map)
pub static PREDEFINED: phf::Map<&'static str, u16> = phf_map! {
    "R0" => 0, "R1" => 1, "R2" => 2, "R3" => 3,
    "R4" => 4, "R5" => 5, "R6" => 6, "R7" => 7,
    "R8" => 8, "R9" => 9, "R10" => 10, "R11" => 11,
    "R12" => 12, "R13" => 13, "R14" => 14, "R15" => 15,
    "SP" => 0, "LCL" => 1, "ARG" => 2, "THIS" => 3, "THAT" => 4,
    "SCREEN" => 16384, "KBD" => 24576,
};

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SymbolKind {
    Predefined,
    Label,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub address: u16,
    pub kind: SymbolKind,
}

/// Name to address mapping for one assembly run.
///
/// Seeded with the predefined names; only grows afterwards.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    next_var_address: u16,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut symbols = HashMap::with_capacity(64);
        for (&name, &address) in PREDEFINED.entries() {
            symbols.insert(
                name.to_string(),
                Symbol {
                    address,
                    kind: SymbolKind::Predefined,
                },
            );
        }
        Self {
            symbols,
            next_var_address: VARIABLE_BASE,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).map(|s| s.address)
    }

    /// Bind a label to a ROM address. An existing binding is kept and returned.
    pub fn insert_label(&mut self, name: &str, address: u16) -> Result<(), Symbol> {
        if let Some(&existing) = self.symbols.get(name) {
            return Err(existing);
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                address,
                kind: SymbolKind::Label,
            },
        );
        Ok(())
    }

    /// Resolve a symbol, binding it to the next free variable address if unseen.
    ///
    /// Returns `None` once the 15-bit address space is used up; the name is
    /// left unbound.
    pub fn get_or_allocate(&mut self, name: &str) -> Option<u16> {
        if let Some(address) = self.lookup(name) {
            return Some(address);
        }

        let address = self.next_var_address;
        if address > MAX_ADDRESS {
            return None;
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                address,
                kind: SymbolKind::Variable,
            },
        );
        self.next_var_address += 1;
        log::trace!("variable {} -> {}", name, address);
        Some(address)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn count(&self, kind: SymbolKind) -> usize {
        self.symbols.values().filter(|s| s.kind == kind).count()
    }

    /// Entries ordered by address, then name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Symbol)> {
        let mut entries: Vec<_> = self
            .symbols
            .iter()
            .map(|(name, &symbol)| (name.as_str(), symbol))
            .collect();
        entries.sort_by(|a, b| a.1.address.cmp(&b.1.address).then_with(|| a.0.cmp(b.0)));
        entries.into_iter()
    }
}
