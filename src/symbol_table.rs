// Symbol table shared between the front end and the code generator
//
// Append-ordered by contract: entries keep the order in which names were
// first seen, and an address never changes once assigned.

use indexmap::IndexMap;

/// Default memory address handed to the first symbol.
pub const DEFAULT_BASE_ADDRESS: i64 = 100;

/// Name -> memory address mapping for program variables.
///
/// The table is owned outside the code generator and passed in by `&mut`;
/// generation reads it on every lookup and appends entries when
/// auto-declaration creates a variable.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: IndexMap<String, i64>,
    next_address: i64,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::with_base(DEFAULT_BASE_ADDRESS)
    }

    /// Create a table whose first entry will land at `base`.
    pub fn with_base(base: i64) -> Self {
        SymbolTable {
            entries: IndexMap::new(),
            next_address: base,
        }
    }

    /// Look up the memory address assigned to `name`.
    pub fn lookup(&self, name: &str) -> Option<i64> {
        self.entries.get(name).copied()
    }

    /// Assign the next free address to `name` and return it.
    ///
    /// Inserting a name that is already present returns its existing
    /// address unchanged; addresses are stable for the rest of compilation.
    pub fn insert(&mut self, name: &str) -> i64 {
        if let Some(address) = self.lookup(name) {
            return address;
        }
        let address = self.next_address;
        self.entries.insert(name.to_string(), address);
        self.next_address += 1;
        address
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order names were first declared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, addr)| (name.as_str(), *addr))
    }
}
