//! Resolved symbol table

use serde::{Deserialize, Serialize};

/// One recovered function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Entry address from the function descriptor (authoritative).
    pub address: u64,
    /// Entry address stored in the function's metadata record, set only when
    /// it disagrees with `address`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_address: Option<u64>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, address: u64) -> Self {
        Self { name: name.into(), address, meta_address: None }
    }

    /// Whether the descriptor and metadata record agree on the address.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.meta_address.is_none()
    }
}

/// Ordered collection of resolved symbols, in function-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    sorted: bool,
}

impl SymbolTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Symbol> {
        self.symbols
    }

    /// Whether addresses are non-decreasing, as the Go linker emits them.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The function whose code contains `address`: the symbol with the
    /// greatest entry address not above it.
    ///
    /// Binary search when the table is sorted, linear scan otherwise.
    #[must_use]
    pub fn lookup(&self, address: u64) -> Option<&Symbol> {
        if self.sorted {
            let idx = self.symbols.partition_point(|s| s.address <= address);
            idx.checked_sub(1).map(|i| &self.symbols[i])
        } else {
            self.symbols.iter().filter(|s| s.address <= address).max_by_key(|s| s.address)
        }
    }

    /// First symbol with exactly this name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Symbols whose metadata record disagrees with the descriptor address.
    pub fn mismatches(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| !s.is_consistent())
    }
}

impl From<Vec<Symbol>> for SymbolTable {
    fn from(symbols: Vec<Symbol>) -> Self {
        let sorted = symbols.windows(2).all(|pair| pair[0].address <= pair[1].address);
        Self { symbols, sorted }
    }
}

impl From<SymbolTable> for Vec<Symbol> {
    fn from(table: SymbolTable) -> Self {
        table.symbols
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl IntoIterator for SymbolTable {
    type Item = Symbol;
    type IntoIter = std::vec::IntoIter<Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.into_iter()
    }
}
