//!
//! Alphabet: explicit mapping between symbols and dense indices
//!
//! Substitution tables are addressed by `(index(a), index(b))`, so the
//! mapping is part of the configuration instead of arithmetic on character
//! codes.
//!
use crate::common::Symbol;
use crate::error::{KernelError, Result};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Marker of a byte that is not in the alphabet
const NOT_IN_ALPHABET: u8 = u8::MAX;

///
/// Ordered set of symbols with a 256-entry reverse lookup.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    lookup: Vec<u8>,
}

impl Alphabet {
    ///
    /// Build an alphabet from distinct printable ascii symbols.
    /// The index of a symbol is its position in `symbols`.
    ///
    pub fn new(symbols: &[Symbol]) -> Result<Alphabet> {
        if symbols.is_empty() {
            return Err(KernelError::invalid("alphabet must not be empty"));
        }
        if symbols.len() >= NOT_IN_ALPHABET as usize {
            return Err(KernelError::invalid(format!(
                "alphabet of size {} is too large",
                symbols.len()
            )));
        }
        let mut lookup = vec![NOT_IN_ALPHABET; 256];
        for (i, &s) in symbols.iter().enumerate() {
            if !s.is_ascii_graphic() {
                return Err(KernelError::invalid(format!(
                    "symbol 0x{:02x} in alphabet is not a printable ascii character",
                    s
                )));
            }
            if lookup[s as usize] != NOT_IN_ALPHABET {
                return Err(KernelError::invalid(format!(
                    "duplicated symbol `{}` in alphabet",
                    s as char
                )));
            }
            lookup[s as usize] = i as u8;
        }
        Ok(Alphabet {
            symbols: symbols.to_vec(),
            lookup,
        })
    }
    ///
    /// Uppercase latin letters `A..=Z` mapped to `0..26`.
    ///
    pub fn uppercase() -> Alphabet {
        let symbols: Vec<Symbol> = (b'A'..=b'Z').collect();
        Alphabet::new(&symbols).expect("A..Z is a valid alphabet")
    }
    /// the number of symbols
    pub fn size(&self) -> usize {
        self.symbols.len()
    }
    /// index of the symbol, or None if it is not in the alphabet
    #[inline]
    pub fn index(&self, symbol: Symbol) -> Option<usize> {
        match self.lookup[symbol as usize] {
            NOT_IN_ALPHABET => None,
            i => Some(i as usize),
        }
    }
    /// check if the symbol is in the alphabet
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.index(symbol).is_some()
    }
    /// symbol at the index
    pub fn symbol(&self, index: usize) -> Symbol {
        self.symbols[index]
    }
    /// all symbols in index order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::uppercase()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.symbols))
    }
}

impl TryFrom<String> for Alphabet {
    type Error = KernelError;
    fn try_from(s: String) -> Result<Self> {
        Alphabet::new(s.as_bytes())
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.to_string()
    }
}

//
// tests
//
