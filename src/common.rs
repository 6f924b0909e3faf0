//!
//! Common types shared by the kernel and its collaborators
//!

/// A symbol of the alphabet (e.g. an amino acid letter `b'A'`)
pub type Symbol = u8;

/// Type of a sequence, an ordered array of alphabet symbols.
pub type Sequence = Vec<Symbol>;

/// Convert Sequence(Vec<u8>) into &str
/// useful in displaying
pub fn sequence_to_string(seq: &[Symbol]) -> &str {
    std::str::from_utf8(seq).unwrap_or("<non-utf8>")
}

///
/// Read access to a sequence.
///
/// The kernel only needs the length and index access, so anything that can
/// be viewed as a slice of symbols implements this.
///
pub trait Seq {
    /// Symbols of this sequence
    fn symbols(&self) -> &[Symbol];
    /// Length `L >= 0`
    fn length(&self) -> usize {
        self.symbols().len()
    }
    /// The symbol at position `k` for `0 <= k < length()`
    fn symbol_at(&self, k: usize) -> Symbol {
        self.symbols()[k]
    }
}

impl<T: AsRef<[Symbol]> + ?Sized> Seq for T {
    fn symbols(&self) -> &[Symbol] {
        self.as_ref()
    }
}

//
// tests
//
