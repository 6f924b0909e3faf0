//!
//! SequenceStore: ordered collection of sequences over an alphabet
//!
use crate::alphabet::Alphabet;
use crate::common::{sequence_to_string, Sequence, Symbol};
use crate::error::{KernelError, Result};
use log::{debug, warn};

///
/// Uppercase the symbols and drop surrounding whitespace.
///
/// Lowercase symbols are reported with a warning since soft-masked
/// regions lose their masking here.
///
pub fn sanitize(seq: &[Symbol]) -> Sequence {
    let trimmed = trim_ascii(seq);
    let n_lower = trimmed.iter().filter(|c| c.is_ascii_lowercase()).count();
    if n_lower > 0 {
        warn!("{} lowercase symbols detected, converted to uppercase", n_lower);
    }
    trimmed.iter().map(|c| c.to_ascii_uppercase()).collect()
}

fn trim_ascii(seq: &[Symbol]) -> &[Symbol] {
    let start = seq
        .iter()
        .position(|c| !c.is_ascii_whitespace())
        .unwrap_or(seq.len());
    let end = seq
        .iter()
        .rposition(|c| !c.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &seq[start..end]
}

///
/// Ordered collection of validated sequences.
///
/// Every stored sequence consists only of symbols in `alphabet` and is at
/// most `max_length` long.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceStore {
    seqs: Vec<Sequence>,
    alphabet: Alphabet,
    max_length: usize,
}

impl SequenceStore {
    ///
    /// Create an empty store
    ///
    pub fn new(alphabet: Alphabet, max_length: usize) -> SequenceStore {
        SequenceStore {
            seqs: Vec::new(),
            alphabet,
            max_length,
        }
    }
    ///
    /// Build a store from raw strings.
    /// Each string is sanitized and validated against the alphabet.
    ///
    pub fn from_strings<I, S>(
        strings: I,
        alphabet: Alphabet,
        max_length: usize,
    ) -> Result<SequenceStore>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[Symbol]>,
    {
        let mut store = SequenceStore::new(alphabet, max_length);
        for s in strings {
            store.push(sanitize(s.as_ref()))?;
        }
        if store.is_empty() {
            return Err(KernelError::invalid("empty sequence collection"));
        }
        debug!(
            "loaded {} sequences (length {}..={})",
            store.size(),
            store.min_seq_length(),
            store.max_seq_length()
        );
        Ok(store)
    }
    ///
    /// Append a sequence after validation.
    ///
    pub fn push(&mut self, seq: Sequence) -> Result<()> {
        let index = self.seqs.len();
        if seq.len() > self.max_length {
            return Err(KernelError::invalid(format!(
                "sequence #{} has length {} > max_sequence_length {}",
                index,
                seq.len(),
                self.max_length
            )));
        }
        if let Some(position) = seq.iter().position(|&s| !self.alphabet.contains(s)) {
            return Err(KernelError::UnknownSymbol {
                index,
                position,
                symbol: seq[position] as char,
            });
        }
        self.seqs.push(seq);
        Ok(())
    }
    /// the number of sequences `N`
    pub fn size(&self) -> usize {
        self.seqs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }
    /// the i-th sequence
    pub fn get(&self, i: usize) -> &Sequence {
        &self.seqs[i]
    }
    /// iterator over the sequences
    pub fn iter(&self) -> impl Iterator<Item = &Sequence> + '_ {
        self.seqs.iter()
    }
    pub fn sequences(&self) -> &[Sequence] {
        &self.seqs
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    pub fn max_length(&self) -> usize {
        self.max_length
    }
    /// length of the shortest sequence (0 if empty)
    pub fn min_seq_length(&self) -> usize {
        self.seqs.iter().map(|s| s.len()).min().unwrap_or(0)
    }
    /// length of the longest sequence (0 if empty)
    pub fn max_seq_length(&self) -> usize {
        self.seqs.iter().map(|s| s.len()).max().unwrap_or(0)
    }
}

impl std::fmt::Display for SequenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, seq) in self.seqs.iter().enumerate() {
            writeln!(f, "{}\t{}", i, sequence_to_string(seq))?;
        }
        Ok(())
    }
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_test() {
        assert_eq!(sanitize(b"  acDE\r\n"), b"ACDE".to_vec());
        assert_eq!(sanitize(b"   "), Vec::<u8>::new());
        assert_eq!(sanitize(b"KLM"), b"KLM".to_vec());
    }

    #[test]
    fn from_strings() {
        let s = SequenceStore::from_strings(
            vec!["ACD", "efgh", "K"],
            Alphabet::uppercase(),
            10,
        )
        .unwrap();
        assert_eq!(s.size(), 3);
        assert_eq!(s.get(1), &b"EFGH".to_vec());
        assert_eq!(s.min_seq_length(), 1);
        assert_eq!(s.max_seq_length(), 4);
        assert_eq!(s.to_string(), "0\tACD\n1\tEFGH\n2\tK\n");
    }

    #[test]
    fn from_strings_errors() {
        let empty: Vec<&str> = vec![];
        let e = SequenceStore::from_strings(empty, Alphabet::uppercase(), 10).unwrap_err();
        assert!(matches!(e, KernelError::InvalidArgument(_)));

        let e = SequenceStore::from_strings(vec!["ACD", "AC*D"], Alphabet::uppercase(), 10)
            .unwrap_err();
        assert!(matches!(
            e,
            KernelError::UnknownSymbol {
                index: 1,
                position: 2,
                symbol: '*'
            }
        ));

        let e = SequenceStore::from_strings(vec!["ACDEF"], Alphabet::uppercase(), 4).unwrap_err();
        assert!(matches!(e, KernelError::InvalidArgument(_)));
    }

    #[test]
    fn empty_sequence_is_kept() {
        let s = SequenceStore::from_strings(vec!["", "AC"], Alphabet::uppercase(), 10).unwrap();
        assert_eq!(s.size(), 2);
        assert_eq!(s.get(0).len(), 0);
    }
}
