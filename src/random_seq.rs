use crate::common::{Sequence, Symbol};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// generate random symbols of given length from seed
///
pub fn generate(symbols: &[Symbol], length: usize, seed: u64) -> Sequence {
    assert!(!symbols.is_empty(), "cannot draw from an empty alphabet");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..length)
        .map(|_| symbols[rng.gen_range(0..symbols.len())])
        .collect()
}

///
/// generate `n` random sequences whose lengths are uniform in
/// `min_length..=max_length`
///
pub fn generate_many(
    symbols: &[Symbol],
    n: usize,
    min_length: usize,
    max_length: usize,
    seed: u64,
) -> Vec<Sequence> {
    assert!(min_length <= max_length);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let length = rng.gen_range(min_length..=max_length);
            generate(symbols, length, rng.gen())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_seq() {
        let s = generate(b"ACDEFGHIKLMNPQRSTVWY", 10, 0);
        assert_eq!(s.len(), 10);
        assert!(s.iter().all(|c| b"ACDEFGHIKLMNPQRSTVWY".contains(c)));
        // deterministic under the same seed
        assert_eq!(s, generate(b"ACDEFGHIKLMNPQRSTVWY", 10, 0));
        assert_ne!(s, generate(b"ACDEFGHIKLMNPQRSTVWY", 10, 1));
    }

    #[test]
    fn random_seqs() {
        let seqs = generate_many(b"AB", 20, 3, 6, 11);
        assert_eq!(seqs.len(), 20);
        assert!(seqs.iter().all(|s| s.len() >= 3 && s.len() <= 6));
        assert_eq!(seqs, generate_many(b"AB", 20, 3, 6, 11));
    }
}
