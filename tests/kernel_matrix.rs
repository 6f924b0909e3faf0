//!
//! test of kernel matrix
//!
#[macro_use]
extern crate approx;

use itertools::{iproduct, izip};
use strkernel::prelude::*;
use strkernel::random_seq::generate_many;
use test_case::test_case;

const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

fn identity() -> SubstitutionTable {
    SubstitutionTable::identity(Alphabet::uppercase())
}

/// symmetric non-negative table: 1 on the diagonal, 0.2 within the same
/// hydrophobic/polar group, 0 otherwise
fn grouped() -> SubstitutionTable {
    let hydrophobic = b"AVILMFWC";
    SubstitutionTable::from_fn(Alphabet::uppercase(), |a, b| {
        if a == b {
            1.0
        } else if hydrophobic.contains(&a) == hydrophobic.contains(&b) {
            0.2
        } else {
            0.0
        }
    })
    .unwrap()
}

fn random_store(n: usize, seed: u64) -> SequenceStore {
    let seqs = generate_many(AMINO_ACIDS, n, 1, 15, seed);
    SequenceStore::from_strings(&seqs, Alphabet::uppercase(), 100).unwrap()
}

#[test]
fn end_to_end_aa() {
    let t = identity();
    let p = KernelParams::new(false, 26, 10, 1, 1.0);
    assert_abs_diff_eq!(kernel(b"AA", b"AA", &p, &t), 4.0);
    let p = KernelParams::new(false, 26, 10, 1, 0.5);
    assert_abs_diff_eq!(kernel(b"AA", b"AA", &p, &t), 1.0);

    let o = StringKernel::from_strings(vec!["AA", "AA"], p, t)
        .unwrap()
        .compute()
        .unwrap();
    assert_eq!(o.matrix.to_vec_of_vec(), vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
}

#[test_case(1, 0.5 ; "order 1")]
#[test_case(2, 0.8 ; "order 2")]
#[test_case(3, 1.0 ; "order 3 without decay")]
fn normalized_matrix_properties(kn: usize, lambda: f64) {
    let store = random_store(12, kn as u64);
    let params = KernelParams::new(true, 26, 100, kn, lambda);
    let o = build_matrix(&store, &params, &grouped()).unwrap();
    let m = &o.matrix;
    let norms = o.norms.as_ref().unwrap();

    assert_eq!(m.dim(), 12);
    assert!(m.is_symmetric(0.0));
    for i in 0..m.dim() {
        assert_eq!(m[(i, i)], 1.0);
    }
    // cosine normalization of a positive semi-definite kernel
    for (i, j) in iproduct!(0..m.dim(), 0..m.dim()) {
        assert!(m[(i, j)] <= 1.0 + 1e-9, "K[{}][{}]={}", i, j, m[(i, j)]);
    }
    // norms are the unnormalized self kernels
    for (seq, norm) in izip!(store.iter(), norms.iter()) {
        assert_abs_diff_eq!(kernel(seq, seq, &params, &grouped()), *norm);
    }
}

#[test]
fn normalized_equals_rescaled_unnormalized() {
    let store = random_store(8, 3);
    let table = grouped();
    let p = KernelParams::new(false, 26, 100, 2, 0.7);
    let raw = build_matrix(&store, &p, &table).unwrap().matrix;
    let p = KernelParams::new(true, 26, 100, 2, 0.7);
    let normalized = build_matrix(&store, &p, &table).unwrap().matrix;

    for (i, j) in iproduct!(0..8, 0..8) {
        let expected = if i == j {
            1.0
        } else if raw[(i, i)] > 0.0 && raw[(j, j)] > 0.0 {
            raw[(i, j)] / (raw[(i, i)] * raw[(j, j)]).sqrt()
        } else {
            0.0
        };
        assert_abs_diff_eq!(normalized[(i, j)], expected, epsilon = 1e-12);
    }
}

#[test_case(true ; "normalized")]
#[test_case(false ; "unnormalized")]
fn parallel_equals_sequential(normalize: bool) {
    let store = random_store(20, 7);
    let table = grouped();
    let p = KernelParams::new(normalize, 26, 100, 3, 0.6);
    let seq = build_matrix(&store, &p, &table).unwrap();
    let par = build_matrix(&store, &p.with_parallel(true), &table).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn lambda_monotonicity() {
    let store = random_store(6, 5);
    let table = grouped();
    assert!(table.is_non_negative());
    let mut prev: Option<KernelMatrix> = None;
    for step in 1..=10 {
        let p = KernelParams::new(false, 26, 100, 2, step as f64 / 10.0);
        let m = build_matrix(&store, &p, &table).unwrap().matrix;
        if let Some(prev) = prev {
            for (i, j) in iproduct!(0..6, 0..6) {
                assert!(m[(i, j)] >= prev[(i, j)]);
            }
        }
        prev = Some(m);
    }
}

#[test]
fn order_one_identity_counts_matches() {
    let strings = vec!["ACCA", "CAT", "GGG"];
    let lambda: f64 = 0.9;
    let p = KernelParams::new(false, 26, 100, 1, lambda);
    let m = StringKernel::from_strings(strings.clone(), p, identity())
        .unwrap()
        .compute()
        .unwrap()
        .matrix;
    for (i, j) in iproduct!(0..3, 0..3) {
        let x = strings[i].as_bytes();
        let y = strings[j].as_bytes();
        let n_match = iproduct!(x.iter(), y.iter()).filter(|(a, b)| a == b).count();
        assert_abs_diff_eq!(m[(i, j)], n_match as f64 * lambda * lambda, epsilon = 1e-12);
    }
}

#[test]
fn single_sequence_is_unit_matrix() {
    let p = KernelParams::new(true, 26, 100, 3, 0.5);
    let o = StringKernel::from_strings(vec!["MKVLAAGIV"], p, grouped())
        .unwrap()
        .compute()
        .unwrap();
    assert_eq!(o.matrix.to_vec_of_vec(), vec![vec![1.0]]);
}

#[test]
fn empty_store_fails() {
    let store = SequenceStore::new(Alphabet::uppercase(), 100);
    let e = build_matrix(&store, &KernelParams::default(), &identity()).unwrap_err();
    assert!(matches!(e, KernelError::InvalidState(_)));

    let empty: Vec<&str> = vec![];
    let e = StringKernel::from_strings(empty, KernelParams::default(), identity()).unwrap_err();
    assert!(matches!(e, KernelError::InvalidArgument(_)));
}
