//!
//! Norms `K(x, x)` used for cosine normalization
//!
use crate::kernel::kernel;
use crate::params::KernelParams;
use crate::store::SequenceStore;
use crate::substitution::SubstitutionTable;
use rayon::prelude::*;

/// Unnormalized self-similarity `K(s_i, s_i)` of each sequence
pub type Norms = Vec<f64>;

///
/// Compute `K(s_i, s_i)` for every sequence in the store.
///
/// Norms of distinct sequences are independent; with `params.parallel`
/// they are computed with rayon.
///
pub fn compute_norms(
    store: &SequenceStore,
    params: &KernelParams,
    table: &SubstitutionTable,
) -> Norms {
    if params.parallel {
        store
            .sequences()
            .par_iter()
            .map(|s| kernel(s, s, params, table))
            .collect()
    } else {
        store
            .iter()
            .map(|s| kernel(s, s, params, table))
            .collect()
    }
}

///
/// Cosine normalization `k / sqrt(norm_x * norm_y)`.
///
/// Returns `0.0` when the product of norms is not positive (e.g. a sequence
/// shorter than `kn` has norm 0).
///
#[inline]
pub fn normalize(k: f64, norm_x: f64, norm_y: f64) -> f64 {
    let denom = norm_x * norm_y;
    if denom > 0.0 {
        k / denom.sqrt()
    } else {
        0.0
    }
}
