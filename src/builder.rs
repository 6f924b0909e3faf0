//!
//! KernelMatrixBuilder: kernel matrix over all pairs of a sequence store
//!
//! ## Usage
//!
//! ```
//! use strkernel::prelude::*;
//!
//! let params = KernelParams::new(true, 26, 100, 2, 0.5);
//! let table = SubstitutionTable::identity(Alphabet::uppercase());
//! let kernel = StringKernel::from_strings(vec!["ACDE", "ACE", "KLMN"], params, table).unwrap();
//! let output = kernel.compute().unwrap();
//! assert_eq!(output.matrix.dim(), 3);
//! assert_eq!(output.matrix[(0, 0)], 1.0);
//! ```
//!
use crate::error::{KernelError, Result};
use crate::kernel::kernel;
use crate::matrix::KernelMatrix;
use crate::norms::{compute_norms, normalize, Norms};
use crate::params::{DegeneratePolicy, KernelParams};
use crate::store::SequenceStore;
use crate::substitution::SubstitutionTable;
use crate::utils::timer;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::borrow::Cow;

///
/// Result of a kernel computation.
///
/// `norms` holds the unnormalized `K(s_i, s_i)` and is present only when
/// the matrix was normalized.
///
#[derive(Clone, Debug, PartialEq)]
pub struct KernelOutput {
    pub matrix: KernelMatrix,
    pub norms: Option<Norms>,
}

///
/// String kernel over a sequence store.
///
/// The store is either built from raw strings and owned by the kernel
/// (`load_strings`, `from_strings`) or borrowed from the caller
/// (`set_store`, `from_store`).
///
#[derive(Clone, Debug)]
pub struct StringKernel<'a> {
    params: KernelParams,
    table: SubstitutionTable,
    store: Option<Cow<'a, SequenceStore>>,
}

impl<'a> StringKernel<'a> {
    ///
    /// Kernel without sequence data.
    /// Fails if the params are invalid or do not agree with the table.
    ///
    pub fn new(params: KernelParams, table: SubstitutionTable) -> Result<StringKernel<'a>> {
        check_params(&params, &table)?;
        Ok(StringKernel {
            params,
            table,
            store: None,
        })
    }
    ///
    /// Kernel owning a store built from raw strings.
    ///
    pub fn from_strings<I, S>(
        strings: I,
        params: KernelParams,
        table: SubstitutionTable,
    ) -> Result<StringKernel<'a>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut k = StringKernel::new(params, table)?;
        k.load_strings(strings)?;
        Ok(k)
    }
    ///
    /// Kernel borrowing an externally owned store.
    ///
    pub fn from_store(
        store: &'a SequenceStore,
        params: KernelParams,
        table: SubstitutionTable,
    ) -> Result<StringKernel<'a>> {
        let mut k = StringKernel::new(params, table)?;
        k.set_store(store)?;
        Ok(k)
    }
    ///
    /// Build a private store from raw strings, validated against the
    /// alphabet of the table and `params.max_sequence_length`.
    ///
    pub fn load_strings<I, S>(&mut self, strings: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let store = SequenceStore::from_strings(
            strings,
            self.table.alphabet().clone(),
            self.params.max_sequence_length,
        )?;
        self.store = Some(Cow::Owned(store));
        Ok(())
    }
    ///
    /// Use an externally owned store.
    /// Every symbol of its alphabet must be known to the table.
    ///
    pub fn set_store(&mut self, store: &'a SequenceStore) -> Result<()> {
        let alphabet = self.table.alphabet();
        if let Some(&s) = store
            .alphabet()
            .symbols()
            .iter()
            .find(|&&s| !alphabet.contains(s))
        {
            return Err(KernelError::invalid(format!(
                "symbol `{}` of the store is not in the alphabet of the substitution table `{}`",
                s as char, alphabet
            )));
        }
        self.store = Some(Cow::Borrowed(store));
        Ok(())
    }
    pub fn params(&self) -> &KernelParams {
        &self.params
    }
    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }
    pub fn store(&self) -> Option<&SequenceStore> {
        self.store.as_deref()
    }
    /// true if the store was built by `load_strings`
    pub fn owns_store(&self) -> bool {
        matches!(self.store, Some(Cow::Owned(_)))
    }
    ///
    /// Size `N` of the `N x N` kernel
    ///
    pub fn size(&self) -> Result<usize> {
        Ok(self.data()?.size())
    }
    ///
    /// `K(s_i, s_i)` for every sequence
    ///
    pub fn compute_norms(&self) -> Result<Norms> {
        let store = self.data()?;
        check_degenerate(store, &self.params)?;
        Ok(compute_norms(store, &self.params, &self.table))
    }
    ///
    /// Compute the kernel matrix (and the norms when normalizing).
    ///
    pub fn compute(&self) -> Result<KernelOutput> {
        build(self.data()?, &self.params, &self.table)
    }
    fn data(&self) -> Result<&SequenceStore> {
        match self.store.as_deref() {
            None => Err(KernelError::InvalidState("no sequence data has been supplied")),
            Some(store) if store.is_empty() => {
                Err(KernelError::InvalidState("sequence store is empty"))
            }
            Some(store) => Ok(store),
        }
    }
}

///
/// Compute the kernel matrix of `store`.
///
/// * fails with `InvalidState` on an empty store
/// * when `params.normalize`, all norms are computed before any entry;
///   the diagonal is exactly 1 and `K[i][j] = K(s_i, s_j) / sqrt(norm_i norm_j)`
/// * every unordered pair is computed once and written to `[i][j]` and `[j][i]`
///
pub fn build_matrix(
    store: &SequenceStore,
    params: &KernelParams,
    table: &SubstitutionTable,
) -> Result<KernelOutput> {
    if store.is_empty() {
        return Err(KernelError::InvalidState("sequence store is empty"));
    }
    check_params(params, table)?;
    build(store, params, table)
}

fn check_params(params: &KernelParams, table: &SubstitutionTable) -> Result<()> {
    params.validate()?;
    if params.alphabet_size != table.size() {
        return Err(KernelError::invalid(format!(
            "alphabet_size={} but the substitution table is {} x {}",
            params.alphabet_size,
            table.size(),
            table.size()
        )));
    }
    Ok(())
}

///
/// Apply the degenerate policy to sequences shorter than `kn`.
///
fn check_degenerate(store: &SequenceStore, params: &KernelParams) -> Result<()> {
    let kn = params.kn;
    let mut short = store.iter().enumerate().filter(|(_, s)| s.len() < kn);
    match params.degenerate {
        DegeneratePolicy::Reject => match short.next() {
            Some((index, s)) => Err(KernelError::DegenerateInput {
                index,
                length: s.len(),
                kn,
            }),
            None => Ok(()),
        },
        DegeneratePolicy::Zero => {
            let n_short = short.count();
            if n_short > 0 {
                debug!(
                    "{} sequences are shorter than kn={} and score 0",
                    n_short, kn
                );
            }
            Ok(())
        }
    }
}

fn build(
    store: &SequenceStore,
    params: &KernelParams,
    table: &SubstitutionTable,
) -> Result<KernelOutput> {
    check_degenerate(store, params)?;
    let n = store.size();
    info!("computing {}x{} kernel ({})", n, n, params);

    let (output, t) = timer(|| {
        let norms = if params.normalize {
            let norms = compute_norms(store, params, table);
            let n_zero = norms.iter().filter(|&&v| v <= 0.0).count();
            if n_zero > 0 {
                warn!(
                    "{} sequences have non-positive norm; their off-diagonal entries are 0",
                    n_zero
                );
            }
            Some(norms)
        } else {
            None
        };
        let matrix = fill_matrix(store, params, table, norms.as_deref());
        KernelOutput { matrix, norms }
    });

    info!("kernel computed in {}ms", t);
    Ok(output)
}

fn fill_matrix(
    store: &SequenceStore,
    params: &KernelParams,
    table: &SubstitutionTable,
    norms: Option<&[f64]>,
) -> KernelMatrix {
    let n = store.size();
    let mut matrix = KernelMatrix::zeros(n);

    let value = |i: usize, j: usize| -> f64 {
        let k = kernel(store.get(i), store.get(j), params, table);
        match norms {
            Some(norms) => normalize(k, norms[i], norms[j]),
            None => k,
        }
    };
    // with norms the diagonal is fixed to 1 and not recomputed
    let first_col = |i: usize| if norms.is_some() { i + 1 } else { i };
    if norms.is_some() {
        for i in 0..n {
            matrix.set_symmetric(i, i, 1.0);
        }
    }

    if params.parallel {
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (first_col(i)..n).map(move |j| (i, j)))
            .collect();
        let values: Vec<f64> = pairs.par_iter().map(|&(i, j)| value(i, j)).collect();
        for (&(i, j), v) in pairs.iter().zip(values) {
            matrix.set_symmetric(i, j, v);
        }
    } else {
        for i in 0..n {
            for j in first_col(i)..n {
                matrix.set_symmetric(i, j, value(i, j));
            }
        }
    }
    matrix
}

//
// tests
//
