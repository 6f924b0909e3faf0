//!
//! Pairwise gap-weighted subsequence kernel with soft matching
//!
//! # Recurrence
//!
//! x = x[0],...,x[n-1] and y = y[0],...,y[m-1]
//!
//! K'_i[j][k] is the kernel of order i between the prefixes x[0:j] and
//! y[0:k], in which each subsequence is weighted by lambda to the power of
//! the distance from its first symbol to the end of the prefixes.
//!
//! K'_0 = 1 everywhere (the empty subsequence).
//! For i >= 1, keeping a running K''
//!
//! K''[j][k] = lambda K''[j][k-1] + [x[j-1] == y[k-1]] lambda^2 K'_{i-1}[j-1][k-1]
//! K'_i[j][k] = lambda K'_i[j-1][k] + K''[j][k]
//!
//! The score of order kn is emitted with the soft match
//!
//! K(x,y) = sum_{i >= kn, j >= kn} lambda^2 S(x[i-1], y[j-1]) K'_{kn-1}[i-1][j-1]
//!
//! Intermediate orders use exact symbol equality; the substitution table `S`
//! only weights the last aligned pair of each subsequence.
//!
use crate::common::Seq;
use crate::error::Result;
use crate::params::KernelParams;
use crate::substitution::SubstitutionTable;
use std::ops::{Index, IndexMut};

///
/// Dense `n_rows x n_cols` table of `f64` in row-major order.
///
/// Scratch memory of a single `kernel` call.
///
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DpTable {
    n_cols: usize,
    values: Vec<f64>,
}

impl DpTable {
    /// Create a table filled with `value`
    pub(crate) fn new(n_rows: usize, n_cols: usize, value: f64) -> DpTable {
        DpTable {
            n_cols,
            values: vec![value; n_rows * n_cols],
        }
    }
}

impl Index<(usize, usize)> for DpTable {
    type Output = f64;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.values[row * self.n_cols + col]
    }
}

impl IndexMut<(usize, usize)> for DpTable {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.values[row * self.n_cols + col]
    }
}

///
/// A pair is degenerate if either sequence is shorter than `kn`:
/// no subsequence of length `kn` can be shared.
///
pub fn is_degenerate(x_len: usize, y_len: usize, kn: usize) -> bool {
    kn > x_len || kn > y_len
}

///
/// `kernel` after checking the params with `KernelParams::validate`.
///
pub fn try_kernel<X, Y>(
    x: &X,
    y: &Y,
    params: &KernelParams,
    table: &SubstitutionTable,
) -> Result<f64>
where
    X: Seq + ?Sized,
    Y: Seq + ?Sized,
{
    params.validate()?;
    Ok(kernel(x, y, params, table))
}

///
/// Kernel value `K(x, y)` of order `params.kn` with gap decay `params.lambda`.
///
/// Degenerate pairs (see `is_degenerate`) score `0.0`.
/// The result is symmetric in `x` and `y` when `table` is symmetric.
///
/// The params are not validated here; `try_kernel`, `StringKernel` and
/// `build_matrix` do.
///
/// # Panics
/// Panics if `params.kn == 0`.
///
pub fn kernel<X, Y>(x: &X, y: &Y, params: &KernelParams, table: &SubstitutionTable) -> f64
where
    X: Seq + ?Sized,
    Y: Seq + ?Sized,
{
    let x = x.symbols();
    let y = y.symbols();
    let kn = params.kn;
    let lambda = params.lambda;
    assert!(kn >= 1, "subsequence length kn must be >= 1");

    if is_degenerate(x.len(), y.len(), kn) {
        return 0.0;
    }
    let lx = x.len();
    let ly = y.len();

    // order 0 is stored in `even`, order 1 in `odd`, and so on.
    let mut even = DpTable::new(lx + 1, ly + 1, 1.0);
    let mut odd = DpTable::new(lx + 1, ly + 1, 0.0);

    for i in 1..kn {
        let (cur, prev) = if i % 2 == 0 {
            (&mut even, &odd)
        } else {
            (&mut odd, &even)
        };

        // prefixes of length i-1 cannot hold a subsequence of length i
        for j in (i - 1)..lx {
            cur[(j, i - 1)] = 0.0;
        }
        for k in (i - 1)..ly {
            cur[(i - 1, k)] = 0.0;
        }

        for j in i..lx {
            let mut kdd = 0.0;
            for k in i..ly {
                if x[j - 1] == y[k - 1] {
                    kdd = lambda * (kdd + lambda * prev[(j - 1, k - 1)]);
                } else {
                    kdd *= lambda;
                }
                cur[(j, k)] = lambda * cur[(j - 1, k)] + kdd;
            }
        }
    }

    let last = if (kn - 1) % 2 == 0 { &even } else { &odd };
    let lambda2 = lambda * lambda;
    let mut sum = 0.0;
    for i in kn..=lx {
        for j in kn..=ly {
            sum += lambda2 * table.score(x[i - 1], y[j - 1]) * last[(i - 1, j - 1)];
        }
    }
    sum
}

//
// tests
//
