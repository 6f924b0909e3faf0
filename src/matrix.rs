//!
//! KernelMatrix: dense symmetric N x N matrix of kernel values
//!
use crate::error::{KernelError, Result};
use itertools::Itertools;
use ndarray::{Array2, ArrayView1};
use std::io::Write;
use std::ops::Index;

///
/// Dense kernel matrix backed by `ndarray::Array2<f64>`.
///
/// Only the builder fills it, always writing `[i, j]` and `[j, i]` together,
/// so a matrix obtained from `StringKernel::compute` is symmetric.
///
#[derive(Clone, Debug, PartialEq)]
pub struct KernelMatrix {
    values: Array2<f64>,
}

impl KernelMatrix {
    /// N x N matrix filled with zeros
    pub(crate) fn zeros(n: usize) -> KernelMatrix {
        KernelMatrix {
            values: Array2::zeros((n, n)),
        }
    }
    ///
    /// Wrap an existing square array (e.g. a matrix read back from disk)
    ///
    pub fn from_array(values: Array2<f64>) -> Result<KernelMatrix> {
        let (n_rows, n_cols) = values.dim();
        if n_rows != n_cols {
            return Err(KernelError::invalid(format!(
                "kernel matrix must be square, got {} x {}",
                n_rows, n_cols
            )));
        }
        Ok(KernelMatrix { values })
    }
    /// Set `[i, j]` and `[j, i]` to `value`
    #[inline]
    pub(crate) fn set_symmetric(&mut self, i: usize, j: usize, value: f64) {
        self.values[[i, j]] = value;
        self.values[[j, i]] = value;
    }
    /// the number of rows (= columns) N
    pub fn dim(&self) -> usize {
        self.values.nrows()
    }
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }
    /// i-th row `K(s_i, s_*)`
    pub fn row(&self, i: usize) -> ArrayView1<f64> {
        self.values.row(i)
    }
    /// diagonal `K(s_i, s_i)`
    pub fn diag(&self) -> Vec<f64> {
        self.values.diag().to_vec()
    }
    pub fn to_vec_of_vec(&self) -> Vec<Vec<f64>> {
        self.values.outer_iter().map(|row| row.to_vec()).collect()
    }
    /// `|K[i,j] - K[j,i]| <= epsilon` for all `i, j`
    pub fn is_symmetric(&self, epsilon: f64) -> bool {
        let n = self.dim();
        (0..n).all(|i| (0..i).all(|j| abs_diff_eq!(self.get(i, j), self.get(j, i), epsilon = epsilon)))
    }
}

impl Index<(usize, usize)> for KernelMatrix {
    type Output = f64;
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.values[[i, j]]
    }
}

///
/// Writers
///
impl KernelMatrix {
    ///
    /// Tab separated rows
    ///
    pub fn to_tsv_writer<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for row in self.values.outer_iter() {
            writeln!(writer, "{}", row.iter().join("\t"))?;
        }
        Ok(())
    }
    ///
    /// LIBSVM precomputed kernel format
    ///
    /// `<label> 0:<i+1> 1:K(i,0) 2:K(i,1) ...`
    ///
    /// with label `0` for every row if `labels` is not given.
    ///
    pub fn to_libsvm_writer<W: Write>(
        &self,
        mut writer: W,
        labels: Option<&[f64]>,
    ) -> std::io::Result<()> {
        for (i, row) in self.values.outer_iter().enumerate() {
            let label = labels.and_then(|l| l.get(i)).copied().unwrap_or(0.0);
            write!(writer, "{} 0:{}", label, i + 1)?;
            for (j, v) in row.iter().enumerate() {
                write!(writer, " {}:{}", j + 1, v)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for KernelMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.values.outer_iter() {
            writeln!(f, "{}", row.iter().map(|v| format!("{:.6}", v)).join("\t"))?;
        }
        Ok(())
    }
}

//
// tests
//
