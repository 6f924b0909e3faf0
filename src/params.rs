//!
//! Parameters of the string kernel
//!
use crate::error::{KernelError, Result};
use log::warn;
use serde::{Deserialize, Serialize};

///
/// What to do with a pair in which one sequence is shorter than `kn`.
///
/// No subsequence of length `kn` can be shared in that case, so the
/// recurrence has nothing to emit.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// the pair scores `0.0`
    Zero,
    /// the computation fails with `KernelError::DegenerateInput`
    Reject,
}

impl Default for DegeneratePolicy {
    fn default() -> Self {
        DegeneratePolicy::Zero
    }
}

///
/// KernelParams
///
/// * `normalize`
///     divide `K(x,y)` by `sqrt(K(x,x) K(y,y))` so that the diagonal is 1
/// * `alphabet_size`
///     number of symbols the substitution table is defined on
/// * `max_sequence_length`
///     longest sequence accepted when loading raw strings
/// * `kn`
///     subsequence length (order of the kernel), `kn >= 1`
/// * `lambda`
///     gap decay, typically in `(0, 1]`
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelParams {
    pub normalize: bool,
    pub alphabet_size: usize,
    pub max_sequence_length: usize,
    pub kn: usize,
    pub lambda: f64,
    pub degenerate: DegeneratePolicy,
    /// compute norms and pairs with rayon
    pub parallel: bool,
}

impl KernelParams {
    pub fn new(
        normalize: bool,
        alphabet_size: usize,
        max_sequence_length: usize,
        kn: usize,
        lambda: f64,
    ) -> KernelParams {
        KernelParams {
            normalize,
            alphabet_size,
            max_sequence_length,
            kn,
            lambda,
            degenerate: DegeneratePolicy::Zero,
            parallel: false,
        }
    }
    pub fn with_degenerate(mut self, degenerate: DegeneratePolicy) -> KernelParams {
        self.degenerate = degenerate;
        self
    }
    pub fn with_parallel(mut self, parallel: bool) -> KernelParams {
        self.parallel = parallel;
        self
    }
    ///
    /// Check the parameters.
    ///
    /// `lambda > 1` is accepted (contributions grow with the gap length
    /// instead of decaying) but reported with a warning.
    ///
    pub fn validate(&self) -> Result<()> {
        if self.kn < 1 {
            return Err(KernelError::invalid("subsequence length kn must be >= 1"));
        }
        if !self.lambda.is_finite() || self.lambda <= 0.0 {
            return Err(KernelError::invalid(format!(
                "gap decay lambda must be a finite positive number, got {}",
                self.lambda
            )));
        }
        if self.alphabet_size == 0 {
            return Err(KernelError::invalid("alphabet_size must be >= 1"));
        }
        if self.max_sequence_length == 0 {
            return Err(KernelError::invalid("max_sequence_length must be >= 1"));
        }
        if self.lambda > 1.0 {
            warn!(
                "lambda={} > 1: gapped matches are amplified, scores may overflow",
                self.lambda
            );
        }
        Ok(())
    }
    ///
    /// load params from JSON file
    ///
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<KernelParams> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let params: KernelParams = serde_json::from_reader(reader)?;
        Ok(params)
    }
    ///
    /// save params as JSON file
    ///
    pub fn to_json_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        Ok(())
    }
}

/// normalized kernel over `A..Z` with `kn=2`, `lambda=0.5`
impl Default for KernelParams {
    fn default() -> Self {
        KernelParams::new(true, 26, 10_000, 2, 0.5)
    }
}

impl std::fmt::Display for KernelParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "normalize={} alphabet_size={} max_sequence_length={} kn={} lambda={} degenerate={:?} parallel={}",
            self.normalize,
            self.alphabet_size,
            self.max_sequence_length,
            self.kn,
            self.lambda,
            self.degenerate,
            self.parallel,
        )
    }
}

//
// tests
//
