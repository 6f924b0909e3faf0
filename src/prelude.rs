//!
//! prelude
//!
pub use crate::alphabet::Alphabet;
pub use crate::builder::{build_matrix, KernelOutput, StringKernel};
pub use crate::common::{Seq, Sequence, Symbol};
pub use crate::error::{KernelError, Result};
pub use crate::kernel::{kernel, try_kernel};
pub use crate::matrix::KernelMatrix;
pub use crate::norms::{compute_norms, Norms};
pub use crate::params::{DegeneratePolicy, KernelParams};
pub use crate::store::SequenceStore;
pub use crate::substitution::SubstitutionTable;
