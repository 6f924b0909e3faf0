//!
//! Gap-weighted subsequence string kernel with soft matching
//!
//! Given N sequences, compute the N x N matrix of pairwise kernel values
//! `K(s_i, s_j)`, optionally cosine normalized.
//!
//! * `kernel`: pairwise dynamic programming of order `kn`
//! * `norms`: self-similarities for normalization
//! * `builder`: the whole matrix over a `SequenceStore`
//!
pub mod alphabet;
pub mod builder;
pub mod common;
pub mod error;
pub mod io;
pub mod kernel;
pub mod matrix;
pub mod norms;
pub mod params;
pub mod prelude;
pub mod random_seq;
pub mod store;
pub mod substitution;
pub mod utils;

#[macro_use]
extern crate approx;
