//!
//! Error type of string kernel computation
//!
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, KernelError>;

///
/// Errors raised by the kernel, its parameters and its collaborators
/// (sequence store, substitution table loaders).
///
#[derive(Debug, Error)]
pub enum KernelError {
    /// A matrix or norms were requested before any sequence data was
    /// supplied, or the supplied store is empty.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A parameter or an input collection is not acceptable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A sequence shorter than the subsequence length participates in
    /// scoring and the degenerate policy is `Reject`.
    #[error("sequence #{index} has length {length} < subsequence length {kn}")]
    DegenerateInput {
        index: usize,
        length: usize,
        kn: usize,
    },

    /// A raw sequence contains a symbol outside of the alphabet.
    #[error("unknown symbol `{symbol}` at position {position} of sequence #{index}")]
    UnknownSymbol {
        index: usize,
        position: usize,
        symbol: char,
    },

    /// Malformed text input (substitution matrix file).
    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KernelError {
    /// short-hand of `KernelError::InvalidArgument(msg.to_string())`
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        KernelError::InvalidArgument(msg.into())
    }
}
