//!
//! Substitution table: soft-match score of a pair of symbols
//!
//! ## Text format
//!
//! NCBI-style matrix files (as distributed for BLOSUM/PAM) are accepted:
//!
//! ```text
//! # comment
//!    A  R  N
//! A  4 -1 -2
//! R -1  5  0
//! N -2  0  6
//! ```
//!
//! Symbols missing from the alphabet are skipped and pairs missing from the
//! file score `0.0`.
//!
use crate::alphabet::Alphabet;
use crate::common::Symbol;
use crate::error::{KernelError, Result};
use std::io::BufRead;

///
/// Dense `size x size` table of scores in row-major order,
/// addressed through the alphabet.
///
#[derive(Clone, Debug, PartialEq)]
pub struct SubstitutionTable {
    alphabet: Alphabet,
    scores: Vec<f64>,
}

impl SubstitutionTable {
    ///
    /// Constructor from a row-major score vector of length `size * size`.
    ///
    pub fn new(alphabet: Alphabet, scores: Vec<f64>) -> Result<SubstitutionTable> {
        let n = alphabet.size();
        if scores.len() != n * n {
            return Err(KernelError::invalid(format!(
                "substitution table of alphabet size {} needs {} scores, got {}",
                n,
                n * n,
                scores.len()
            )));
        }
        if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
            return Err(KernelError::invalid(format!(
                "substitution score ({}, {}) is not finite",
                alphabet.symbol(i / n) as char,
                alphabet.symbol(i % n) as char,
            )));
        }
        Ok(SubstitutionTable { alphabet, scores })
    }
    ///
    /// Constructor from rows, `rows[i][j]` is the score of
    /// `(alphabet.symbol(i), alphabet.symbol(j))`.
    ///
    pub fn from_rows(alphabet: Alphabet, rows: &[Vec<f64>]) -> Result<SubstitutionTable> {
        let n = alphabet.size();
        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(KernelError::invalid(format!(
                "substitution table must be {} x {}",
                n, n
            )));
        }
        SubstitutionTable::new(alphabet, rows.concat())
    }
    ///
    /// Fill the table with a scoring function of two symbols.
    ///
    pub fn from_fn<F>(alphabet: Alphabet, f: F) -> Result<SubstitutionTable>
    where
        F: Fn(Symbol, Symbol) -> f64,
    {
        let mut scores = Vec::with_capacity(alphabet.size() * alphabet.size());
        for &a in alphabet.symbols() {
            for &b in alphabet.symbols() {
                scores.push(f(a, b));
            }
        }
        SubstitutionTable::new(alphabet, scores)
    }
    ///
    /// Hard matching: 1 for equal symbols, 0 otherwise.
    ///
    pub fn identity(alphabet: Alphabet) -> SubstitutionTable {
        let n = alphabet.size();
        let mut scores = vec![0.0; n * n];
        for i in 0..n {
            scores[i * n + i] = 1.0;
        }
        SubstitutionTable { alphabet, scores }
    }
    ///
    /// Parse NCBI-style matrix text.
    ///
    pub fn from_reader<R: BufRead>(alphabet: Alphabet, reader: R) -> Result<SubstitutionTable> {
        let n = alphabet.size();
        let mut scores = vec![0.0; n * n];
        let mut header: Option<Vec<Symbol>> = None;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let tokens: Vec<&str> = trimmed.split_whitespace().collect();

            let columns = match &header {
                None => {
                    let symbols = tokens
                        .iter()
                        .map(|t| parse_symbol(t, line_no))
                        .collect::<Result<Vec<Symbol>>>()?;
                    header = Some(symbols);
                    continue;
                }
                Some(columns) => columns,
            };

            let row_symbol = parse_symbol(tokens[0], line_no)?;
            let values = &tokens[1..];
            if values.len() != columns.len() {
                return Err(KernelError::Parse {
                    line: line_no,
                    msg: format!(
                        "row `{}` has {} scores, header has {} symbols",
                        row_symbol as char,
                        values.len(),
                        columns.len()
                    ),
                });
            }
            let row = match alphabet.index(row_symbol) {
                Some(row) => row,
                None => continue,
            };
            for (&col_symbol, value) in columns.iter().zip(values.iter()) {
                let score: f64 = value.parse().map_err(|_| KernelError::Parse {
                    line: line_no,
                    msg: format!("invalid score `{}`", value),
                })?;
                if let Some(col) = alphabet.index(col_symbol) {
                    scores[row * n + col] = score;
                }
            }
        }

        if header.is_none() {
            return Err(KernelError::Parse {
                line: 0,
                msg: "no header row found".to_string(),
            });
        }
        SubstitutionTable::new(alphabet, scores)
    }
    ///
    /// Parse NCBI-style matrix file with `from_reader`
    ///
    pub fn from_file<P: AsRef<std::path::Path>>(
        alphabet: Alphabet,
        path: P,
    ) -> Result<SubstitutionTable> {
        let file = std::fs::File::open(path)?;
        SubstitutionTable::from_reader(alphabet, std::io::BufReader::new(file))
    }
    ///
    /// Write the table in the text format accepted by `from_reader`
    ///
    pub fn to_writer<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        let n = self.size();
        for &b in self.alphabet.symbols() {
            write!(writer, "\t{}", b as char)?;
        }
        writeln!(writer)?;
        for i in 0..n {
            write!(writer, "{}", self.alphabet.symbol(i) as char)?;
            for j in 0..n {
                write!(writer, "\t{}", self.scores[i * n + j])?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Accessors
impl SubstitutionTable {
    ///
    /// Soft-match score of `(a, b)`.
    /// Symbols outside of the alphabet score `0.0`.
    ///
    #[inline]
    pub fn score(&self, a: Symbol, b: Symbol) -> f64 {
        match (self.alphabet.index(a), self.alphabet.index(b)) {
            (Some(i), Some(j)) => self.scores[i * self.size() + j],
            _ => 0.0,
        }
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    /// alphabet size
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }
    /// `score(a, b) == score(b, a)` for all pairs
    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..i).all(|j| self.scores[i * n + j] == self.scores[j * n + i]))
    }
    /// all scores are `>= 0`
    pub fn is_non_negative(&self) -> bool {
        self.scores.iter().all(|&s| s >= 0.0)
    }
}

fn parse_symbol(token: &str, line: usize) -> Result<Symbol> {
    match token.as_bytes() {
        [s] => Ok(*s),
        _ => Err(KernelError::Parse {
            line,
            msg: format!("`{}` is not a single symbol", token),
        }),
    }
}

//
// tests
//
