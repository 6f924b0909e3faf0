//!
//! Reading sequences and writing kernel matrices
//!
//! * FASTA (optionally gzipped, detected by the `.gz` extension)
//! * plain text, one sequence per line
//! * kernel output as TSV, JSON or LIBSVM precomputed kernel
//!
use crate::builder::KernelOutput;
use crate::common::Sequence;
use crate::error::{KernelError, Result};
use bio::io::fasta;
use flate2::bufread::GzDecoder;
use log::info;
use serde::Serialize;
use std::io::{BufRead, Read, Write};
use std::path::Path;
use std::str::FromStr;

///
/// Named sequences read from a file
///
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Records {
    pub ids: Vec<String>,
    pub seqs: Vec<Sequence>,
}

impl Records {
    pub fn len(&self) -> usize {
        self.seqs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }
}

///
/// parse FASTA records from a reader
///
pub fn parse_fasta_reader<R: Read>(reader: R) -> Result<Records> {
    let mut records = Records::default();
    for result in fasta::Reader::new(reader).records() {
        let record = result?;
        records.ids.push(record.id().to_string());
        records.seqs.push(record.seq().to_vec());
    }
    Ok(records)
}

///
/// parse one sequence per non-empty line; ids are the line numbers
///
pub fn parse_lines_reader<R: BufRead>(reader: R) -> Result<Records> {
    let mut records = Records::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let seq = line.trim();
        if seq.is_empty() {
            continue;
        }
        records.ids.push(format!("{}", i + 1));
        records.seqs.push(seq.as_bytes().to_vec());
    }
    Ok(records)
}

fn is_fasta_name(name: &str) -> bool {
    [".fa", ".fasta", ".faa", ".fna", ".fas"]
        .iter()
        .any(|ext| name.ends_with(ext))
}

///
/// Read sequences from a file.
///
/// `*.fa`, `*.fasta`, `*.faa`, `*.fna` and `*.fas` (with optional `.gz`) are
/// parsed as FASTA, anything else as one sequence per line.
///
pub fn read_sequences<P: AsRef<Path>>(path: P) -> Result<Records> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let name = path.to_string_lossy().to_string();
    let (gzipped, stem) = match name.strip_suffix(".gz") {
        Some(stem) => (true, stem.to_string()),
        None => (false, name.clone()),
    };

    let records = match (gzipped, is_fasta_name(&stem)) {
        (true, true) => parse_fasta_reader(GzDecoder::new(reader))?,
        (true, false) => parse_lines_reader(std::io::BufReader::new(GzDecoder::new(reader)))?,
        (false, true) => parse_fasta_reader(reader)?,
        (false, false) => parse_lines_reader(reader)?,
    };
    info!("read {} sequences from {}", records.len(), name);
    Ok(records)
}

///
/// Output format of the kernel
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// tab separated matrix rows
    Tsv,
    /// `{"ids": [...], "matrix": [[...]], "norms": [...]}`
    Json,
    /// LIBSVM precomputed kernel
    Libsvm,
}

impl FromStr for OutputFormat {
    type Err = KernelError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            "libsvm" => Ok(OutputFormat::Libsvm),
            _ => Err(KernelError::invalid(format!(
                "unknown output format `{}` (tsv, json or libsvm)",
                s
            ))),
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    ids: &'a [String],
    matrix: Vec<Vec<f64>>,
    norms: Option<&'a [f64]>,
}

///
/// Write the kernel output in the given format
///
pub fn write_output<W: Write>(
    mut writer: W,
    output: &KernelOutput,
    ids: &[String],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => output.matrix.to_tsv_writer(&mut writer)?,
        OutputFormat::Libsvm => output.matrix.to_libsvm_writer(&mut writer, None)?,
        OutputFormat::Json => {
            let json = JsonOutput {
                ids,
                matrix: output.matrix.to_vec_of_vec(),
                norms: output.norms.as_deref(),
            };
            serde_json::to_writer(&mut writer, &json)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

///
/// Create a file and write the kernel output with `write_output`
///
pub fn write_output_file<P: AsRef<Path>>(
    path: P,
    output: &KernelOutput,
    ids: &[String],
    format: OutputFormat,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_output(&mut writer, output, ids, format)?;
    writer.flush()?;
    Ok(())
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::KernelMatrix;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use ndarray::array;

    #[test]
    fn parse_fasta_test() {
        let text = b">s1 first\nACDE\nFG\n>s2\nKLM\n";
        let r = parse_fasta_reader(&text[..]).unwrap();
        assert_eq!(r.ids, vec!["s1".to_string(), "s2".to_string()]);
        assert_eq!(r.seqs, vec![b"ACDEFG".to_vec(), b"KLM".to_vec()]);
    }

    #[test]
    fn parse_lines_test() {
        let text = "ACDE\n\n  KLM \n";
        let r = parse_lines_reader(text.as_bytes()).unwrap();
        assert!(!r.is_empty());
        assert_eq!(r.ids, vec!["1".to_string(), "3".to_string()]);
        assert_eq!(r.seqs, vec![b"ACDE".to_vec(), b"KLM".to_vec()]);

        let r = parse_lines_reader("\n  \n".as_bytes()).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn read_sequences_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let fa = dir.path().join("seqs.fa");
        std::fs::write(&fa, ">a\nAC\n>b\nDE\n").unwrap();
        let r = read_sequences(&fa).unwrap();
        assert_eq!(r.ids, vec!["a".to_string(), "b".to_string()]);

        let gz = dir.path().join("seqs.fa.gz");
        let mut e = GzEncoder::new(std::fs::File::create(&gz).unwrap(), Compression::default());
        e.write_all(b">x\nKLM\n").unwrap();
        e.finish().unwrap();
        let r = read_sequences(&gz).unwrap();
        assert_eq!(r.seqs, vec![b"KLM".to_vec()]);

        let txt = dir.path().join("seqs.txt");
        std::fs::write(&txt, "AC\nDE\n").unwrap();
        let r = read_sequences(&txt).unwrap();
        assert_eq!(r.len(), 2);

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "\n").unwrap();
        assert!(read_sequences(&empty).unwrap().is_empty());

        assert!(matches!(
            read_sequences(dir.path().join("missing.fa")),
            Err(KernelError::Io(_))
        ));
    }

    #[test]
    fn output_format() {
        assert_eq!("tsv".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("libsvm".parse::<OutputFormat>().unwrap(), OutputFormat::Libsvm);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn write_json() {
        let output = KernelOutput {
            matrix: KernelMatrix::from_array(array![[1.0, 0.5], [0.5, 1.0]]).unwrap(),
            norms: Some(vec![4.0, 2.0]),
        };
        let ids = vec!["a".to_string(), "b".to_string()];
        let mut buf = Vec::new();
        write_output(&mut buf, &output, &ids, OutputFormat::Json).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"ids\":[\"a\",\"b\"],\"matrix\":[[1.0,0.5],[0.5,1.0]],\"norms\":[4.0,2.0]}\n"
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k.tsv");
        write_output_file(&path, &output, &ids, OutputFormat::Tsv).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\t0.5\n0.5\t1\n");
    }
}
