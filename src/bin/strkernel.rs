use clap::Parser;
use log::{info, warn};
use strkernel::{
    io::{read_sequences, write_output, write_output_file, OutputFormat},
    prelude::*,
};

#[derive(Parser, Debug)]
#[clap(about = "Kernel matrix of sequences with the soft-matching subsequence kernel")]
struct Opts {
    /// sequences (FASTA or one sequence per line, optionally gzipped)
    input: std::path::PathBuf,
    /// substitution matrix in NCBI text format (identity if omitted)
    #[clap(short = 'm', long)]
    matrix: Option<std::path::PathBuf>,
    /// kernel params as JSON; command line flags are ignored if given
    #[clap(long)]
    params: Option<std::path::PathBuf>,
    /// subsequence length
    #[clap(short = 'k', long, default_value = "2")]
    kn: usize,
    /// gap decay
    #[clap(short = 'l', long, default_value = "0.5")]
    lambda: f64,
    /// output the unnormalized kernel
    #[clap(long)]
    no_normalize: bool,
    #[clap(long, default_value = "10000")]
    max_length: usize,
    /// compute with all cores
    #[clap(long)]
    parallel: bool,
    /// fail if a sequence is shorter than the subsequence length
    #[clap(long)]
    strict: bool,
    /// tsv, json or libsvm
    #[clap(long, default_value = "tsv")]
    format: OutputFormat,
    /// output file (stdout if omitted)
    #[clap(short = 'o', long)]
    output: Option<std::path::PathBuf>,
}

fn run(opts: Opts) -> Result<()> {
    let alphabet = Alphabet::uppercase();
    let table = match &opts.matrix {
        Some(path) => SubstitutionTable::from_file(alphabet.clone(), path)?,
        None => SubstitutionTable::identity(alphabet.clone()),
    };
    let params = match &opts.params {
        Some(path) => KernelParams::from_json_file(path)?,
        None => {
            let degenerate = if opts.strict {
                DegeneratePolicy::Reject
            } else {
                DegeneratePolicy::Zero
            };
            KernelParams::new(
                !opts.no_normalize,
                alphabet.size(),
                opts.max_length,
                opts.kn,
                opts.lambda,
            )
            .with_degenerate(degenerate)
            .with_parallel(opts.parallel)
        }
    };
    info!("params: {}", params);
    if !table.is_symmetric() {
        warn!("substitution matrix is not symmetric");
    }

    let records = read_sequences(&opts.input)?;
    if records.is_empty() {
        return Err(KernelError::invalid(format!(
            "no sequences in {}",
            opts.input.display()
        )));
    }
    let kernel = StringKernel::from_strings(&records.seqs, params, table)?;
    let output = kernel.compute()?;

    match &opts.output {
        Some(path) => write_output_file(path, &output, &records.ids, opts.format)?,
        None => write_output(std::io::stdout().lock(), &output, &records.ids, opts.format)?,
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    eprintln!("# started_at={}", chrono::Local::now());
    eprintln!("# opts={:?}", opts);

    if let Err(e) = run(opts) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    eprintln!("# finished_at={}", chrono::Local::now());
}
