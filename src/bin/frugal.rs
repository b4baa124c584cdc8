//! Reference driver for the frugal estimator
//!
//! Reads newline-delimited decimal integers from a file or stdin, feeds
//! them to an ensemble of independent estimators, and prints the sorted
//! final estimates with the median one flagged. Fail-fast: the first
//! malformed line or I/O error aborts the run.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;

use frugal::quantiles::FrugalEnsemble;

#[derive(Parser, Debug)]
#[command(author, version, about = "Estimate a stream quantile in O(1) memory", long_about = None)]
struct Args {
    /// The quantile to estimate
    #[arg(short, long, default_value_t = 0.5)]
    quantile: f64,

    /// Number of independent estimators
    #[arg(short = 'n', long, default_value_t = 5)]
    ensemble: usize,

    /// Initial estimate
    #[arg(short = 'm', long, default_value_t = 0)]
    initial: i64,

    /// File to read (stdin when absent)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.ensemble > 0, "ensemble size must be at least 1");

    let mut ensemble = FrugalEnsemble::new(args.ensemble, args.initial, args.quantile);

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", lineno + 1))?;
        let value: i64 = line
            .parse()
            .with_context(|| format!("parsing line {}: {:?}", lineno + 1, line))?;
        ensemble.insert(value);
    }

    let estimates = ensemble.estimates();
    for (i, estimate) in estimates.iter().enumerate() {
        if i == estimates.len() / 2 {
            println!("{} <--", estimate);
        } else {
            println!("{}", estimate);
        }
    }

    Ok(())
}
