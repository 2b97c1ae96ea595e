mod output;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgGroup, Parser, ValueEnum};
use cross_review::{assign_reviewers, ReviewError};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::output::{write_json, write_tables, Tables};

#[derive(Parser)]
#[command(
    name = "cross-review",
    version,
    about = "Given a list of peers, randomly assign reviewers to each peer"
)]
#[command(group(ArgGroup::new("tables").args(["all", "to_review", "reviewed_by"])))]
struct Cli {
    /// File with one id per line. Use '-' to read from stdin
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Number of reviewers per peer
    #[arg(value_name = "N", default_value_t = 2)]
    reviewers: usize,

    /// Print both --to-review and --reviewed-by (the default)
    #[arg(short, long)]
    all: bool,

    /// For each reviewer, print the ids to be reviewed
    #[arg(short, long)]
    to_review: bool,

    /// For each reviewee, print the ids of its reviewers
    #[arg(short = 'b', long)]
    reviewed_by: bool,

    /// Seed for a reproducible assignment
    #[arg(long, env = "CROSS_REVIEW_SEED")]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

impl Cli {
    fn tables(&self) -> Tables {
        if self.to_review {
            Tables::ToReview
        } else if self.reviewed_by {
            Tables::ReviewedBy
        } else {
            Tables::All
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to write json: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_ids(file: &Path) -> Result<Vec<String>, CliError> {
    let read_error = |source: io::Error| CliError::Read {
        path: file.display().to_string(),
        source,
    };
    let reader: Box<dyn BufRead> = if file == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(file).map_err(read_error)?))
    };
    reader
        .lines()
        .map(|line| line.map(|id| id.trim().to_owned()).map_err(read_error))
        .collect()
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let ids = read_ids(&cli.file)?;
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    info!("assigning {} reviewers to each of {} peers", cli.reviewers, ids.len());
    let assignment = assign_reviewers(&ids, cli.reviewers, &mut rng)?;

    let mut out = io::stdout().lock();
    match cli.format {
        Format::Table => write_tables(&mut out, &assignment, cli.tables())?,
        Format::Json => write_json(&mut out, &assignment)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
