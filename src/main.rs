//! BioLum - Bioluminescent species sequence explorer
//!
//! Derives sequences from species records and aligns species pairs.
//! Every result is stored once under `<out>/<artifact name>.txt`; asking
//! again reports that the artifact already exists.
//!
//! ## Usage
//!
//! ```bash
//! biolum dna "Aequorea victoria"
//! biolum -r 4 protein "Photinus pyralis"
//! biolum --match 2 --indel -3 align "Aequorea victoria" "Photinus pyralis"
//! biolum info "Vargula hilgendorfii"
//! ```
//!
//! Set `RUST_LOG` or pass `--verbose` for more output.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use biolum::controller::{Explorer, Report};
use biolum::model::{Mode, ScoringConfig, DEFAULT_INDEL, DEFAULT_MATCH, DEFAULT_MISMATCH};
use biolum::records::{RecordSource, SpeciesInfo};
use biolum::store::DirectoryStore;

/// Column width of the species info display.
const INFO_WIDTH: usize = 72;

/// What to derive or show
#[derive(Subcommand, Debug)]
enum Command {
    /// Cleaned DNA of a species
    Dna {
        /// Species identifier as written after '>' in the sequence file
        species: String,
    },
    /// Forward RNA transcription of a species
    Rna { species: String },
    /// Protein translation of a species in the selected reading frame
    Protein { species: String },
    /// Global and local alignment of two species
    Align { first: String, second: String },
    /// Descriptive record of a species from the info file
    Info { species: String },
}

/// BioLum - explore the sequences of bioluminescent species
///
/// Derived sequences and alignments are written once to the output
/// directory and never overwritten.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence records file
    #[arg(long = "sequences", default_value = "Info/Sequences.txt")]
    sequences: PathBuf,

    /// Species info records file
    #[arg(long = "info", default_value = "Info/Info.txt")]
    info: PathBuf,

    /// Directory artifacts are written to
    #[arg(short = 'o', long = "out", default_value = "Files")]
    out: PathBuf,

    /// Score for identical characters
    #[arg(long = "match", default_value_t = DEFAULT_MATCH.to_string(), allow_hyphen_values = true)]
    match_score: String,

    /// Score for differing characters
    #[arg(long = "mismatch", default_value_t = DEFAULT_MISMATCH.to_string(), allow_hyphen_values = true)]
    mismatch: String,

    /// Score for each gap position
    #[arg(long = "indel", default_value_t = DEFAULT_INDEL.to_string(), allow_hyphen_values = true)]
    indel: String,

    /// Reading frame for protein translation (1-6, default: 1)
    /// Frames 1-3 are forward (+1, +2, +3), 4-6 are reverse complement
    #[arg(short = 'r', long = "reading-frame", default_value = "1", allow_hyphen_values = true)]
    reading_frame: String,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Prints a species info record, wrapping long values under their label.
fn print_info(info: &SpeciesInfo) {
    println!("{}", info.name);
    for (label, value) in info.fields() {
        let initial = format!("  {:<12} ", format!("{}:", label));
        if value.is_empty() {
            println!("{}", initial.trim_end());
            continue;
        }
        let subsequent = " ".repeat(initial.len());
        let options = textwrap::Options::new(INFO_WIDTH)
            .initial_indent(&initial)
            .subsequent_indent(&subsequent);
        println!("{}", textwrap::fill(value, options));
    }
}

fn print_report(report: &Report, out: &DirectoryStore) {
    match report {
        Report::Sequence(d) => {
            println!("{}: {}", out.path_for(&d.name).display(), d.outcome);
        }
        Report::Alignment(r) => {
            println!("Global alignment score: {}", r.global_score());
            println!("Local alignment score: {}", r.local_score());
            println!("{}: {}", out.path_for(&r.global_name).display(), r.global_outcome);
            println!("{}: {}", out.path_for(&r.local_name).display(), r.local_outcome);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Parameters are validated before any record is read
    let scoring =
        ScoringConfig::from_text(&args.match_score, &args.mismatch, &args.indel, &args.reading_frame)?;
    debug!("scoring: {:?}", scoring);

    let (mode, species): (Mode, Vec<&str>) = match &args.command {
        Command::Info { species } => {
            let source = RecordSource::from_path(&args.info)
                .with_context(|| format!("Cannot open info file {}", args.info.display()))?;
            print_info(&source.info(species.trim())?);
            return Ok(());
        }
        Command::Dna { species } => (Mode::Dna, vec![species.as_str()]),
        Command::Rna { species } => (Mode::Rna, vec![species.as_str()]),
        Command::Protein { species } => (Mode::Protein, vec![species.as_str()]),
        Command::Align { first, second } => (Mode::Alignment, vec![first.as_str(), second.as_str()]),
    };

    let species: Vec<&str> = species.into_iter().map(str::trim).collect();
    if species.iter().any(|s| s.is_empty()) {
        anyhow::bail!("Species identifier must not be empty");
    }

    let records = RecordSource::from_path(&args.sequences)
        .with_context(|| format!("Cannot open sequence file {}", args.sequences.display()))?;
    let store = DirectoryStore::new(&args.out);
    let explorer = Explorer::new(records, store);

    let report = explorer.run(mode, &species, &scoring)?;
    print_report(&report, explorer.store());

    Ok(())
}
