use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use fixpairs_rs::{fix_pairs, output_files, DuplicatePolicy, FixPairsError, FixPairsOptions};

const USAGE: &str = "fix-pairs reads.1.fq reads.2.fq outfile_basename";

/// Re-pair forward and reverse FASTQ files that were filtered independently.
///
/// Reads are matched on the header text before the first space, e.g.
///
///   @SN741:746:HKFKLBCXX:1:1106:19267:2152 1:N:0:TGCGTAAC
///   @SN741:746:HKFKLBCXX:1:1106:19267:2152 2:N:0:TGCGTAAC
///
/// The forward file is held in memory. Pairs are written in reverse-file order
/// to <BASENAME>.1.fq and <BASENAME>.2.fq; reads without a mate go to <BASENAME>.U.fq.
#[derive(Parser)]
#[command(name = "fix-pairs", version)]
struct Args {
    /// Forward reads (FASTQ)
    forward: String,

    /// Reverse reads (FASTQ)
    reverse: String,

    /// Prefix for the three output files
    basename: String,

    /// How to treat a forward identifier seen more than once
    #[arg(long, value_enum, default_value_t = Duplicates::Last)]
    duplicates: Duplicates,

    /// Fail on duplicate forward identifiers (same as --duplicates error)
    #[arg(long, conflicts_with = "duplicates")]
    strict: bool,

    /// Records between progress messages (0 disables them)
    #[arg(long, default_value_t = fixpairs_rs::progress::DEFAULT_INTERVAL)]
    progress_interval: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Duplicates {
    Last,
    First,
    Error,
}

impl From<Duplicates> for DuplicatePolicy {
    fn from(d: Duplicates) -> Self {
        match d {
            Duplicates::Last => DuplicatePolicy::KeepLast,
            Duplicates::First => DuplicatePolicy::KeepFirst,
            Duplicates::Error => DuplicatePolicy::Error,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                process::exit(0);
            }
            _ => {
                let _ = e.print();
                let err = FixPairsError::Usage(USAGE.to_string());
                eprintln!("{err}");
                process::exit(err.exit_code());
            }
        },
    };

    let options = FixPairsOptions {
        duplicates: if args.strict {
            DuplicatePolicy::Error
        } else {
            args.duplicates.into()
        },
        progress_interval: args.progress_interval,
    };

    let result = fix_pairs(&args.forward, &args.reverse, &args.basename, options);

    match result {
        Ok((counts, paths)) => {
            let [forward, reverse, unpaired] = output_files(&paths);
            log::info!("Surviving forward seqs: '{}'", forward.display());
            log::info!("Surviving reverse seqs: '{}'", reverse.display());
            log::info!("Unpaired seqs: '{}'", unpaired.display());
            eprint!("{counts}");
        }
        Err(err) => {
            eprintln!("ERROR -- {err}");
            process::exit(err.exit_code());
        }
    }
}
