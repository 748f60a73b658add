//! rc-collector binary: reads collection commands line by line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rc_collector::command::DEFAULT_DATA_FILE;
use rc_collector::{run_session, BookFactory, Collector, SessionConfig};
use tracing::debug;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "rc-collector")]
#[command(about = "Manage a collection of book records from a command script")]
#[command(version)]
struct Args {
    /// File used by `load` and `save` when no filename is given
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Read commands from this file instead of standard input
    #[arg(short, long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(err) => {
                eprintln!("cannot open script '{}': {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let config = SessionConfig {
        data_file: args.data_file,
    };
    let mut col = Collector::new(BookFactory);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run_session(input, &mut col, &config, &mut out) {
        Ok(()) => {
            debug!(items = col.get_size(), "session finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(items = col.get_size(), "session aborted");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
