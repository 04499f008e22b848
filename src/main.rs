use clap::{ArgAction, CommandFactory, Parser};

use motifscan::errors::{Error, Result};
use motifscan::{run, ConfigFile, ConsensusSyntax, RunConfig};

#[derive(Parser)]
#[command(name = "motifscan")]
#[command(about = "Find occurrences of a DNA consensus motif in fasta sequences", long_about = None)]
#[command(version)]
struct Cli {
    /// Input fasta file, optionally gzip-compressed
    #[arg(value_name = "FASTA(.gz)")]
    fasta: String,

    /// The consensus sequence of the motif
    #[arg(short = 'c', long, value_name = "STR")]
    motif_consensus: Option<String>,

    /// Search both strands
    #[arg(short = 'b', long)]
    both_strands: bool,

    /// Ignore repeats (soft-masked in lowercase)
    #[arg(short = 'i', long)]
    ignore_repeat: bool,

    /// Allow overlapping sites
    #[arg(short = 'r', long)]
    allow_overlap_sites: bool,

    /// Read the consensus as IUPAC codes instead of a regular expression
    #[arg(long)]
    iupac: bool,

    /// Number of threads; records are written in an arbitrary order with more than one
    #[arg(short = 't', long, value_name = "INT", default_value_t = 1)]
    threads: usize,

    /// Yaml file with default settings, overridden by the command line
    #[arg(long, value_name = "YAML")]
    config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE")]
    output_file: Option<String>,

    /// Verbose mode, repeat for more detail
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_run_config(self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let mut scan = file.scan();
        let consensus = self
            .motif_consensus
            .or(file.consensus)
            .ok_or_else(|| Error::Config("missing motif consensus (-c)".to_owned()))?;

        scan.both_strands |= self.both_strands;
        scan.allow_overlap |= self.allow_overlap_sites;
        scan.ignore_repeat |= self.ignore_repeat;
        if self.iupac {
            scan.syntax = ConsensusSyntax::Iupac;
        }

        Ok(RunConfig {
            input: self.fasta,
            consensus,
            output: self.output_file,
            scan,
            threads: self.threads,
        })
    }
}

fn main() {
    if std::env::args_os().len() < 2 {
        eprint!("{}", Cli::command().render_help());
        std::process::exit(0);
    }

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = cli.into_run_config().and_then(|config| run(&config)) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
