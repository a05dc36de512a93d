use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "molar - inspect molecular structures and select atoms with a small query language.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// TOML file with element mass overrides (e.g. `[masses]` then `D = 2.014`)
    #[arg(long, global = true, value_name = "PATH")]
    pub masses: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a structure file: atoms, residues, chains and center of mass.
    Info(InfoArgs),
    /// Evaluate a selection query against a structure file.
    Select(SelectArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the input structure file (.pdb, .ent or .bgf).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the `select` subcommand.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Path to the input structure file (.pdb, .ent or .bgf).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Selection query, e.g. "resid 5:6 and name CA".
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Print one line per selected atom.
    #[arg(long)]
    pub atoms: bool,
}
