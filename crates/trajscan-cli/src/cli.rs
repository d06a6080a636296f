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
    about = "trajscan - Scan VASP XDATCAR trajectories for element-pair distances that satisfy a threshold, with per-frame heatmaps and a consolidated report.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a trajectory for element pairs satisfying a distance threshold.
    Scan(ScanArgs),
    /// Print a summary of a trajectory file (frames, composition, cell).
    Info(InfoArgs),
}

/// Arguments for the `scan` subcommand.
///
/// Every scan parameter can come from the CLI or from the TOML config file;
/// CLI values win. Parameters left unset by both are reported as
/// configuration errors before any file I/O happens.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the input XDATCAR trajectory file.
    #[arg(short, long, value_name = "PATH")]
    pub trajectory: Option<PathBuf>,

    /// Directory for all scan outputs (created if missing).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Element pair to scan for, e.g. 'C-Br'.
    #[arg(short, long, value_name = "EL-EL")]
    pub pair: Option<String>,

    /// Threshold distance in Angstroms.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Threshold condition: 'less' (d <= cutoff) or 'greater' (d >= cutoff).
    #[arg(short, long, value_name = "WORD")]
    pub condition: Option<String>,

    /// Path to a TOML configuration file providing defaults for the flags above.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip rendering per-frame distance heatmaps.
    #[arg(long)]
    pub no_heatmaps: bool,

    /// Skip writing every frame into the All_POSCARS directory.
    #[arg(long)]
    pub no_frame_dump: bool,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the XDATCAR trajectory file to summarize.
    #[arg(required = true, value_name = "PATH")]
    pub trajectory: PathBuf,
}
