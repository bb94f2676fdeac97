//! Command-line interface implementation for gencxx.
//! Provides argument parsing and help text formatting using clap.

use crate::config::{CollisionPolicy, UndefinedMode};
use crate::output::OutputTarget;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for gencxx.
#[derive(Parser, Debug)]
#[command(author, version, about = "gencxx: a Jinja template processor for generated source code", long_about = None)]
pub struct Args {
    /// Input template, resolved against the current directory and then `/`
    #[arg(value_name = "IN")]
    pub template: String,

    /// Output file, `-` for standard output
    #[arg(value_name = "OUT", default_value = "-")]
    pub output: OutputTarget,

    /// Directory containing YAML/JSON data files
    #[arg(short, long, value_name = "DATADIR")]
    pub datadir: Option<PathBuf>,

    /// How templates treat undefined values
    #[arg(long, value_enum, default_value_t = UndefinedMode::Strict)]
    pub undefined: UndefinedMode,

    /// What to do when two data files derive the same key
    #[arg(long, value_enum, default_value_t = CollisionPolicy::Overwrite)]
    pub on_collision: CollisionPolicy,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's usage error (message on stderr, status 2) on any bad or
///   missing argument, so nothing reaches stdout, which carries the
///   generated output
pub fn get_args() -> Args {
    Args::parse()
}
