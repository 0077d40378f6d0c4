//! Command-line argument definitions for the Storyline CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, actor filtering, output format and logging verbosity.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the Storyline timeline tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input corpus XML file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only show speeches featuring these actors (ids or names, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub actors: Vec<String>,

    /// Whether a speech needs any or all of the listed actors
    #[arg(long = "match", value_enum, default_value_t = MatchMode::Any)]
    pub match_mode: MatchMode,

    /// Maximum number of visible positions (overrides the config file)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Speech id to seed the timeline with
    #[arg(long)]
    pub anchor: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    Any,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}
