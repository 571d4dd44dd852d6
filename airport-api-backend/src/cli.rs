//! Command-line interface for the `airport-api` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// airport-api - REST directory of airports, served from memory
///
/// Loads a JSON dataset of airports at startup and exposes create, read,
/// update, delete and paging over HTTP. Changes are not written back.
#[derive(Debug, Parser)]
#[command(name = "airport-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overrides `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Airport dataset to load, overrides `dataset.path`
    #[arg(short, long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            return Verbosity::Quiet;
        }

        match self.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }
}
