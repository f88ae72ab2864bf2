//! Command-line interface for par-launch.
//!
//! The launcher takes no positional arguments: everything it needs comes
//! from `config.json` inside the data directory. The flags here only adjust
//! where that directory is and how the run behaves.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// par-launch - A self-updating application launcher
#[derive(Parser, Debug)]
#[command(name = "par-launch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory containing config.json and the managed installation
    #[arg(long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Reconcile the installation but do not launch the executable
    #[arg(long)]
    pub no_launch: bool,

    /// Log verbosity written to stderr
    #[arg(long, value_name = "LEVEL", value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Log verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The `log` crate filter this level maps to.
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
