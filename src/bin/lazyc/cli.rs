//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for
//! the lazylang compiler.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for lazyc.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the lazylang source file.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,

    /// The path for the generated C translation unit.
    #[arg(index = 2, default_value = "lazylang_out.c")]
    pub c_output: std::path::PathBuf,

    /// The path for the produced binary.
    #[arg(index = 3, default_value = "lazylang_out")]
    pub binary_output: std::path::PathBuf,

    /// Specify the log level of the compiler.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of lazyc.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level, where also warnings are logged.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the compiler, e.g.,
    /// which files are written and which toolchain is used.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the compiler.
    #[value(alias("3"))]
    Debug,

    /// Log extra information, including non-important errors.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
