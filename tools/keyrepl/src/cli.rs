//! Command-line interface definitions for keyrepl.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keyboard-driven Rhai console.
#[derive(Parser)]
#[command(name = "keyrepl", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Only log errors.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log per-report key state and interpreter decisions.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Feed a recorded stream of HID boot keyboard reports to the console.
    Replay(ReplayArgs),
    /// Read lines from stdin and submit each one as if typed and entered.
    Lines,
}

/// Arguments for the `replay` subcommand.
#[derive(Parser)]
pub struct ReplayArgs {
    /// Report file: one 8-byte report per line as hex bytes, `#` starts a
    /// comment.
    pub file: PathBuf,
}
