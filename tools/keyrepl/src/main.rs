//! keyrepl host front-end.
//!
//! Runs the console against either a recorded keyboard report stream or
//! plain lines on stdin, printing the transcript as it grows.

mod cli;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use keyrepl_hid::BootReport;
use keyrepl_hid::report::REPORT_LEN;
use keyrepl_repl::{Console, ReplConfig};
use keyrepl_rhai::RhaiInterpreter;
use tracing::{Level, debug, info};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let config = match &cli.config {
        Some(path) => ReplConfig::load(path)?,
        None => ReplConfig::default(),
    };
    debug!(?config, "configuration loaded");

    let interp = RhaiInterpreter::new(&config.interpreter);
    let mut console = Console::new(interp, &config);

    match cli.command {
        cli::Command::Replay(ref args) => cmd_replay(&mut console, &args.file),
        cli::Command::Lines => cmd_lines(&mut console),
    }
}

/// Installs the stderr log subscriber at the level picked by `-q`/`-v`.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

// ===========================================================================
// Commands
// ===========================================================================

/// `keyrepl replay`: one report per line, one frame per report.
fn cmd_replay(console: &mut Console<RhaiInterpreter>, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut seen = 0;
    let mut reports = 0usize;
    for (index, line) in text.lines().enumerate() {
        let Some(bytes) = parse_report_line(line)
            .with_context(|| format!("{}:{}", file.display(), index + 1))?
        else {
            continue;
        };
        let report = BootReport::from_bytes(&bytes)
            .map_err(|err| anyhow::anyhow!("{}:{}: {err}", file.display(), index + 1))?;
        console.on_report(&report);
        console.tick();
        reports += 1;
        seen = flush_transcript(console, seen)?;
    }

    if !console.line().is_empty() {
        info!(line = console.line(), "unsubmitted input left in the edit line");
    }
    info!(reports, "replay finished");
    Ok(())
}

/// `keyrepl lines`: every stdin line is submitted as entered text.
fn cmd_lines(console: &mut Console<RhaiInterpreter>) -> Result<()> {
    let stdin = io::stdin();
    let mut seen = 0;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        console.submit_line(&line);
        seen = flush_transcript(console, seen)?;
    }
    Ok(())
}

// ===========================================================================
// Helpers
// ===========================================================================

/// Parses one line of a report file.
///
/// Returns `None` for blank and comment lines.
fn parse_report_line(line: &str) -> Result<Option<[u8; REPORT_LEN]>> {
    let data = line.split('#').next().unwrap_or_default().trim();
    if data.is_empty() {
        return Ok(None);
    }

    let mut bytes = [0u8; REPORT_LEN];
    let mut count = 0;
    for token in data.split_whitespace() {
        let token = token.trim_start_matches("0x");
        let byte = u8::from_str_radix(token, 16)
            .with_context(|| format!("invalid hex byte '{token}'"))?;
        if count == REPORT_LEN {
            bail!("more than {REPORT_LEN} bytes in report");
        }
        bytes[count] = byte;
        count += 1;
    }
    if count != REPORT_LEN {
        bail!("expected {REPORT_LEN} bytes, found {count}");
    }
    Ok(Some(bytes))
}

/// Prints transcript lines appended since `seen`; returns the new count.
fn flush_transcript(console: &Console<RhaiInterpreter>, seen: usize) -> Result<usize> {
    let transcript = console.transcript();
    let mut out = io::stdout().lock();
    for line in transcript.since(seen) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(transcript.total())
}
