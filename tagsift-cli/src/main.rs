//! tagsift CLI
//!
//! Prints the lexical events of a markup document, one per line, the way a
//! `ScanHandler` sees them. Useful for checking how malformed markup is
//! recovered.

mod output;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use tagsift_common::warning::set_warnings_enabled;
use tagsift_scan::{RecoveryKind, ScanOptions, ScanReport, Scanner};

use output::{EventWriter, Format};

/// tagsift - dump the lexical event stream of HTML or SGML-like markup
#[derive(Parser, Debug)]
#[command(name = "tagsift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Scan a file
    tagsift ./index.html

    # Scan inline markup
    tagsift --html '<p class=x>Hi &amp; bye'

    # Treat script and style content as raw text
    tagsift --html-raw-text ./page.html

    # JSON lines, and a summary of recoveries on stderr
    tagsift --format json --report ./broken.html
"#)]
struct Cli {
    /// Path to the document to scan
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Scan this markup instead of a file
    #[arg(long, value_name = "MARKUP", conflicts_with = "path")]
    html: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Elements whose content is raw text (comma-separated)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    raw_text: Vec<String>,

    /// Treat script and style as raw text elements
    #[arg(long)]
    html_raw_text: bool,

    /// Stop with an error after this many events
    #[arg(long, value_name = "N")]
    max_events: Option<usize>,

    /// Do not print recovery warnings
    #[arg(short, long)]
    quiet: bool,

    /// Do not color text output
    #[arg(long)]
    no_color: bool,

    /// Print a summary of recoveries to stderr after the scan
    #[arg(long)]
    report: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.quiet {
        set_warnings_enabled(false);
    }

    let input = read_input(&cli)?;
    let scanner = Scanner::with_options(scan_options(&cli));

    let stdout = io::stdout();
    let mut writer = EventWriter::new(BufWriter::new(stdout.lock()), cli.format)
        .with_color(!cli.no_color && cli.format == Format::Text)
        .with_limit(cli.max_events);

    let report = scanner
        .scan(&input, &mut writer)
        .context("scan aborted")?;
    writer
        .into_inner()
        .flush()
        .context("failed to flush output")?;

    if cli.report {
        print_report(&report);
    }
    Ok(())
}

/// Load the document from the command line arguments
fn read_input(cli: &Cli) -> Result<String> {
    if let Some(ref markup) = cli.html {
        Ok(markup.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        bail!("nothing to scan: pass a FILE or --html")
    }
}

fn scan_options(cli: &Cli) -> ScanOptions {
    let base = if cli.html_raw_text {
        ScanOptions::html()
    } else {
        ScanOptions::default()
    };
    cli.raw_text
        .iter()
        .fold(base, |options, name| options.with_raw_text_element(name.as_str()))
        .with_log_recoveries(!cli.quiet)
}

fn print_report(report: &ScanReport) {
    eprintln!("{} events", report.events);
    if report.is_clean() {
        eprintln!("{}", "no recoveries".green());
        return;
    }

    eprintln!("{} recoveries", report.recoveries.len());
    for kind in RecoveryKind::iter() {
        let count = report.count(kind);
        if count > 0 {
            eprintln!("  {:<36} {count}", kind.to_string().yellow());
        }
    }
    for recovery in &report.recoveries {
        eprintln!("  {} at {}", recovery.kind, recovery.position);
    }
}
