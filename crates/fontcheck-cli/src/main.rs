//! `fontcheck` — pre-flight font availability check for ASS subtitles
//!
//! Reads one subtitle file, resolves every font it references against the
//! system fonts plus any `attached_fonts` directory next to the file, and
//! prints a JSON report to stdout. Any failure prints a JSON error object
//! to stderr and exits with status 1, so calling pipelines always get
//! structured output on exactly one stream.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use fontcheck_core::{check_subtitle, CheckOptions, FontCheckError};
use log::debug;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "fontcheck",
    version,
    about = "Report which fonts an ASS subtitle file needs and which are missing"
)]
struct Cli {
    /// Subtitle files to check; only the first is processed
    #[arg(value_name = "SUBTITLE")]
    paths: Vec<PathBuf>,

    /// Resolve against attached fonts only, ignoring installed fonts
    #[arg(long)]
    no_system_fonts: bool,

    /// Log font-pool diagnostics (also honors RUST_LOG)
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Library diagnostics are off unless explicitly requested; the JSON
    // contract owns both output streams.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            // Help/version go to stdout with status 0, as usual
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            emit_error(&anyhow::Error::new(FontCheckError::InvalidInput(
                err.to_string(),
            )));
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            emit_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let path = cli.paths.first().ok_or_else(|| {
        FontCheckError::InvalidInput("no input subtitle file was provided".into())
    })?;
    if cli.paths.len() > 1 {
        debug!("ignoring {} additional path(s)", cli.paths.len() - 1);
    }

    let options = CheckOptions {
        use_system_fonts: !cli.no_system_fonts,
        verbose_diagnostics: cli.verbose,
    };
    let report = check_subtitle(path, &options)?;

    let rendered =
        serde_json::to_string_pretty(&report).context("serializing font report")?;
    println!("{rendered}");
    Ok(())
}

/// Print a structured error payload to stderr
fn emit_error(err: &anyhow::Error) {
    let payload = error_payload(err);
    match serde_json::to_string_pretty(&payload) {
        Ok(rendered) => eprintln!("{rendered}"),
        // Serializing a two-field object of strings cannot realistically
        // fail; keep a plain-text fallback anyway
        Err(_) => eprintln!("{err:#}"),
    }
}

/// Error payload shape: `{ "error": <message>, "type": <kind> }`
fn error_payload(err: &anyhow::Error) -> serde_json::Value {
    let kind = err
        .downcast_ref::<FontCheckError>()
        .map_or("internal", FontCheckError::kind);
    json!({
        "error": format!("{err:#}"),
        "type": kind,
    })
}
