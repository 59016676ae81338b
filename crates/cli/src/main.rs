mod args;
mod error;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use exn::ResultExt;
use snippet_config::Config;
use tracing::instrument;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::error::{ErrorKind, Result};

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the truncated HTML.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

#[instrument(level = "debug", skip(args))]
fn run(args: &Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let length = args.length(&config)?;
    let options = args.options(&config);
    let html = args.read_input()?;
    tracing::debug!(length, input_size = html.len(), ?options, "truncating");
    let output = snippet_html::truncate_with(&html, length, &options).or_raise(|| ErrorKind::Truncate)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).or_raise(|| ErrorKind::Io)?;
    stdout.write_all(b"\n").or_raise(|| ErrorKind::Io)?;
    stdout.flush().or_raise(|| ErrorKind::Io)
}
