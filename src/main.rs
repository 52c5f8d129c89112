//! tube-fetch - download or inspect online videos from the command line
//!
//! Thin front-end over yt-dlp: metadata lookups and single-video downloads
//! with sensible default format selection.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tube_fetch::cli::{self, Cli};
use tube_fetch::YtDlpExtractor;

fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    // Logs go to stderr so that stdout carries only results
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let extractor = match &args.ytdlp_path {
        Some(path) => YtDlpExtractor::with_path(path),
        None => match YtDlpExtractor::new() {
            Ok(extractor) => extractor,
            Err(e) => {
                eprintln!("error: {}", e);
                eprintln!("Please install yt-dlp:");
                eprintln!("  pip install yt-dlp");
                eprintln!("  or visit: https://github.com/yt-dlp/yt-dlp");
                return Ok(ExitCode::FAILURE);
            }
        },
    };

    // One engine call per invocation; a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let code = runtime.block_on(cli::run(
        &args,
        extractor,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    ));

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
