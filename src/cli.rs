//! Command-line adapter
//!
//! Parsing lives in [`Cli`]; [`run`] performs one invocation against any
//! [`Extractor`] and writes to caller-supplied streams, so the whole flow can
//! be driven without a real yt-dlp.

use crate::downloader::{DownloadRequest, VideoDownloader};
use crate::extractor::models::VideoInfo;
use crate::extractor::options::{parse_key_value, EngineOptions, OptionValue};
use crate::extractor::traits::Extractor;
use crate::utils::config::DownloaderConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Parser)]
#[command(
    name = "tube-fetch",
    version,
    about = "Download or inspect online videos using yt-dlp"
)]
pub struct Cli {
    /// The video URL to process
    pub url: String,

    /// Directory to store downloaded files (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Download only the audio stream
    #[arg(long)]
    pub audio_only: bool,

    /// yt-dlp format selector expression to use
    #[arg(long, value_name = "EXPR")]
    pub format: Option<String>,

    /// Only show metadata without downloading
    #[arg(long)]
    pub info: bool,

    /// Emit metadata as JSON when using --info
    #[arg(long)]
    pub json: bool,

    /// Proxy URL to use when contacting the video site
    #[arg(long, env = "TUBE_FETCH_PROXY", value_name = "URL")]
    pub proxy: Option<String>,

    /// Additional yt-dlp options to merge into the configuration
    #[arg(long = "extra-option", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub extra_options: Vec<(String, OptionValue)>,

    /// Enable debug logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the yt-dlp binary (searched on PATH when omitted)
    #[arg(long, env = "TUBE_FETCH_YTDLP", value_name = "PATH")]
    pub ytdlp_path: Option<PathBuf>,
}

impl Cli {
    pub fn downloader_config(&self) -> DownloaderConfig {
        DownloaderConfig {
            output_dir: self.output.clone(),
            proxy: self.proxy.clone(),
        }
    }

    pub fn download_request(&self) -> DownloadRequest {
        let extra: EngineOptions = self.extra_options.iter().cloned().collect();
        let mut request = DownloadRequest::new(&self.url)
            .with_audio_only(self.audio_only)
            .with_extra_options(extra);
        request.format = self.format.clone();
        request
    }
}

/// Run one invocation and return the process exit code.
///
/// Facade errors are printed to `stderr` as `error: <message>`.
pub async fn run<E, O, W>(cli: &Cli, extractor: E, stdout: &mut O, stderr: &mut W) -> i32
where
    E: Extractor,
    O: Write + ?Sized,
    W: Write + ?Sized,
{
    let downloader = VideoDownloader::with_extractor(extractor, cli.downloader_config());
    match execute(cli, &downloader, stdout).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            debug!("tube-fetch {} exited with error: {:?}", cli.url, e);
            let _ = writeln!(stderr, "error: {}", e);
            EXIT_FAILURE
        }
    }
}

async fn execute<E, O>(cli: &Cli, downloader: &VideoDownloader<E>, stdout: &mut O) -> Result<()>
where
    E: Extractor,
    O: Write + ?Sized,
{
    if cli.info {
        let info = downloader.fetch_info(&cli.url).await?;
        if cli.json {
            writeln!(stdout, "{}", info.to_json()?)?;
        } else {
            write!(stdout, "{}", render_text(&info))?;
        }
        return Ok(());
    }

    let path = downloader.download(&cli.download_request()).await?;
    writeln!(stdout, "{}", path.display())?;
    Ok(())
}

/// Human-readable metadata summary, one field per line
pub fn render_text(info: &VideoInfo) -> String {
    let mut text = format!("Title: {}\n", info.title);
    if let Some(uploader) = info.uploader.as_deref().filter(|u| !u.is_empty()) {
        text.push_str(&format!("Uploader: {}\n", uploader));
    }
    if let Some(duration) = &info.duration {
        text.push_str(&format!("Duration: {} seconds\n", duration));
    }
    if let Some(views) = info.view_count {
        text.push_str(&format!("Views: {}\n", views));
    }
    text.push_str(&format!("URL: {}\n", info.webpage_url));
    text
}
