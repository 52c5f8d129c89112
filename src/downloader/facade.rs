//! High level API for fetching metadata and downloading media

use crate::downloader::request::DownloadRequest;
use crate::extractor::models::VideoInfo;
use crate::extractor::options::EngineOptions;
use crate::extractor::traits::Extractor;
use crate::extractor::ytdlp::YtDlpExtractor;
use crate::utils::config::DownloaderConfig;
use crate::utils::error::{Result, TubeFetchError};
use path_absolutize::Absolutize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Best video merged with best audio, or the best single file
pub const DEFAULT_FORMAT: &str = "bestvideo+bestaudio/best";
/// Best audio-only stream, or the best single file
pub const DEFAULT_AUDIO_FORMAT: &str = "bestaudio/best";
/// File name template handed to the engine
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Facade over the extraction engine
///
/// Holds configuration defaults only; every call is an independent engine run.
pub struct VideoDownloader<E = YtDlpExtractor> {
    extractor: E,
    config: DownloaderConfig,
}

impl VideoDownloader<YtDlpExtractor> {
    /// Downloader backed by the yt-dlp found on this machine
    pub fn new(config: DownloaderConfig) -> Result<Self> {
        Ok(Self::with_extractor(YtDlpExtractor::new()?, config))
    }
}

impl<E: Extractor> VideoDownloader<E> {
    pub fn with_extractor(extractor: E, config: DownloaderConfig) -> Self {
        Self { extractor, config }
    }

    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Fetch metadata for `url` without downloading anything.
    pub async fn fetch_info(&self, url: &str) -> Result<VideoInfo> {
        extract_video_info(&self.extractor, url, self.config.proxy.as_deref()).await
    }

    /// Download `request.url` and return the path of the produced file.
    pub async fn download(&self, request: &DownloadRequest) -> Result<PathBuf> {
        let mut effective = request.clone();
        if effective.output_dir.is_none() {
            let output_dir = self
                .config
                .resolved_output_dir()
                .map_err(TubeFetchError::into_download)?;
            effective.output_dir = Some(output_dir);
        }
        if effective.proxy.is_none() {
            effective.proxy = self.config.proxy.clone();
        }
        download_video(&self.extractor, &effective).await
    }
}

/// Fetch metadata for `url` through `extractor`.
pub async fn extract_video_info<E: Extractor + ?Sized>(
    extractor: &E,
    url: &str,
    proxy: Option<&str>,
) -> Result<VideoInfo> {
    validate_url(url).map_err(TubeFetchError::ExtractionError)?;

    let options = metadata_options(proxy);
    debug!("Extracting information for {} via {}", url, extractor.id());

    let metadata = extractor
        .extract_info(url, &options, false)
        .await
        .map_err(TubeFetchError::into_extraction)?;

    VideoInfo::from_engine(url, metadata).map_err(TubeFetchError::into_extraction)
}

/// Download a video or audio track described by `request`.
///
/// Returns the absolute path of the file the engine produced.
pub async fn download_video<E: Extractor + ?Sized>(
    extractor: &E,
    request: &DownloadRequest,
) -> Result<PathBuf> {
    validate_url(&request.url).map_err(TubeFetchError::DownloadError)?;

    let options = build_options(
        request.output_dir.as_deref(),
        request.audio_only,
        request.format.as_deref(),
        request.proxy.as_deref(),
        &request.extra_options,
    )
    .map_err(TubeFetchError::into_download)?;
    debug!("Downloading {} with options {:?}", request.url, options);

    let result = extractor
        .extract_info(&request.url, &options, true)
        .await
        .map_err(TubeFetchError::into_download)?;

    let path = resolve_download_path(&result)?;
    let resolved = path
        .absolutize()
        .map_err(|e| TubeFetchError::from(e).into_download())?
        .into_owned();
    info!("Downloaded {} to {}", request.url, resolved.display());
    Ok(resolved)
}

/// Combine the defaults with caller overrides into the engine option mapping.
pub fn build_options(
    output_dir: Option<&Path>,
    audio_only: bool,
    format: Option<&str>,
    proxy: Option<&str>,
    extra_options: &EngineOptions,
) -> Result<EngineOptions> {
    let output_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let format = format.unwrap_or(if audio_only {
        DEFAULT_AUDIO_FORMAT
    } else {
        DEFAULT_FORMAT
    });

    let mut options = EngineOptions::new();
    options.set(
        "outtmpl",
        output_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned(),
    );
    options.set("format", format);
    options.set("noplaylist", true);
    options.set("quiet", true);
    options.set("nocheckcertificate", true);
    if let Some(proxy) = proxy {
        options.set("proxy", proxy);
    }
    options.merge(extra_options);
    Ok(options)
}

/// Metadata lookups only need the network-related defaults.
fn metadata_options(proxy: Option<&str>) -> EngineOptions {
    let mut options = EngineOptions::new();
    options.set("noplaylist", true);
    options.set("quiet", true);
    options.set("nocheckcertificate", true);
    if let Some(proxy) = proxy {
        options.set("proxy", proxy);
    }
    options
}

/// Pick the produced file out of the engine's post-download document.
///
/// Newer yt-dlp releases list every produced file under
/// `requested_downloads`; the first entry naming a file wins. Older ones
/// only report the top-level `_filename`.
pub fn resolve_download_path(result: &Value) -> Result<PathBuf> {
    let from_entry = |entry: &Value| {
        ["filepath", "_filename"]
            .iter()
            .find_map(|key| {
                entry
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
            })
            .map(PathBuf::from)
    };

    if let Some(downloads) = result.get("requested_downloads").and_then(Value::as_array) {
        if let Some(path) = downloads.iter().find_map(from_entry) {
            return Ok(path);
        }
    }

    from_entry(result).ok_or_else(|| {
        TubeFetchError::DownloadError("engine did not report a download filename".to_string())
    })
}

/// Accept only absolute http(s) URLs with a host.
fn validate_url(raw: &str) -> std::result::Result<Url, String> {
    let parsed = Url::parse(raw.trim()).map_err(|e| format!("Invalid URL '{}': {}", raw, e))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|host| !host.is_empty()) => Ok(parsed),
        "http" | "https" => Err(format!("Invalid URL '{}': missing host", raw)),
        other => Err(format!("Invalid URL '{}': unsupported scheme '{}'", raw, other)),
    }
}
