//! tube-fetch library
//!
//! A small facade over yt-dlp: [`VideoDownloader::fetch_info`] for metadata
//! and [`VideoDownloader::download`] for media, with default format
//! selection and an output template applied for you.

pub mod cli;
pub mod downloader;
pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{download_video, extract_video_info, DownloadRequest, VideoDownloader};
pub use extractor::{EngineOptions, Extractor, OptionValue, VideoInfo, YtDlpExtractor};
pub use utils::{DownloaderConfig, Result, TubeFetchError};
