//! Download facade and its request type

pub mod facade;
pub mod request;

pub use facade::{
    build_options, download_video, extract_video_info, resolve_download_path, VideoDownloader,
    DEFAULT_AUDIO_FORMAT, DEFAULT_FORMAT, OUTPUT_TEMPLATE,
};
pub use request::DownloadRequest;
