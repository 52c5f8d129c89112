//! Error handling for tube-fetch

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, TubeFetchError>;

/// Main error type for tube-fetch
#[derive(Debug, Error)]
pub enum TubeFetchError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Failed to extract video info: {0}")]
    ExtractionError(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl TubeFetchError {
    /// Re-classify any error raised during a metadata fetch as an extraction failure.
    pub fn into_extraction(self) -> Self {
        match self {
            Self::ExtractionError(_) | Self::YtDlpNotFound => self,
            other => Self::ExtractionError(other.to_string()),
        }
    }

    /// Re-classify any error raised during a download as a download failure.
    pub fn into_download(self) -> Self {
        match self {
            Self::DownloadError(_) | Self::YtDlpNotFound => self,
            other => Self::DownloadError(other.to_string()),
        }
    }
}
