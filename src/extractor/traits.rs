use crate::extractor::options::EngineOptions;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Core trait for the extraction engine
///
/// This trait isolates the facade from the specific engine binding
/// (yt-dlp subprocess, an in-process library, a test double, ...).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "ytdlp")
    fn id(&self) -> &'static str;

    /// Resolve `url` with the given options and return the engine's metadata document.
    ///
    /// With `download` set the engine also fetches the media, and the returned
    /// document describes the files it wrote. Failures are reported as
    /// `ExtractionError` in metadata mode and `DownloadError` in download mode.
    async fn extract_info(&self, url: &str, options: &EngineOptions, download: bool)
        -> Result<Value>;
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for Arc<T> {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &EngineOptions,
        download: bool,
    ) -> Result<Value> {
        (**self).extract_info(url, options, download).await
    }
}
