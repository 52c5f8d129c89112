//! Parameters of a single download

use crate::extractor::options::{EngineOptions, OptionValue};
use std::path::PathBuf;

/// What to download and how
///
/// `output_dir` and `proxy` override the downloader's defaults when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub audio_only: bool,
    pub output_dir: Option<PathBuf>,
    /// Format expression replacing the default selection
    pub format: Option<String>,
    pub proxy: Option<String>,
    /// Merged over the default engine options, winning on conflicts
    pub extra_options: EngineOptions,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_extra_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Self {
        self.extra_options.set(key, value);
        self
    }

    pub fn with_extra_options(mut self, extra_options: EngineOptions) -> Self {
        self.extra_options.merge(&extra_options);
        self
    }
}
