//! Shared test double for the extraction engine.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use tube_fetch::{EngineOptions, Extractor, Result, TubeFetchError};

/// One recorded engine invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub options: EngineOptions,
    pub download: bool,
}

/// Extractor returning a canned answer and recording every call
pub struct FakeExtractor {
    response: std::result::Result<Value, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeExtractor {
    pub fn returning(response: Value) -> Self {
        Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails like yt-dlp does: extraction errors for lookups, download errors otherwise.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("extractor was never called")
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &EngineOptions,
        download: bool,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            options: options.clone(),
            download,
        });

        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err(message) if download => Err(TubeFetchError::DownloadError(message.clone())),
            Err(message) => Err(TubeFetchError::ExtractionError(message.clone())),
        }
    }
}

pub fn sample_metadata() -> Value {
    serde_json::json!({
        "id": "abc123",
        "title": "Sample Video",
        "uploader": "Uploader",
        "duration": 120,
        "webpage_url": "https://youtu.be/abc123",
        "description": "A demo",
        "view_count": 1000,
        "like_count": 50,
        "upload_date": "20240101",
        "channel_id": "UC123"
    })
}
