//! End-to-end CLI runs against a fake engine.

mod common;

use clap::Parser;
use common::{sample_metadata, FakeExtractor};
use serde_json::{json, Value};
use std::sync::Arc;
use tube_fetch::cli::{run, Cli, EXIT_FAILURE, EXIT_SUCCESS};

struct Outcome {
    code: i32,
    stdout: String,
    stderr: String,
}

async fn invoke(args: &[&str], engine: Arc<FakeExtractor>) -> Outcome {
    let cli = Cli::try_parse_from(std::iter::once("tube-fetch").chain(args.iter().copied()))
        .expect("valid arguments");
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(&cli, engine, &mut stdout, &mut stderr).await;
    Outcome {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

#[tokio::test]
async fn info_json_prints_valid_json_with_title() {
    let engine = Arc::new(FakeExtractor::returning(sample_metadata()));

    let outcome = invoke(&["https://youtu.be/abc123", "--info", "--json"], engine.clone()).await;

    assert_eq!(outcome.code, EXIT_SUCCESS);
    let parsed: Value = serde_json::from_str(&outcome.stdout).expect("stdout is JSON");
    assert_eq!(parsed["title"], "Sample Video");
    assert_eq!(parsed["duration"], json!(120));
    assert!(parsed["duration"].is_u64());
    assert_eq!(parsed["channel_id"], "UC123");
    assert!(outcome.stderr.is_empty());
    assert!(!engine.last_call().download);
}

#[tokio::test]
async fn info_text_prints_human_readable_summary() {
    let engine = Arc::new(FakeExtractor::returning(sample_metadata()));

    let outcome = invoke(&["https://youtu.be/abc123", "--info"], engine).await;

    assert_eq!(outcome.code, EXIT_SUCCESS);
    assert!(outcome.stdout.contains("Title: Sample Video"));
    assert!(outcome.stdout.contains("Uploader: Uploader"));
    assert!(outcome.stdout.contains("Duration: 120 seconds"));
    assert!(outcome.stdout.contains("Views: 1000"));
    assert!(outcome.stdout.contains("URL: https://youtu.be/abc123"));
    assert!(serde_json::from_str::<Value>(&outcome.stdout).is_err());
}

#[tokio::test]
async fn download_prints_resolved_path() {
    let file = std::env::temp_dir().join("video.mp4");
    let engine = Arc::new(FakeExtractor::returning(json!({
        "requested_downloads": [{ "_filename": file.to_string_lossy() }]
    })));

    let outcome = invoke(
        &[
            "https://youtu.be/abc123",
            "--audio-only",
            "--proxy",
            "http://proxy:8080",
            "--extra-option",
            "retries=2",
        ],
        engine.clone(),
    )
    .await;

    assert_eq!(outcome.code, EXIT_SUCCESS);
    assert_eq!(outcome.stdout.trim(), file.display().to_string());

    let call = engine.last_call();
    assert!(call.download);
    assert_eq!(call.options.text("format"), Some("bestaudio/best"));
    assert_eq!(call.options.text("proxy"), Some("http://proxy:8080"));
    assert_eq!(call.options.text("retries"), Some("2"));
}

#[tokio::test]
async fn engine_failure_exits_non_zero_with_error_on_stderr() {
    let engine = Arc::new(FakeExtractor::failing("Unable to download webpage"));

    let outcome = invoke(&["https://youtu.be/broken"], engine).await;

    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stdout.is_empty());
    assert_eq!(
        outcome.stderr,
        "error: Download failed: Unable to download webpage\n"
    );
}

#[tokio::test]
async fn info_failure_exits_non_zero() {
    let engine = Arc::new(FakeExtractor::failing("Video unavailable"));

    let outcome = invoke(&["https://youtu.be/gone", "--info", "--json"], engine).await;

    assert_ne!(outcome.code, EXIT_SUCCESS);
    assert!(outcome.stderr.contains("Video unavailable"));
}

#[tokio::test]
async fn malformed_url_fails_before_engine_runs() {
    let engine = Arc::new(FakeExtractor::returning(sample_metadata()));

    let outcome = invoke(&["not-a-url", "--info"], engine.clone()).await;

    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome.stderr.contains("Invalid URL"));
    assert!(engine.calls().is_empty());
}
