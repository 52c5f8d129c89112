//! Drives `YtDlpExtractor` against a stand-in shell script instead of yt-dlp.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;
use tube_fetch::{
    DownloadRequest, DownloaderConfig, TubeFetchError, VideoDownloader, YtDlpExtractor,
};

const FAKE_YTDLP: &str = r#"#!/bin/sh
for arg in "$@"; do
  if [ "$arg" = "--skip-download" ]; then
    echo '{"id": "abc123", "title": "Script Video", "duration": 12.5}'
    exit 0
  fi
done
echo "WARNING: pretending to download" >&2
echo "ERROR: [youtube] abc123: Requested format is not available" >&2
exit 1
"#;

fn write_script(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("yt-dlp");
    std::fs::write(&path, FAKE_YTDLP).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod");
    path
}

// Single test so no other thread forks while the script is being written.
#[tokio::test]
async fn subprocess_metadata_and_failure_paths() {
    let temp = TempDir::new().expect("temp dir");
    let script = write_script(temp.path());
    let downloader = VideoDownloader::with_extractor(
        YtDlpExtractor::with_path(&script),
        DownloaderConfig::default().with_output_dir(temp.path()),
    );

    let info = downloader.fetch_info("https://youtu.be/abc123").await.unwrap();
    assert_eq!(info.id, "abc123");
    assert_eq!(info.title, "Script Video");
    assert_eq!(info.duration_secs(), Some(12.5));
    assert_eq!(info.webpage_url, "https://youtu.be/abc123");

    let err = downloader
        .download(&DownloadRequest::new("https://youtu.be/abc123"))
        .await
        .unwrap_err();
    match err {
        TubeFetchError::DownloadError(msg) => {
            assert_eq!(msg, "[youtube] abc123: Requested format is not available")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let missing = VideoDownloader::with_extractor(
        YtDlpExtractor::with_path(temp.path().join("no-such-binary")),
        DownloaderConfig::default(),
    );
    let err = missing.fetch_info("https://youtu.be/abc123").await.unwrap_err();
    assert!(matches!(err, TubeFetchError::YtDlpNotFound));
}
