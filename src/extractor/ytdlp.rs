//! yt-dlp wrapper for video extraction
//!
//! This module drives the `yt-dlp` binary as a subprocess. Options are passed
//! as command-line flags and the engine's answer is read back as a single JSON
//! document on stdout, both for metadata lookups and for downloads.

use crate::extractor::options::EngineOptions;
use crate::extractor::traits::Extractor;
use crate::utils::error::{Result, TubeFetchError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Extractor backed by the `yt-dlp` binary
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    ///
    /// Search order:
    /// 1. Next to the current executable
    /// 2. System PATH
    /// 3. Common installation paths (Homebrew, pip --user, ...)
    pub fn new() -> Result<Self> {
        match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                Ok(Self { ytdlp_path: path })
            }
            None => {
                error!("yt-dlp not found anywhere!");
                Err(TubeFetchError::YtDlpNotFound)
            }
        }
    }

    /// Use an explicit yt-dlp binary without probing.
    pub fn with_path(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    /// Build the full argument list for one invocation.
    ///
    /// Metadata mode: `--dump-single-json --skip-download`
    /// Download mode: `--dump-single-json --no-simulate`, so the printed
    /// document reflects the files that were actually written.
    pub fn build_args(url: &str, options: &EngineOptions, download: bool) -> Vec<String> {
        let mut args = options.to_args();
        args.push("--dump-single-json".to_string());
        if download {
            args.push("--no-simulate".to_string());
        } else {
            args.push("--skip-download".to_string());
        }
        args.push("--no-warnings".to_string());
        // Keep URLs starting with '-' from being read as flags
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &EngineOptions,
        download: bool,
    ) -> Result<Value> {
        let args = Self::build_args(url, options, download);
        debug!(
            "Running {} {}",
            self.ytdlp_path.display(),
            args.join(" ")
        );

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TubeFetchError::YtDlpNotFound
                } else {
                    TubeFetchError::IoError(e)
                }
            })?;

        if !output.status.success() {
            let message =
                summarize_stderr(&String::from_utf8_lossy(&output.stderr), output.status);
            error!("yt-dlp failed for {}: {}", url, message);
            return Err(if download {
                TubeFetchError::DownloadError(message)
            } else {
                TubeFetchError::ExtractionError(message)
            });
        }

        parse_json_output(&output.stdout)
    }
}

/// Parse the JSON document yt-dlp printed.
///
/// yt-dlp prints exactly one line with `--dump-single-json`, but stray output
/// from post-processors can precede it, so the last non-empty line wins.
fn parse_json_output(stdout: &[u8]) -> Result<Value> {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| {
            TubeFetchError::ExtractionError("yt-dlp produced no output".to_string())
        })?;
    Ok(serde_json::from_str(line.trim())?)
}

/// Reduce yt-dlp's stderr to the message worth showing a user.
fn summarize_stderr(stderr: &str, status: ExitStatus) -> String {
    let errors: Vec<&str> = stderr
        .lines()
        .filter_map(|line| line.trim().strip_prefix("ERROR:"))
        .map(str::trim)
        .collect();
    if !errors.is_empty() {
        return errors.join("; ");
    }

    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("yt-dlp exited with {}", status))
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Next to the executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(local) = find_next_to_executable() {
        debug!("Using yt-dlp next to executable: {:?}", local);
        return Some(local);
    }

    if let Ok(system) = which::which("yt-dlp") {
        debug!("Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        debug!("Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("yt-dlp not found on PATH or in common locations");
    None
}

fn find_next_to_executable() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let candidate = exe_path.parent()?.join(binary_name());
    if candidate.is_file() && is_executable(&candidate) {
        Some(candidate)
    } else {
        None
    }
}

fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // Homebrew (Intel) and manual installs
        "/usr/local/bin/yt-dlp",
        // System package
        "/usr/bin/yt-dlp",
        // pip --user
        "~/.local/bin/yt-dlp",
    ];

    common_paths
        .iter()
        .map(|path| expand_home(path))
        .find(|path| path.is_file() && is_executable(path))
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn binary_name() -> &'static str {
    if cfg!(windows) {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

// ============================================================
// Tests
// ============================================================
