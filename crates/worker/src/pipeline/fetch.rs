//! Asset downloads.
//!
//! A failed image download is non-fatal — the asset is skipped and the
//! pipeline proceeds with whatever succeeded. A failed audio download just
//! means a silent video.

use std::path::{Path, PathBuf};

use slidecast_core::job::ImageSource;

/// Errors from fetching a single asset.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download one source image into `dir` as `raw_{index:03}{ext}`.
pub async fn download_image(
    http: &reqwest::Client,
    source: &ImageSource,
    dir: &Path,
    index: usize,
) -> Result<PathBuf, FetchError> {
    let ext = guess_extension(&source.url);
    let path = dir.join(format!("raw_{index:03}{ext}"));

    let response = http.get(&source.url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}

/// Download the background audio into `dir` as `bgm.mp3`.
pub async fn download_audio(
    http: &reqwest::Client,
    url: &str,
    dir: &Path,
) -> Result<PathBuf, FetchError> {
    let path = dir.join("bgm.mp3");

    let response = http.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}

/// Guess a file extension from an asset URL.
///
/// The query string is stripped first; anything without a plausible short
/// extension falls back to `.jpg`.
pub fn guess_extension(url: &str) -> String {
    let clean = url.split('?').next().unwrap_or(url);
    let name = clean.rsplit('/').next().unwrap_or(clean);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && ext.len() <= 4 => {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => ".jpg".to_string(),
    }
}
