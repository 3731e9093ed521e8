//! Whisper model cache. Models are fetched from HuggingFace on first use and
//! kept under the cache dir.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::WhisperModel;
use crate::error::{Error, Result};

const HUGGINGFACE_BASE: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Ensure a model is available locally, downloading if necessary.
/// Returns the path to the model file.
pub async fn ensure_model(model: &WhisperModel, cache_dir: &Path) -> Result<PathBuf> {
    match model {
        WhisperModel::Custom(path) => {
            if path.exists() {
                Ok(path.clone())
            } else {
                Err(Error::ModelNotFound { path: path.clone() })
            }
        }
        _ => {
            let filename = model.filename();
            let model_path = cache_dir.join(&filename);

            if model_path.exists() {
                info!(path = %model_path.display(), "model already cached");
                return Ok(model_path);
            }

            std::fs::create_dir_all(cache_dir).map_err(|e| {
                Error::Model(format!(
                    "failed to create cache dir {}: {e}",
                    cache_dir.display()
                ))
            })?;

            let url = format!("{HUGGINGFACE_BASE}/{filename}");
            info!(%url, "downloading model");
            download_model(&url, &model_path).await?;

            Ok(model_path)
        }
    }
}

/// Any ggml model smaller than this is an error page, not a model.
const MIN_MODEL_BYTES: u64 = 1_000_000;

async fn download_model(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::Client::new()
        .get(url)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::ModelDownload(format!("HTTP error: {e}")))?;

    let expected = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(expected);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .expect("valid template")
            .progress_chars("#>-"),
    );
    pb.set_message(format!("downloading {}", WhisperModelName(dest)));

    // Stream into a .part file, rename into place once complete, so an
    // interrupted download never masquerades as a cached model.
    let part_path = dest.with_extension("bin.part");
    {
        use std::io::Write;

        let mut file = std::fs::File::create(&part_path)?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)?;
            pb.inc(chunk.len() as u64);
        }
        file.flush()?;
    }

    let actual = std::fs::metadata(&part_path)?.len();
    if actual < MIN_MODEL_BYTES {
        std::fs::remove_file(&part_path).ok();
        return Err(Error::ModelDownload(format!(
            "downloaded file too small ({actual} bytes) — likely an error page"
        )));
    }
    if expected > 0 && actual != expected {
        warn!(expected, actual, "size mismatch — model may be corrupt");
    }

    std::fs::rename(&part_path, dest)?;
    pb.finish_and_clear();

    info!(path = %dest.display(), bytes = actual, "model saved");
    Ok(())
}

/// Display helper: the model filename without its path.
struct WhisperModelName<'a>(&'a Path);

impl std::fmt::Display for WhisperModelName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.file_name() {
            Some(name) => write!(f, "{}", name.to_string_lossy()),
            None => write!(f, "model"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_ensure_model_custom_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.bin");
        fs::write(&path, b"fake model data").unwrap();

        let model = WhisperModel::Custom(path.clone());
        let result = ensure_model(&model, Path::new("/unused")).await;
        assert_eq!(result.unwrap(), path);
    }

    #[tokio::test]
    async fn test_ensure_model_custom_not_found() {
        let model = WhisperModel::Custom(PathBuf::from("/nonexistent/model.bin"));
        let result = ensure_model(&model, Path::new("/unused")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ModelNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_ensure_model_uses_cache() {
        let dir = tempfile::tempdir().unwrap();

        // Pre-populate cache with a fake model
        let model_path = dir.path().join("ggml-base.bin");
        fs::write(&model_path, b"fake cached model").unwrap();

        let result = ensure_model(&WhisperModel::Base, dir.path()).await;
        assert_eq!(result.unwrap(), model_path);
    }
}
