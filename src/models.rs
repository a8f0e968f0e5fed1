//! Whisper model registry and weight management.
//!
//! We keep an allowlist of known-good model artifacts so an unsupported model
//! name is rejected before anything is loaded or downloaded. Weights live in a
//! single root directory, resolved from (in order): an explicit flag, the
//! `AUTOSUB_WHISPER_ROOT` environment variable, and the user cache directory.
//! With the `download` feature enabled, missing weights are fetched on first
//! use the way the original tooling did.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Environment variable overriding the model download root.
pub const MODEL_ROOT_ENV: &str = "AUTOSUB_WHISPER_ROOT";

/// Download source for a known model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    /// Friendly name users type (e.g. "small", "large-v3-turbo").
    pub name: &'static str,

    /// Filename written to disk (e.g. "ggml-small.bin").
    pub filename: &'static str,

    /// Full download URL.
    pub url: &'static str,
}

macro_rules! whisper_model {
    ($name:literal) => {
        ModelSpec {
            name: $name,
            filename: concat!("ggml-", $name, ".bin"),
            url: concat!(
                "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-",
                $name,
                ".bin"
            ),
        }
    };
}

// These URLs match whisper.cpp's standard Hugging Face repo for GGML models.
pub static WHISPER_MODELS: &[ModelSpec] = &[
    whisper_model!("tiny"),
    whisper_model!("tiny.en"),
    whisper_model!("base"),
    whisper_model!("base.en"),
    whisper_model!("small"),
    whisper_model!("small.en"),
    whisper_model!("medium"),
    whisper_model!("medium.en"),
    whisper_model!("large-v1"),
    whisper_model!("large-v2"),
    whisper_model!("large-v3"),
    whisper_model!("large-v3-turbo"),
];

/// Look up a model by its friendly name; unknown names are rejected here,
/// before any model load or download happens.
pub fn lookup_model(name: &str) -> Result<&'static ModelSpec> {
    match WHISPER_MODELS.iter().find(|m| m.name == name) {
        Some(spec) => Ok(spec),
        None => bail!(
            "unsupported model: '{name}' (available: {})",
            model_names().join(", ")
        ),
    }
}

/// The friendly names of every known model, in registry order.
pub fn model_names() -> Vec<&'static str> {
    WHISPER_MODELS.iter().map(|m| m.name).collect()
}

/// Whether a model only understands English (`.en` variants).
pub fn is_english_only(name: &str) -> bool {
    name.ends_with(".en")
}

/// Resolve the directory model weights live in.
///
/// Precedence: explicit flag, then `AUTOSUB_WHISPER_ROOT`, then
/// `<cache dir>/whisper` (e.g. `~/.cache/whisper` on Linux).
pub fn resolve_model_root(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = env::var_os(MODEL_ROOT_ENV) {
        return PathBuf::from(dir);
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("whisper")
}

/// Where a model's weights live under the given root.
pub fn model_path(spec: &ModelSpec, root: &Path) -> PathBuf {
    root.join(spec.filename)
}

/// Make sure the weights for `spec` exist under `root`, downloading them on
/// first use. Returns the on-disk path.
#[cfg(feature = "download")]
pub fn ensure_model(spec: &ModelSpec, root: &Path) -> Result<PathBuf> {
    use anyhow::Context;

    let dest_path = model_path(spec, root);
    if dest_path.exists() {
        return Ok(dest_path);
    }

    std::fs::create_dir_all(root)
        .with_context(|| format!("failed to create model directory: {}", root.display()))?;

    tracing::info!(model = spec.name, url = spec.url, "downloading model weights");

    let client = reqwest::blocking::Client::builder()
        .user_agent("autosub")
        .build()
        .context("failed to build HTTP client")?;

    download::download_to_path(&client, spec.url, &dest_path)?;
    Ok(dest_path)
}

#[cfg(feature = "download")]
mod download {
    use std::fs;
    use std::io::{Read, Write};
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use indicatif::{ProgressBar, ProgressStyle};
    use reqwest::blocking::Client;

    /// Download a URL into `dest_path` safely:
    /// - download to `dest_path.part`
    /// - fsync + rename to final path
    pub(super) fn download_to_path(client: &Client, url: &str, dest_path: &Path) -> Result<()> {
        let resp = client
            .get(url)
            .send()
            .with_context(|| format!("request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("download failed (bad status): {url}"))?;

        let total = resp.content_length();
        download_to_path_with_reader(resp, total, dest_path)
    }

    pub(super) fn download_to_path_with_reader<R: Read>(
        mut reader: R,
        total_bytes: Option<u64>,
        dest_path: &Path,
    ) -> Result<()> {
        let total = total_bytes.unwrap_or(0);

        let pb = if total > 0 {
            ProgressBar::new(total)
        } else {
            ProgressBar::new_spinner()
        };

        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} {bytes}/{total_bytes} {bar:40.cyan/blue} {eta}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }

        let tmp_path = PathBuf::from(format!("{}.part", dest_path.display()));

        let result = (|| -> Result<()> {
            let mut file = fs::File::create(&tmp_path)
                .with_context(|| format!("failed to create temp file: {}", tmp_path.display()))?;

            let mut buf = [0u8; 64 * 1024];
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                file.write_all(&buf[..n])?;
                pb.inc(n as u64);
            }

            file.sync_all()?;
            pb.finish_and_clear();

            fs::rename(&tmp_path, dest_path)
                .with_context(|| format!("failed to move into place: {}", dest_path.display()))?;

            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
            pb.finish_and_clear();
        }

        result
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn download_to_path_with_reader_writes_and_renames() -> anyhow::Result<()> {
            let dir = tempfile::tempdir()?;
            let dest_path = dir.path().join("model.bin");
            let tmp_path = PathBuf::from(format!("{}.part", dest_path.display()));

            let bytes = b"abc123".to_vec();
            download_to_path_with_reader(
                std::io::Cursor::new(bytes.clone()),
                Some(bytes.len() as u64),
                &dest_path,
            )?;

            assert!(dest_path.exists());
            assert!(!tmp_path.exists());
            assert_eq!(std::fs::read(&dest_path)?, bytes);
            Ok(())
        }

        struct ErrorAfterNBytes {
            bytes: Vec<u8>,
            fail_at: usize,
            pos: usize,
        }

        impl Read for ErrorAfterNBytes {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.pos >= self.fail_at {
                    return Err(std::io::Error::other("simulated read failure"));
                }

                let remaining = &self.bytes[self.pos..];
                let n = remaining.len().min(buf.len());
                buf[..n].copy_from_slice(&remaining[..n]);
                self.pos += n;
                Ok(n)
            }
        }

        #[test]
        fn download_to_path_with_reader_cleans_up_part_file_on_error() -> anyhow::Result<()> {
            let dir = tempfile::tempdir()?;
            let dest_path = dir.path().join("model.bin");
            let tmp_path = PathBuf::from(format!("{}.part", dest_path.display()));

            let reader = ErrorAfterNBytes {
                bytes: b"abc123".to_vec(),
                fail_at: 1,
                pos: 0,
            };

            let err = download_to_path_with_reader(reader, Some(6), &dest_path).unwrap_err();
            assert!(err.to_string().contains("simulated read failure"));
            assert!(!dest_path.exists());
            assert!(!tmp_path.exists());
            Ok(())
        }
    }
}
