//! Audio extraction for the transcription pipeline.
//!
//! The recognizer wants mono 16 kHz normalized `f32`. A WAV file already in
//! that format loads directly; everything else (videos, compressed audio)
//! takes a trip through ffmpeg into a scratch directory that is removed
//! unconditionally once the samples are in memory.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::ffmpeg::transcode_to_wav;
use crate::wav::{is_target_format_wav, samples_from_wav_file};

/// Extract a file's audio as mono 16 kHz samples normalized to `[-1.0, 1.0]`.
pub fn extract_audio(path: &Path) -> Result<Vec<f32>> {
    if is_target_format_wav(path) {
        debug!(path = %path.display(), "loading WAV directly");
        return samples_from_wav_file(path);
    }

    // Scratch space for the transcoded WAV; dropped (and deleted) on every
    // exit path out of this function.
    let scratch = tempfile::tempdir().context("failed to create scratch directory")?;

    let stem = path
        .file_stem()
        .unwrap_or_else(|| "audio".as_ref())
        .to_os_string();
    let mut wav_name = stem;
    wav_name.push(".wav");
    let wav_path = scratch.path().join(wav_name);

    debug!(path = %path.display(), "transcoding to mono 16 kHz WAV");
    transcode_to_wav(path, &wav_path)
        .with_context(|| format!("failed to extract audio from {}", path.display()))?;

    samples_from_wav_file(&wav_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::TARGET_SAMPLE_RATE;
    use hound::{SampleFormat, WavSpec, WavWriter};

    #[test]
    fn target_format_wav_loads_without_ffmpeg() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("speech.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: TARGET_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec)?;
        for s in [0i16, 1000, -1000] {
            writer.write_sample(s)?;
        }
        writer.finalize()?;

        let samples = extract_audio(&path)?;
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        Ok(())
    }
}
