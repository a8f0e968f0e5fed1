use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader};

/// The sample rate every recognizer input is normalized to (Hz).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Load WAV audio from a reader and return normalized audio samples.
///
/// What we return:
/// - A `Vec<f32>` containing mono audio samples normalized to `[-1.0, 1.0]`
///
/// Format requirements:
/// - Mono (1 channel)
/// - 16-bit PCM at the target sample rate
///
/// Why we enforce this:
/// - enforcing constraints here keeps downstream transcription simple and predictable;
///   anything else goes through the ffmpeg transcode first
pub fn samples_from_wav_reader<R>(reader: R) -> Result<Vec<f32>>
where
    R: Read + Seek,
{
    let mut reader = WavReader::new(reader).context("failed to read WAV data from reader")?;
    let spec = reader.spec();

    // We require mono audio.
    if spec.channels != 1 {
        anyhow::bail!(
            "expected mono WAV (1 channel), got {} channels",
            spec.channels
        );
    }

    // We require the target sample rate.
    if spec.sample_rate != TARGET_SAMPLE_RATE {
        anyhow::bail!(
            "expected {} Hz sample rate, got {} Hz",
            TARGET_SAMPLE_RATE,
            spec.sample_rate
        );
    }

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        anyhow::bail!(
            "expected 16-bit integer PCM, got {}-bit {:?}",
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    // Read samples and normalize from i16 PCM to f32 in [-1.0, 1.0].
    //
    // Most ASR backends expect audio in this normalized floating-point format.
    let mut samples = Vec::new();
    for sample in reader.samples::<i16>() {
        let pcm = sample?;
        let normalized = pcm as f32 / i16::MAX as f32;
        samples.push(normalized);
    }

    Ok(samples)
}

/// Load a WAV file from disk (see [`samples_from_wav_reader`] for constraints).
pub fn samples_from_wav_file(path: &Path) -> Result<Vec<f32>> {
    let file =
        File::open(path).with_context(|| format!("failed to open WAV file: {}", path.display()))?;
    samples_from_wav_reader(BufReader::new(file))
}

/// Whether `path` is a WAV file already in the recognizer's target format
/// (mono 16-bit PCM at the target sample rate).
///
/// Unreadable or non-WAV files simply return false; the caller falls back to
/// transcoding.
pub fn is_target_format_wav(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let Ok(reader) = WavReader::new(BufReader::new(file)) else {
        return false;
    };

    let spec = reader.spec();
    spec.channels == 1
        && spec.sample_rate == TARGET_SAMPLE_RATE
        && spec.sample_format == SampleFormat::Int
        && spec.bits_per_sample == 16
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;

    fn write_wav(spec: WavSpec, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());

        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        cursor.into_inner()
    }

    fn target_spec() -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: TARGET_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn reads_and_normalizes_target_format_wav() -> Result<()> {
        let bytes = write_wav(target_spec(), &[0, i16::MAX, -i16::MAX]);
        let samples = samples_from_wav_reader(Cursor::new(bytes))?;
        assert_eq!(samples, vec![0.0, 1.0, -1.0]);
        Ok(())
    }

    #[test]
    fn rejects_stereo_and_wrong_sample_rate() {
        let mut stereo = target_spec();
        stereo.channels = 2;
        let bytes = write_wav(stereo, &[0, 0]);
        let err = samples_from_wav_reader(Cursor::new(bytes)).unwrap_err();
        assert!(err.to_string().contains("mono"));

        let mut wrong_rate = target_spec();
        wrong_rate.sample_rate = 44_100;
        let bytes = write_wav(wrong_rate, &[0]);
        let err = samples_from_wav_reader(Cursor::new(bytes)).unwrap_err();
        assert!(err.to_string().contains("sample rate"));
    }

    #[test]
    fn target_format_probe_accepts_matching_files_only() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let good = dir.path().join("good.wav");
        std::fs::write(&good, write_wav(target_spec(), &[0, 1, 2]))?;
        assert!(is_target_format_wav(&good));

        let mut stereo = target_spec();
        stereo.channels = 2;
        let bad = dir.path().join("bad.wav");
        std::fs::write(&bad, write_wav(stereo, &[0, 0]))?;
        assert!(!is_target_format_wav(&bad));

        let not_wav = dir.path().join("not.wav");
        std::fs::write(&not_wav, b"definitely not a wav")?;
        assert!(!is_target_format_wav(&not_wav));

        assert!(!is_target_format_wav(&dir.path().join("missing.wav")));
        Ok(())
    }
}
