//! High-level API for running batch transcriptions.
//!
//! We expose a single entry point (`Autosub`) that wires the lower-level
//! pieces together: plan → audio extraction → recognition → SRT, then the
//! optional embedding pass.
//!
//! The intent is:
//! - We load the model once (expensive).
//! - We reuse it to transcribe every file in the plan, strictly one at a time.
//! - A failing file is logged and counted, and the run continues; callers
//!   inspect the returned [`RunSummary`] to decide how to exit.
//!
//! The recognizer is generic so tests (and other frontends) can run the whole
//! pipeline without model weights or ffmpeg installed.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::backend::Recognizer;
use crate::backends::whisper::WhisperRecognizer;
use crate::extract::extract_audio;
use crate::ffmpeg::burn_subtitles;
use crate::media::is_video;
use crate::opts::TranscribeOpts;
use crate::plan::PlannedJob;
use crate::segment_encoder::SegmentEncoder;
use crate::srt_encoder::SrtEncoder;

/// The main high-level transcription entry point.
///
/// `Autosub` owns the long-lived resources: the loaded recognizer and the
/// immutable options every file is transcribed with.
pub struct Autosub<R: Recognizer = WhisperRecognizer> {
    recognizer: R,
    opts: TranscribeOpts,
}

/// What happened over a whole run.
///
/// Per-file failures do not abort the batch; they end up here so the caller
/// can report them and pick an exit code.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files transcribed (subtitle written).
    pub transcribed: usize,

    /// Files skipped because their output already existed.
    pub skipped: usize,

    /// Videos that had subtitles burned in.
    pub embedded: usize,

    /// Files that failed, with the error rendered for reporting.
    pub failures: Vec<(PathBuf, String)>,
}

impl RunSummary {
    /// Whether every planned file was processed without error.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Autosub<WhisperRecognizer> {
    /// Load a Whisper model and build a ready-to-run pipeline.
    pub fn new(model_path: &Path, use_gpu: bool, opts: TranscribeOpts) -> Result<Self> {
        info!(model = %model_path.display(), "loading Whisper model");
        let recognizer = WhisperRecognizer::new(model_path, use_gpu)?;
        Ok(Self::with_recognizer(recognizer, opts))
    }
}

impl<R: Recognizer> Autosub<R> {
    /// Build a pipeline around a custom recognizer.
    pub fn with_recognizer(recognizer: R, opts: TranscribeOpts) -> Self {
        Self { recognizer, opts }
    }

    /// Access the configured options.
    pub fn opts(&self) -> &TranscribeOpts {
        &self.opts
    }

    /// Access the configured recognizer.
    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Transcribe one file to `subtitle`.
    ///
    /// Returns `Ok(false)` when the subtitle already exists and `overwrite` is
    /// off; the recognizer is not invoked in that case.
    pub fn transcribe_file(
        &mut self,
        input: &Path,
        subtitle: &Path,
        overwrite: bool,
    ) -> Result<bool> {
        if !overwrite && subtitle.exists() {
            info!(
                input = %input.display(),
                subtitle = %subtitle.display(),
                "skipping: subtitle already exists",
            );
            return Ok(false);
        }

        info!(input = %input.display(), "extracting audio");
        let samples = extract_audio(input)?;

        info!(input = %input.display(), "transcribing");
        let segments = self.recognizer.recognize(&samples, &self.opts)?;

        let file = File::create(subtitle)
            .with_context(|| format!("failed to create subtitle file: {}", subtitle.display()))?;
        let mut encoder = SrtEncoder::new(BufWriter::new(file));
        for segment in &segments {
            encoder.write_segment(segment)?;
        }
        encoder.close()?;

        info!(
            subtitle = %subtitle.display(),
            segments = segments.len(),
            "wrote subtitles",
        );
        Ok(true)
    }

    /// Run the full pipeline over an ordered plan.
    ///
    /// Every file is fully processed before the next begins; when `embed` is
    /// set, the embedding pass runs after all transcriptions complete.
    pub fn run(&mut self, jobs: &[PlannedJob], overwrite: bool, embed: bool) -> RunSummary {
        let mut summary = RunSummary::default();

        for job in jobs {
            match self.transcribe_file(&job.input, &job.subtitle, overwrite) {
                Ok(true) => summary.transcribed += 1,
                Ok(false) => summary.skipped += 1,
                Err(err) => {
                    error!(input = %job.input.display(), error = %format!("{err:#}"), "transcription failed");
                    summary.failures.push((job.input.clone(), format!("{err:#}")));
                }
            }
        }

        if embed {
            info!("embedding subtitles into videos");
            for job in jobs {
                match embed_job(job, overwrite) {
                    Ok(true) => summary.embedded += 1,
                    Ok(false) => {}
                    Err(err) => {
                        error!(input = %job.input.display(), error = %format!("{err:#}"), "embedding failed");
                        summary.failures.push((job.input.clone(), format!("{err:#}")));
                    }
                }
            }
        }

        summary
    }
}

/// Where an embedded copy of a job's video goes: the subtitle's stem plus a
/// `_transcript` suffix, with the video's own extension, next to the subtitle.
pub fn embedded_output_path(job: &PlannedJob) -> PathBuf {
    let stem = job
        .subtitle
        .file_stem()
        .unwrap_or_else(|| "out".as_ref())
        .to_string_lossy();
    let mut name = format!("{stem}_transcript");
    if let Some(ext) = job.input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    job.subtitle.with_file_name(name)
}

/// Burn one job's subtitles into its video. Returns `Ok(false)` when the job
/// was skipped (not a video, missing subtitle, or output already present).
fn embed_job(job: &PlannedJob, overwrite: bool) -> Result<bool> {
    if !is_video(&job.input) {
        warn!(input = %job.input.display(), "skipping embed: not a video");
        return Ok(false);
    }
    if !job.subtitle.exists() {
        warn!(
            input = %job.input.display(),
            subtitle = %job.subtitle.display(),
            "skipping embed: subtitle missing",
        );
        return Ok(false);
    }

    let output = embedded_output_path(job);
    if !overwrite && output.exists() {
        info!(output = %output.display(), "skipping embed: output already exists");
        return Ok(false);
    }

    info!(input = %job.input.display(), output = %output.display(), "burning subtitles");
    burn_subtitles(&job.input, &job.subtitle, &output)?;
    Ok(true)
}
