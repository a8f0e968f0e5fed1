use std::os::raw::{c_char, c_void};
use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result};
use tracing::warn;
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperSegment,
};

use crate::backend::Recognizer;
use crate::opts::TranscribeOpts;
use crate::segment::Segment;

/// Built-in recognizer powered by `whisper-rs` / `whisper.cpp`.
///
/// The context (loaded model weights) is the expensive part; we load it once
/// and reuse it across every file in a batch.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
}

impl WhisperRecognizer {
    /// Load a whisper.cpp model from disk and initialize a recognizer.
    ///
    /// `use_gpu` is an opt-in: when the crate was built without an acceleration
    /// feature we warn and fall back to the CPU rather than failing the run.
    pub fn new(model_path: &Path, use_gpu: bool) -> Result<Self> {
        // Whisper can be very chatty; keep it quiet so stdout/stderr stay ours.
        init_whisper_logging();

        let gpu_compiled = cfg!(any(
            feature = "cuda",
            feature = "metal",
            feature = "hipblas",
            feature = "vulkan",
            feature = "coreml",
        ));
        if use_gpu && !gpu_compiled {
            warn!("GPU requested but no GPU backend was compiled in; falling back to CPU");
        }

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(use_gpu && gpu_compiled);

        let model_path = model_path
            .to_str()
            .context("model path is not valid UTF-8")?;
        let ctx = WhisperContext::new_with_params(model_path, ctx_params)
            .with_context(|| format!("failed to load model from path: {model_path}"))?;

        Ok(Self { ctx })
    }
}

/// A no-op log callback used to silence logs emitted by whisper.cpp.
unsafe extern "C" fn whisper_log_callback(
    _level: u32,
    _c_msg: *const c_char,
    _user_data: *mut c_void,
) {
    // Intentionally left empty.
}

/// Ensure whisper logging is configured exactly once for the lifetime of the process.
pub fn init_whisper_logging() {
    static INIT: Once = Once::new();

    INIT.call_once(|| unsafe {
        whisper_rs::set_log_callback(Some(whisper_log_callback), std::ptr::null_mut());
    });
}

impl Recognizer for WhisperRecognizer {
    fn recognize(
        &mut self,
        samples_16k_mono: &[f32],
        opts: &TranscribeOpts,
    ) -> Result<Vec<Segment>> {
        let params = build_params(opts);

        let mut state = self
            .ctx
            .create_state()
            .context("failed to create whisper state")?;

        state
            .full(params, samples_16k_mono)
            .context("failed to run whisper inference")?;

        let mut segments = Vec::new();
        for segment in state.as_iter() {
            segments.push(convert_segment(segment)?);
        }

        Ok(segments)
    }
}

/// Map our immutable options onto whisper.cpp's `FullParams`.
fn build_params(opts: &TranscribeOpts) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(opts.task.is_translate());
    params.set_language(opts.language.as_deref());
    if let Some(prompt) = opts.initial_prompt.as_deref() {
        params.set_initial_prompt(prompt);
    }

    params.set_no_context(true);
    params.set_single_segment(false);
    params.set_print_special(false);
    params.set_print_timestamps(false);

    // Whisper's own progress output doubles as our verbose mode.
    params.set_print_progress(opts.verbose);
    params.set_print_realtime(opts.verbose);

    params
}

fn convert_segment(segment: WhisperSegment) -> Result<Segment> {
    let start_seconds = centiseconds_to_seconds(segment.start_timestamp());
    let end_seconds = centiseconds_to_seconds(segment.end_timestamp());
    let text = segment
        .to_str()
        .context("failed to get segment text")?
        .to_owned();

    Ok(Segment {
        start_seconds,
        end_seconds,
        text,
    })
}

/// Whisper timestamps are centisecond ticks (units of 10 ms); unknown
/// timestamps are -1, clamped to 0.
fn centiseconds_to_seconds(value: i64) -> f32 {
    if value < 0 { 0.0 } else { value as f32 / 100.0 }
}
