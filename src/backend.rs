use anyhow::Result;

use crate::opts::TranscribeOpts;
use crate::segment::Segment;

/// Pluggable speech recognizer used by [`crate::autosub::Autosub`].
///
/// A recognizer turns mono `f32` samples at the target sample rate into an
/// ordered list of [`Segment`]s. The built-in implementation wraps
/// whisper.cpp; tests swap in fakes so the surrounding pipeline (planning,
/// skip policy, SRT serialization) runs without a model on disk.
///
/// `recognize` takes `&mut self` because real backends hold mutable inference
/// state between calls.
pub trait Recognizer {
    /// Run one full recognition pass over a contiguous sample buffer.
    ///
    /// Segments must be returned in chronological order, as emitted by the
    /// model; callers preserve that order all the way to the subtitle file.
    fn recognize(&mut self, samples_16k_mono: &[f32], opts: &TranscribeOpts)
    -> Result<Vec<Segment>>;
}
