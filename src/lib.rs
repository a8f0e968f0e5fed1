//! `autosub` — batch subtitle generation built on top of Whisper and ffmpeg.
//!
//! This crate provides:
//! - Input resolution (files and directories → an ordered transcription plan)
//! - Audio extraction (direct WAV loading, or ffmpeg transcoding to mono 16 kHz PCM)
//! - A pluggable recognizer seam around whisper.cpp
//! - SRT serialization of transcription segments
//! - Optional subtitle burning back into the source video
//!
//! The library is designed to be driven by the `autosub` CLI, but every stage is
//! usable on its own: tests and other frontends can swap in their own recognizer
//! and run the same pipeline without a model or ffmpeg installed.

// High-level API (most consumers should start here).
pub mod autosub;
pub mod opts;

// Input classification and plan building.
pub mod media;
pub mod plan;

// Segment data structures and the encoder seam.
pub mod segment;
pub mod segment_encoder;
pub mod srt_encoder;

// Recognizer seam and the built-in Whisper backend.
pub mod backend;
pub mod backends;

// Model registry and weight management.
pub mod models;

// Audio extraction and the external media tool.
pub mod extract;
pub mod ffmpeg;
pub mod wav;

// Transcription task and language handling.
pub mod lang;
pub mod task;

pub mod error;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub use error::{Error, Result};
