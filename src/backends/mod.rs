//! Recognizer implementations.
//!
//! Today there is a single backend (whisper.cpp via `whisper-rs`); the module
//! exists so alternative engines can slot in behind [`crate::backend::Recognizer`].

pub mod whisper;
