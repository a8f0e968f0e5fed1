use crate::task::Task;

/// Options that control how a single transcription is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
///
/// The struct is immutable once built: the pipeline takes it by reference and
/// never mutates it mid-run, so every file in a batch sees identical settings.
#[derive(Debug, Clone, Default)]
pub struct TranscribeOpts {
    /// Whether to transcribe verbatim or translate speech into English.
    pub task: Task,

    /// Optional language hint as a Whisper language code (e.g. `"en"`, `"zh"`).
    ///
    /// When `None`, we allow Whisper to auto-detect the spoken language.
    pub language: Option<String>,

    /// Optional text fed to the model before the first audio window.
    ///
    /// Useful for priming the model with names, jargon, or a style.
    pub initial_prompt: Option<String>,

    /// Whether the model should print token-level progress as it decodes.
    ///
    /// This maps to whisper.cpp's realtime printing; the CLI ties it to `-v`.
    pub verbose: bool,
}
