/// What the model should do with the speech it hears.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of the task across the
///   CLI and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps task selection
///   explicit and discoverable.
///
/// Integration notes:
/// - `ValueEnum` allows this enum to be used directly as a CLI flag with `clap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Task {
    /// X→X speech recognition: transcribe in the spoken language.
    #[default]
    Transcribe,

    /// X→English speech translation.
    Translate,
}

impl Task {
    /// Whether this task asks Whisper to translate into English.
    pub fn is_translate(self) -> bool {
        matches!(self, Task::Translate)
    }
}
