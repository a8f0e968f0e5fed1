use serde::Serialize;

/// A time-bounded unit of transcribed text.
///
/// Segments come out of the recognizer in chronological order and are written
/// in that order; nothing downstream reorders them.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Segment {
    /// Segment start, in seconds from the beginning of the audio.
    pub start_seconds: f32,

    /// Segment end, in seconds from the beginning of the audio.
    pub end_seconds: f32,

    /// The transcribed (or translated) text.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_serializes_for_downstream_consumers() -> anyhow::Result<()> {
        let seg = Segment {
            start_seconds: 0.5,
            end_seconds: 2.0,
            text: "hello".to_string(),
        };

        let json = serde_json::to_value(&seg)?;
        assert_eq!(json["start_seconds"], 0.5);
        assert_eq!(json["end_seconds"], 2.0);
        assert_eq!(json["text"], "hello");
        Ok(())
    }
}

