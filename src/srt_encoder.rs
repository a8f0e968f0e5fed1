use std::io::Write;

use anyhow::{Result, bail};

use crate::segment_encoder::SegmentEncoder;
use crate::segment::Segment;

/// A `SegmentEncoder` that writes segments in SubRip (SRT) format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - Each segment becomes one numbered block; the counter lives in the encoder
///   so callers never have to thread an index through.
/// - The block layout is the crate's one bit-exact external contract, so the
///   formatting lives here and nowhere else.
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// The 1-based index of the next block to write.
    next_index: usize,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for SrtEncoder<W> {
    /// Write a single numbered SRT block.
    fn write_segment(&mut self, seg: &Segment) -> crate::Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }

        // SRT timing lines always carry hours, even below one hour.
        let start = format_timestamp(seg.start_seconds, true)?;
        let end = format_timestamp(seg.end_seconds, true)?;

        // A literal `-->` inside the text would read as a timing line to many
        // parsers, so it gets softened to `->`.
        let text = seg.text.trim().replace("-->", "->");

        writeln!(&mut self.w, "{}", self.next_index)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{text}")?;

        // Blank line separates blocks.
        writeln!(&mut self.w)?;

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        self.next_index += 1;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> crate::Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// Format seconds into an SRT timestamp (`HH:MM:SS,mmm`).
///
/// When `always_include_hours` is false and the timestamp is below one hour,
/// the hour field is omitted entirely. Negative or non-finite input is an
/// error; timestamps never run backwards past zero.
///
/// Rounding policy: round to the nearest millisecond in `f64` to keep `f32`
/// second counts from drifting.
pub fn format_timestamp(seconds: f32, always_include_hours: bool) -> Result<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("non-negative timestamp expected, got {seconds}");
    }

    let total_ms = (f64::from(seconds) * 1000.0).round() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    if always_include_hours || h > 0 {
        Ok(format!("{h:02}:{m:02}:{s:02},{ms:03}"))
    } else {
        Ok(format!("{m:02}:{s:02},{ms:03}"))
    }
}
