use crate::Result;
use crate::segment::Segment;

/// Serializes segments, one at a time, into some output format.
///
/// Encoders are stateful: `write_segment` is called once per segment in
/// chronological order, and `close` finalizes the output. Callers own the
/// encoder lifecycle; recognizers never call `close`.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
