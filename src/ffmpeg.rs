//! External media tool wrapper.
//!
//! Everything ffmpeg-shaped lives here: transcoding arbitrary media into the
//! recognizer's target WAV format, and burning a subtitle file into a video's
//! picture while the audio stream is copied through untouched. Both calls are
//! synchronous and block until the subprocess exits; stderr is captured and
//! surfaced only on failure.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::wav::TARGET_SAMPLE_RATE;

/// Transcode any media file into a mono 16 kHz 16-bit PCM WAV at `output`.
pub fn transcode_to_wav(input: &Path, output: &Path) -> Result<()> {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-y")
        .arg("-i")
        .arg(input)
        .arg("-vn") // No video
        .arg("-ac")
        .arg("1") // Mono
        .arg("-ar")
        .arg(TARGET_SAMPLE_RATE.to_string())
        .arg("-c:a")
        .arg("pcm_s16le")
        .arg(output);

    run_quiet(cmd, "audio transcode")
}

/// Burn `subtitle` into `video`'s picture, writing the result to `output`.
///
/// Styling is fixed (semi-transparent outline, boxed style) and the original
/// audio stream is copied through unchanged.
pub fn burn_subtitles(video: &Path, subtitle: &Path, output: &Path) -> Result<()> {
    let subtitle = subtitle
        .to_str()
        .context("subtitle path is not valid UTF-8")?;
    let filter = format!(
        "subtitles={}:force_style='OutlineColour=&H40000000,BorderStyle=3'",
        escape_filter_path(subtitle)
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-y")
        .arg("-i")
        .arg(video)
        .arg("-vf")
        .arg(filter)
        .arg("-c:a")
        .arg("copy")
        .arg(output);

    run_quiet(cmd, "subtitle burn-in")
}

/// Run an ffmpeg invocation, suppressing its chatter unless it fails.
fn run_quiet(mut cmd: Command, what: &str) -> Result<()> {
    cmd.stdin(Stdio::null()).stdout(Stdio::null());

    debug!(command = ?cmd, "running ffmpeg");

    let out = cmd
        .output()
        .with_context(|| format!("failed to run ffmpeg for {what} (is ffmpeg installed?)"))?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        // ffmpeg's stderr can be long; the tail carries the actual error.
        let tail: String = stderr
            .lines()
            .rev()
            .take(8)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        bail!("ffmpeg {what} failed ({}):\n{tail}", out.status);
    }

    Ok(())
}

/// Escape a path for use inside an ffmpeg filter graph argument.
///
/// Filter arguments treat `:` as an option separator and `'` / `\` specially,
/// so paths containing them (Windows drives, apostrophes) must be escaped.
fn escape_filter_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '\\' | ':' | '\'' | '[' | ']' | ',' | ';' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
