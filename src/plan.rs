//! Transcription plan building.
//!
//! A run operates over an explicit, ordered list of (source, subtitle) pairs.
//! We build the plan once, up front, and the pipeline then iterates it
//! read-only. Keeping the pairs in a `Vec` (rather than a map) makes the
//! processing order a documented contract: inputs are visited in the order
//! given on the command line, with directory contents in sorted order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::warn;

use crate::media::{collect_media_paths, is_media};

/// One planned piece of work: a media file and where its subtitles go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedJob {
    /// The source video or audio file.
    pub input: PathBuf,

    /// The destination `.srt` path.
    pub subtitle: PathBuf,
}

/// Resolve the directory a file's outputs should land in.
///
/// With an explicit output directory every output goes there; otherwise each
/// output sits next to its input.
pub fn resolve_output_dir(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
    }
}

/// The subtitle path for a given input: same stem, `.srt` extension, placed in
/// the resolved output directory.
pub fn subtitle_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = input.with_extension("srt");
    let name = name.file_name().unwrap_or_else(|| "out.srt".as_ref());
    resolve_output_dir(input, output_dir).join(name)
}

/// Expand the user's inputs into an ordered plan.
///
/// - Directories are expanded (never stored themselves); `recursive` controls
///   whether subdirectories are walked.
/// - A file argument that is not a media file is skipped with a warning.
/// - A missing path is a usage error, surfaced before any processing begins.
/// - Each source appears at most once, first mention wins.
pub fn build_plan(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    recursive: bool,
) -> Result<Vec<PlannedJob>> {
    if inputs.is_empty() {
        bail!("no input files or directories specified");
    }

    let mut jobs = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    let mut push = |input: PathBuf, jobs: &mut Vec<PlannedJob>| {
        if seen.insert(input.clone()) {
            let subtitle = subtitle_path(&input, output_dir);
            jobs.push(PlannedJob { input, subtitle });
        }
    };

    for input in inputs {
        if input.is_dir() {
            for path in collect_media_paths(input, recursive)? {
                push(path, &mut jobs);
            }
        } else if input.is_file() {
            if is_media(input) {
                push(input.clone(), &mut jobs);
            } else {
                warn!(path = %input.display(), "skipping input: not a video or audio file");
            }
        } else {
            bail!("input does not exist: {}", input.display());
        }
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn output_dir_defaults_to_input_parent() {
        let input = Path::new("/videos/talk.mp4");
        assert_eq!(resolve_output_dir(input, None), Path::new("/videos"));
        assert_eq!(
            resolve_output_dir(input, Some(Path::new("/out"))),
            Path::new("/out")
        );
    }

    #[test]
    fn subtitle_path_swaps_extension_and_directory() {
        assert_eq!(
            subtitle_path(Path::new("/videos/talk.mp4"), None),
            Path::new("/videos/talk.srt")
        );
        assert_eq!(
            subtitle_path(Path::new("/videos/talk.mp4"), Some(Path::new("/out"))),
            Path::new("/out/talk.srt")
        );
    }

    #[test]
    fn plan_expands_directories_and_keeps_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        File::create(dir.path().join("b.mp4"))?;
        File::create(dir.path().join("a.wav"))?;
        File::create(dir.path().join("notes.txt"))?;

        let jobs = build_plan(&[dir.path().to_path_buf()], None, false)?;
        let inputs: Vec<_> = jobs.iter().map(|j| j.input.clone()).collect();
        assert_eq!(
            inputs,
            vec![dir.path().join("a.wav"), dir.path().join("b.mp4")]
        );
        assert_eq!(jobs[0].subtitle, dir.path().join("a.srt"));
        Ok(())
    }

    #[test]
    fn plan_deduplicates_repeated_sources() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let video = dir.path().join("talk.mp4");
        File::create(&video)?;

        // The same file named directly and via its directory.
        let jobs = build_plan(&[video.clone(), dir.path().to_path_buf()], None, false)?;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].input, video);
        Ok(())
    }

    #[test]
    fn plan_skips_non_media_file_arguments() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let text = dir.path().join("notes.txt");
        let video = dir.path().join("talk.mp4");
        File::create(&text)?;
        File::create(&video)?;

        let jobs = build_plan(&[text, video.clone()], None, false)?;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].input, video);
        Ok(())
    }

    #[test]
    fn plan_rejects_missing_inputs_and_empty_input_lists() -> Result<()> {
        let err = build_plan(&[], None, false).unwrap_err();
        assert!(err.to_string().contains("no input"));

        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("gone.mp4");
        let err = build_plan(&[missing], None, false).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        Ok(())
    }

    #[test]
    fn plan_honors_explicit_output_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("out");
        fs::create_dir(&out)?;
        let video = dir.path().join("talk.mp4");
        File::create(&video)?;

        let jobs = build_plan(&[video], Some(&out), false)?;
        assert_eq!(jobs[0].subtitle, out.join("talk.srt"));
        Ok(())
    }
}
