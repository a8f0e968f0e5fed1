//! Input classification and directory collection.
//!
//! We classify files by the MIME type their extension implies, the same way the
//! usual `video/*` / `audio/*` split works. Anything without a recognized media
//! extension is neither, and never enters the transcription plan.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extensions whose inferred MIME type is `video/*`.
static VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mkv", "webm", "mov", "avi", "wmv", "flv", "mpg", "mpeg", "ts", "3gp", "ogv",
];

/// Extensions whose inferred MIME type is `audio/*`.
static AUDIO_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "m4a", "flac", "ogg", "oga", "opus", "aac", "wma", "aif", "aiff", "amr",
];

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Whether the path's extension implies a `video/*` MIME type.
pub fn is_video(path: &Path) -> bool {
    extension_lowercase(path).is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the path's extension implies an `audio/*` MIME type.
pub fn is_audio(path: &Path) -> bool {
    extension_lowercase(path).is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the path classifies as either video or audio.
pub fn is_media(path: &Path) -> bool {
    is_video(path) || is_audio(path)
}

/// Enumerate media files under `dir`.
///
/// When `recursive` is false only the immediate entries of `dir` are considered;
/// otherwise subdirectories are walked depth-first. Entries are sorted by name
/// at every level so the resulting order is a documented contract rather than
/// whatever the filesystem happens to return.
pub fn collect_media_paths(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_into(dir, recursive, &mut found)?;
    Ok(found)
}

fn collect_into(dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("failed to list directory: {}", dir.display()))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if recursive {
                collect_into(&path, recursive, found)?;
            }
        } else if is_media(&path) {
            found.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn classification_partitions_on_extension() {
        assert!(is_video(Path::new("a.mp4")));
        assert!(!is_audio(Path::new("a.mp4")));

        assert!(is_audio(Path::new("a.wav")));
        assert!(!is_video(Path::new("a.wav")));

        assert!(!is_video(Path::new("a.txt")));
        assert!(!is_audio(Path::new("a.txt")));
        assert!(!is_media(Path::new("a.txt")));
        assert!(!is_media(Path::new("no_extension")));
    }

    #[test]
    fn classification_ignores_extension_case() {
        assert!(is_video(Path::new("A.MP4")));
        assert!(is_audio(Path::new("B.Flac")));
    }

    #[test]
    fn collect_non_recursive_returns_only_media_in_immediate_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        File::create(dir.path().join("v1.mp4"))?;
        File::create(dir.path().join("v2.wav"))?;
        File::create(dir.path().join("notes.txt"))?;
        fs::create_dir(dir.path().join("nested"))?;
        File::create(dir.path().join("nested").join("v3.mkv"))?;

        let found = collect_media_paths(dir.path(), false)?;
        assert_eq!(
            found,
            vec![dir.path().join("v1.mp4"), dir.path().join("v2.wav")]
        );
        Ok(())
    }

    #[test]
    fn collect_recursive_walks_subdirectories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        File::create(dir.path().join("v1.mp4"))?;
        fs::create_dir(dir.path().join("nested"))?;
        File::create(dir.path().join("nested").join("v3.mkv"))?;

        let found = collect_media_paths(dir.path(), true)?;
        assert_eq!(
            found,
            vec![
                dir.path().join("nested").join("v3.mkv"),
                dir.path().join("v1.mp4"),
            ]
        );
        Ok(())
    }
}
