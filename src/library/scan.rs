//! Turning paths given to the host into import input.
//!
//! Directories are walked with the configured recursion rules; explicit
//! file paths are passed through untouched so the import allow-list stays
//! the single place that decides what is audio.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ImportSettings;

use super::blob::AudioBlob;

fn has_allowed_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand `roots` into a list of candidate audio files, in a stable order.
pub fn collect_audio_paths(roots: &[PathBuf], settings: &ImportSettings) -> Vec<PathBuf> {
    let exts = settings.normalized_extensions();
    let mut out: Vec<PathBuf> = Vec::new();

    for root in roots {
        if root.is_file() {
            out.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            warn!(path = %root.display(), "skipping path that is neither file nor directory");
            continue;
        }

        let mut walker = WalkDir::new(root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if path.is_file() && has_allowed_extension(path, &exts) {
                out.push(path.to_path_buf());
            }
        }
    }

    debug!(count = out.len(), "collected candidate files");
    out
}

/// Read every path into memory, skipping (and logging) unreadable ones.
pub fn load_blobs(paths: &[PathBuf]) -> Vec<AudioBlob> {
    paths
        .iter()
        .filter_map(|path| match AudioBlob::open(path) {
            Ok(blob) => Some(blob),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn has_allowed_extension_is_case_insensitive() {
        let exts = ImportSettings::default().normalized_extensions();
        assert!(has_allowed_extension(Path::new("/tmp/a.mp3"), &exts));
        assert!(has_allowed_extension(Path::new("/tmp/a.MP3"), &exts));
        assert!(has_allowed_extension(Path::new("/tmp/a.m4a"), &exts));
        assert!(!has_allowed_extension(Path::new("/tmp/a.txt"), &exts));
        assert!(!has_allowed_extension(Path::new("/tmp/a"), &exts));
    }

    #[test]
    fn collect_filters_non_audio_and_sorts_by_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let paths = collect_audio_paths(&[dir.path().to_path_buf()], &ImportSettings::default());
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ogg", "b.MP3"]);
    }

    #[test]
    fn collect_skips_hidden_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

        let paths = collect_audio_paths(&[dir.path().to_path_buf()], &ImportSettings::default());
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("visible.mp3"));
    }

    #[test]
    fn collect_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"x").unwrap();

        let settings = ImportSettings {
            recursive: false,
            ..ImportSettings::default()
        };
        let paths = collect_audio_paths(&[dir.path().to_path_buf()], &settings);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("root.mp3"));
    }

    #[test]
    fn explicit_files_pass_through_and_load() {
        let dir = tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, b"hello").unwrap();

        let paths = collect_audio_paths(std::slice::from_ref(&notes), &ImportSettings::default());
        assert_eq!(paths, vec![notes.clone()]);

        let missing = dir.path().join("missing.mp3");
        let blobs = load_blobs(&[notes, missing]);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].name(), "notes.txt");
        assert_eq!(blobs[0].mime(), "application/octet-stream");
        assert_eq!(blobs[0].bytes(), b"hello");
    }
}
