//! Import bookkeeping: allow-list filtering, fallback naming, progress
//! accounting and the pending-file batch.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::config::ImportSettings;
use crate::metadata::TagData;

use super::blob::AudioBlob;
use super::model::{Track, TrackId};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Whether `file` passes the import allow-list: a configured extension, or a
/// MIME type starting with the configured prefix.
pub fn is_importable(file: &AudioBlob, settings: &ImportSettings) -> bool {
    let prefix = settings.mime_prefix.trim();
    if !prefix.is_empty() && file.mime().to_ascii_lowercase().starts_with(&prefix.to_ascii_lowercase()) {
        return true;
    }

    file.extension()
        .map(|ext| settings.normalized_extensions().iter().any(|e| *e == ext))
        .unwrap_or(false)
}

/// The file name with its last extension removed (`"a.b.mp3"` -> `"a.b"`).
///
/// Names that would become empty (`".mp3"`) are returned unchanged.
pub fn fallback_title(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => {
            stem.to_string()
        }
        _ => name.to_string(),
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Build a track from extracted tags. Cover bytes are dropped here.
pub(crate) fn track_from_tags(id: TrackId, file: AudioBlob, tags: TagData) -> Track {
    let title = non_blank(tags.title).unwrap_or_else(|| fallback_title(file.name()));
    let joined = (!tags.artists.is_empty()).then(|| tags.artists.join(", "));
    let artist = non_blank(tags.artist)
        .or_else(|| non_blank(tags.album_artist))
        .or_else(|| non_blank(joined))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
    let album = non_blank(tags.album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string());

    Track {
        id,
        title,
        artist,
        album,
        has_cover: tags.cover.is_some(),
        duration: tags.duration,
        file,
    }
}

/// Build a track for a file whose tags could not be read.
pub(crate) fn fallback_track(id: TrackId, file: AudioBlob) -> Track {
    Track {
        id,
        title: fallback_title(file.name()),
        artist: UNKNOWN_ARTIST.to_string(),
        album: UNKNOWN_ALBUM.to_string(),
        has_cover: false,
        duration: None,
        file,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub name: String,
    pub error: String,
}

/// Progress of the most recent import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportProgress {
    pub is_loading: bool,
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub failed_files: Vec<FailedFile>,
    /// The batch stopped early because its cancel token was set.
    pub cancelled: bool,
}

impl ImportProgress {
    pub(crate) fn started(total: usize) -> Self {
        Self {
            is_loading: true,
            total,
            ..Self::default()
        }
    }

    pub(crate) fn record_success(&mut self) {
        self.processed += 1;
        self.successful += 1;
    }

    pub(crate) fn record_failure(&mut self, name: &str, error: String) {
        self.processed += 1;
        self.failed += 1;
        self.failed_files.push(FailedFile {
            name: name.to_string(),
            error,
        });
    }
}

/// Cooperative cancel flag for an import batch; safe to set from another thread.
#[derive(Debug, Clone, Default)]
pub struct ImportCancel(Arc<AtomicBool>);

impl ImportCancel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Files still waiting to be imported, in input order.
#[derive(Debug)]
pub struct ImportBatch {
    pending: VecDeque<AudioBlob>,
    cancel: ImportCancel,
    finished: bool,
}

impl ImportBatch {
    pub(crate) fn new(files: Vec<AudioBlob>) -> Self {
        Self {
            pending: files.into(),
            cancel: ImportCancel::new(),
            finished: false,
        }
    }

    /// A token that stops this batch before its next file.
    pub fn cancel_token(&self) -> ImportCancel {
        self.cancel.clone()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Whether the batch ran out or was cancelled, and progress says so.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn next_file(&mut self) -> Option<AudioBlob> {
        self.pending.pop_front()
    }
}
