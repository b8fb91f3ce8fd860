//! The ordered list currently being played through.
//!
//! `current` only ever indexes this list, never the registry. Every edit
//! goes through [`PlaybackContext::remove_at`], [`PlaybackContext::move_item`]
//! or [`PlaybackContext::reorder`], which keep `current` on the same track.

use std::sync::Arc;

use serde::Serialize;

use crate::library::{Track, TrackId};

/// Where the context's ordering came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ContextSource {
    /// Mirrors the registry: imports, removals and moves are applied to both.
    Queue,
    /// A list picked by the caller (sorted songs, an artist, an album).
    /// Registry moves do not affect it; removed tracks drop out of it.
    Selection,
}

/// How a removal related to the current entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Removal {
    BeforeCurrent,
    Current,
    AfterCurrent,
}

#[derive(Debug)]
pub struct PlaybackContext {
    tracks: Vec<Arc<Track>>,
    source: ContextSource,
    current: Option<usize>,
}

impl Default for PlaybackContext {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            source: ContextSource::Queue,
            current: None,
        }
    }
}

impl PlaybackContext {
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn source(&self) -> ContextSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Track>> {
        self.tracks.get(index)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Arc<Track>> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Swap in a new list. Nothing is current afterwards.
    pub(crate) fn replace(&mut self, tracks: Vec<Arc<Track>>, source: ContextSource) {
        self.tracks = tracks;
        self.source = source;
        self.current = None;
    }

    pub(crate) fn set_current(&mut self, index: Option<usize>) {
        self.current = index.filter(|&i| i < self.tracks.len());
    }

    pub(crate) fn push(&mut self, track: Arc<Track>) {
        self.tracks.push(track);
    }

    /// Remove the entry at `pos`, shifting `current` so it keeps naming the
    /// same track. Removing the current entry clears `current`.
    pub(crate) fn remove_at(&mut self, pos: usize) -> Option<Removal> {
        if pos >= self.tracks.len() {
            return None;
        }
        self.tracks.remove(pos);

        let removal = match self.current {
            Some(cur) if pos < cur => {
                self.current = Some(cur - 1);
                Removal::BeforeCurrent
            }
            Some(cur) if pos == cur => {
                self.current = None;
                Removal::Current
            }
            _ => Removal::AfterCurrent,
        };
        Some(removal)
    }

    /// Relocate one entry, keeping `current` on the same track.
    pub(crate) fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return false;
        }
        let item = self.tracks.remove(from);
        self.tracks.insert(to, item);

        if let Some(cur) = self.current {
            self.current = Some(adjust_for_move(cur, from, to));
        }
        true
    }

    /// Replace the ordering with a permutation of the same tracks; `current`
    /// follows its track to the new position.
    pub(crate) fn reorder(&mut self, order: Vec<Arc<Track>>) {
        let current_id = self.current_track().map(|t| t.id);
        self.tracks = order;
        self.current = current_id.and_then(|id| self.position(id));
    }
}

/// Where index `cur` ends up after moving the entry at `from` to `to`.
pub(crate) fn adjust_for_move(cur: usize, from: usize, to: usize) -> usize {
    if from == cur {
        to
    } else if from < cur && to >= cur {
        cur - 1
    } else if from > cur && to <= cur {
        cur + 1
    } else {
        cur
    }
}
