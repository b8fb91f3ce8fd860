//! The ordered collection of every track imported during the session.

use std::sync::Arc;

use super::model::{Track, TrackId};

#[derive(Debug)]
pub struct Registry {
    tracks: Vec<Arc<Track>>,
    next_id: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
        }
    }

    /// Reserve the next track id.
    pub(crate) fn mint_id(&mut self) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append `track` and return the shared handle stored in the registry.
    pub(crate) fn push(&mut self, track: Track) -> Arc<Track> {
        let track = Arc::new(track);
        self.tracks.push(Arc::clone(&track));
        track
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
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

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn find(&self, id: TrackId) -> Option<&Arc<Track>> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Arc<Track>> {
        (index < self.tracks.len()).then(|| self.tracks.remove(index))
    }

    /// Relocate one entry. Returns `false` (and does nothing) when either
    /// index is out of range.
    pub(crate) fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return false;
        }
        let item = self.tracks.remove(from);
        self.tracks.insert(to, item);
        true
    }

    /// Replace the ordering with `order`, which must be a permutation of the
    /// current entries.
    pub(crate) fn reorder(&mut self, order: Vec<Arc<Track>>) {
        debug_assert_eq!(order.len(), self.tracks.len());
        self.tracks = order;
    }
}
