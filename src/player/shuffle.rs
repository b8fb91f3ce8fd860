use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::library::{Track, TrackId};

/// `first` (when present in `tracks`) at position 0, every other track
/// after it in Fisher–Yates order.
pub(crate) fn shuffle_keep_first<R: Rng + ?Sized>(
    tracks: &[Arc<Track>],
    first: Option<TrackId>,
    rng: &mut R,
) -> Vec<Arc<Track>> {
    let head = first.and_then(|id| tracks.iter().find(|t| t.id == id).cloned());
    let mut rest: Vec<Arc<Track>> = tracks
        .iter()
        .filter(|t| Some(t.id) != head.as_ref().map(|h| h.id))
        .cloned()
        .collect();
    rest.shuffle(rng);

    head.into_iter().chain(rest).collect()
}

/// Order `tracks` by their position in `snapshot`. Tracks the snapshot does
/// not know keep their relative order at the end.
pub(crate) fn restore_order(tracks: &[Arc<Track>], snapshot: &[TrackId]) -> Vec<Arc<Track>> {
    let rank: HashMap<TrackId, usize> = snapshot
        .iter()
        .enumerate()
        .map(|(pos, &id)| (id, pos))
        .collect();

    let mut out = tracks.to_vec();
    out.sort_by_key(|t| rank.get(&t.id).copied().unwrap_or(usize::MAX));
    out
}

/// Pre-shuffle order of the registry and the context.
#[derive(Debug, Clone)]
pub(crate) struct ShuffleSnapshot {
    pub registry: Vec<TrackId>,
    pub context: Vec<TrackId>,
}

pub(crate) fn ids(tracks: &[Arc<Track>]) -> Vec<TrackId> {
    tracks.iter().map(|t| t.id).collect()
}
