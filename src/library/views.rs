//! Ordered views over the library, used to pick a playback context.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::model::Track;

fn sort_key(s: &str) -> String {
    s.to_lowercase()
}

/// Every track, ordered by title (case-insensitive, stable for ties).
pub fn songs_by_title(tracks: &[Arc<Track>]) -> Vec<Arc<Track>> {
    let mut out = tracks.to_vec();
    out.sort_by_cached_key(|t| sort_key(&t.title));
    out
}

#[derive(Debug, Clone)]
pub struct ArtistGroup {
    pub name: String,
    /// Songs in library order.
    pub songs: Vec<Arc<Track>>,
    pub albums: BTreeSet<String>,
}

/// Tracks grouped by artist, groups ordered by name.
pub fn artists(tracks: &[Arc<Track>]) -> Vec<ArtistGroup> {
    let mut groups: BTreeMap<(String, String), ArtistGroup> = BTreeMap::new();
    for track in tracks {
        let group = groups
            .entry((sort_key(&track.artist), track.artist.clone()))
            .or_insert_with(|| ArtistGroup {
                name: track.artist.clone(),
                songs: Vec::new(),
                albums: BTreeSet::new(),
            });
        group.songs.push(Arc::clone(track));
        if !track.album.is_empty() {
            group.albums.insert(track.album.clone());
        }
    }
    groups.into_values().collect()
}

#[derive(Debug, Clone)]
pub struct AlbumGroup {
    pub name: String,
    /// Artist of the first track seen for this album.
    pub artist: String,
    /// Songs ordered by title.
    pub songs: Vec<Arc<Track>>,
}

impl AlbumGroup {
    /// The song whose embedded picture stands for the whole album.
    pub fn cover_track(&self) -> Option<&Arc<Track>> {
        self.songs.iter().find(|t| t.has_cover)
    }
}

/// Tracks grouped by album, groups ordered by name.
pub fn albums(tracks: &[Arc<Track>]) -> Vec<AlbumGroup> {
    let mut groups: BTreeMap<(String, String), AlbumGroup> = BTreeMap::new();
    for track in tracks {
        groups
            .entry((sort_key(&track.album), track.album.clone()))
            .or_insert_with(|| AlbumGroup {
                name: track.album.clone(),
                artist: track.artist.clone(),
                songs: Vec::new(),
            })
            .songs
            .push(Arc::clone(track));
    }

    groups
        .into_values()
        .map(|mut album| {
            album.songs = songs_by_title(&album.songs);
            album
        })
        .collect()
}

/// Library totals. Artists and albums are counted by exact name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub songs: usize,
    pub artists: usize,
    pub albums: usize,
}

pub fn stats(tracks: &[Arc<Track>]) -> LibraryStats {
    let artists: BTreeSet<&str> = tracks.iter().map(|t| t.artist.as_str()).collect();
    let albums: BTreeSet<&str> = tracks.iter().map(|t| t.album.as_str()).collect();
    LibraryStats {
        songs: tracks.len(),
        artists: artists.len(),
        albums: albums.len(),
    }
}

/// The group whose name matches `name` case-insensitively.
pub fn find_artist<'a>(groups: &'a [ArtistGroup], name: &str) -> Option<&'a ArtistGroup> {
    groups.iter().find(|g| g.name.eq_ignore_ascii_case(name.trim()))
}

/// The album whose name matches `name` case-insensitively.
pub fn find_album<'a>(groups: &'a [AlbumGroup], name: &str) -> Option<&'a AlbumGroup> {
    groups.iter().find(|g| g.name.eq_ignore_ascii_case(name.trim()))
}
