use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::blob::AudioBlob;

/// Session-unique track identity. Minted in increasing order, never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TrackId(pub(crate) u64);

impl TrackId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One imported audio file.
///
/// Cover bytes are not kept here; `has_cover` only records that the file
/// carried one at import time.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub has_cover: bool,
    pub duration: Option<Duration>,
    pub file: AudioBlob,
}
