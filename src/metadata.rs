//! Tag extraction seam.
//!
//! The player only needs title/artist/album, an optional embedded picture
//! and, when available, the duration. Anything that can produce those from
//! an in-memory file can stand behind [`MetadataExtractor`].

use std::future::Future;
use std::time::Duration;

use crate::error::ExtractError;
use crate::library::AudioBlob;

mod tags;

pub use tags::LoftyExtractor;

/// Embedded cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub data: Vec<u8>,
    pub mime: String,
}

/// Whatever an extractor managed to read. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagData {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub cover: Option<CoverArt>,
    pub duration: Option<Duration>,
}

/// Reads tags from an imported file. Implementations must not mutate the input.
pub trait MetadataExtractor {
    fn extract(&self, file: &AudioBlob) -> impl Future<Output = Result<TagData, ExtractError>>;
}

#[cfg(test)]
mod tests;
