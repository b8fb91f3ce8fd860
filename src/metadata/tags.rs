use std::io::Cursor;

use lofty::file::{AudioFile as _, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};

use crate::error::ExtractError;
use crate::library::AudioBlob;

use super::{CoverArt, MetadataExtractor, TagData};

/// [`MetadataExtractor`] backed by `lofty`, reading straight from the blob's bytes.
///
/// Parsing is synchronous; the returned future completes on first poll.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyExtractor;

impl MetadataExtractor for LoftyExtractor {
    async fn extract(&self, file: &AudioBlob) -> Result<TagData, ExtractError> {
        read_tags(file.bytes())
    }
}

fn non_blank(v: Option<impl AsRef<str>>) -> Option<String> {
    v.map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(super) fn read_tags(bytes: &[u8]) -> Result<TagData, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::Malformed("empty file".into()));
    }
    // Sniffing failures arrive as `io::Error`, parse failures as `LoftyError`.
    let tagged = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;

    let mut data = TagData {
        duration: Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        ..TagData::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        data.title = non_blank(tag.title());
        data.artist = non_blank(tag.artist());
        data.album = non_blank(tag.album());
        data.album_artist = non_blank(tag.get_string(&ItemKey::AlbumArtist));
        data.artists = tag
            .get_strings(&ItemKey::TrackArtist)
            .filter_map(|a| non_blank(Some(a)))
            .collect();
        data.cover = tag.pictures().first().map(|pic| CoverArt {
            data: pic.data().to_vec(),
            mime: pic
                .mime_type()
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
        });
    }

    Ok(data)
}
