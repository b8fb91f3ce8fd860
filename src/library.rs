//! Track library: imported tracks, the registry that orders them, the import
//! bookkeeping and the list views used to build playback contexts.

mod blob;
mod import;
mod model;
mod registry;
pub mod scan;
pub mod views;

pub use blob::AudioBlob;
pub use import::{
    FailedFile, ImportBatch, ImportCancel, ImportProgress, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
    fallback_title, is_importable,
};
pub(crate) use import::{fallback_track, track_from_tags};
pub use model::{Track, TrackId};
pub use registry::Registry;
