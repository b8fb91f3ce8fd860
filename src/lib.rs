//! Playback and queue core for a local-file music player.
//!
//! [`Player`] is the entry point: it imports files into a [`Registry`],
//! plays through a [`PlaybackContext`] with shuffle and repeat, and keeps
//! object-URL style handles for the playing source and its cover.

pub mod audio;
pub mod config;
pub mod error;
pub mod library;
pub mod metadata;
pub mod player;
pub mod resource;
pub mod runtime;

pub use audio::{AudioSink, MediaSource, RodioSink, SinkEvent};
pub use config::Settings;
pub use error::{ExtractError, SinkError};
pub use library::{AudioBlob, ImportBatch, ImportCancel, ImportProgress, Registry, Track, TrackId};
pub use metadata::{LoftyExtractor, MetadataExtractor, TagData};
pub use player::{ContextSource, PlaybackContext, Player, PlayerState, RepeatMode};
