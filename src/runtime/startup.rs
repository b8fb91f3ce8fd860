use std::path::PathBuf;

use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::audio::AudioSink;
use crate::config::{ImportSettings, Settings};
use crate::library::AudioBlob;
use crate::library::scan::{collect_audio_paths, load_blobs};
use crate::metadata::MetadataExtractor;
use crate::player::Player;

/// Log to stderr; stdout stays free for command feedback.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,encore=debug".into());

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if initialized.is_err() {
        debug!("tracing subscriber already installed");
    }
}

/// Expand `roots` into in-memory files ready for import.
pub fn load_inputs(roots: &[PathBuf], settings: &ImportSettings) -> Vec<AudioBlob> {
    let paths = collect_audio_paths(roots, settings);
    if paths.is_empty() {
        warn!(?roots, "no audio files found");
        return Vec::new();
    }
    debug!(count = paths.len(), "reading files");
    load_blobs(&paths)
}

/// Settings that only make sense once the library is loaded.
pub fn apply_playback_defaults<S: AudioSink, E: MetadataExtractor>(
    player: &mut Player<S, E>,
    settings: &Settings,
) {
    if settings.playback.shuffle && !player.state().shuffle {
        player.toggle_shuffle();
    }
}
