use serde::Deserialize;

use crate::player::RepeatMode;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub import: ImportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Repeat mode the player starts in.
    pub repeat: RepeatMode,
    /// Initial output volume in `0.0..=1.0`.
    pub volume: f32,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Put the pre-shuffle order back when shuffle is turned off.
    ///
    /// Off by default: turning shuffle off keeps the shuffled order.
    pub restore_order_on_unshuffle: bool,
    /// Minimum spacing between published time updates (milliseconds).
    pub time_update_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            repeat: RepeatMode::Off,
            volume: 1.0,
            shuffle: false,
            restore_order_on_unshuffle: false,
            time_update_interval_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// File extensions accepted for import (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Files whose MIME type starts with this prefix are accepted regardless of extension.
    pub mime_prefix: String,
    /// Whether to follow symlinks while expanding directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "wav", "ogg", "m4a", "flac"]
                .into_iter()
                .map(String::from)
                .collect(),
            mime_prefix: "audio".to_string(),
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

impl ImportSettings {
    /// Normalized extension list: trimmed, lowercased, without a leading dot.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }
}
