use serde::{Deserialize, Serialize};

use crate::library::TrackId;
use crate::resource::ObjectUrl;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatMode {
    /// Stop at the end of the context.
    #[default]
    #[serde(alias = "no-loop", alias = "no_loop", alias = "none")]
    Off,
    /// Restart the current track when it ends.
    #[serde(alias = "repeat-one", alias = "loop-one", alias = "loop_one")]
    One,
    /// Wrap around at either end of the context.
    #[serde(alias = "repeat-all", alias = "loop-all", alias = "loop_all")]
    All,
}

impl RepeatMode {
    /// `Off -> All -> One -> Off`.
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Snapshot of the transport for observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    /// Position in the playback context; `None` when nothing is loaded.
    pub current_index: Option<usize>,
    pub playing: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub volume: f32,
    /// Seconds.
    pub current_time: f64,
    /// Seconds; 0 until the sink reports it.
    pub duration: f64,
}

/// The live cover image of the current track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cover {
    pub track: TrackId,
    pub url: ObjectUrl,
    pub mime: String,
}
