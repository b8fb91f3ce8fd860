//! Audio output seam.
//!
//! The player drives exactly one [`AudioSink`]. The sink plays whatever
//! source it was last given and reports progress through [`SinkEvent`]s,
//! which the player drains with `Player::pump`.

use std::sync::Arc;

use crate::error::SinkError;
use crate::resource::ObjectUrl;

mod rodio_sink;
mod sink;

pub use rodio_sink::RodioSink;

/// A playable source bound to a live handle.
#[derive(Debug, Clone)]
pub struct MediaSource {
    pub url: ObjectUrl,
    pub name: String,
    pub mime: String,
    pub data: Arc<[u8]>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// Playback position advanced.
    TimeUpdate,
    /// Duration of the loaded source is known.
    LoadedMetadata,
    /// The loaded source played to its end.
    Ended,
}

/// A single long-lived media element: one source at a time.
pub trait AudioSink {
    /// Replace the current source. The sink is paused afterwards.
    fn load(&mut self, source: MediaSource) -> Result<(), SinkError>;
    /// Drop the current source, if any.
    fn unload(&mut self);
    fn play(&mut self) -> Result<(), SinkError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    /// Length of the loaded source in seconds, when known.
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, volume: f32);
    /// Events raised since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<SinkEvent>;
}

#[cfg(test)]
mod tests;
