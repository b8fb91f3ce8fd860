use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::error::SinkError;

use super::sink::create_sink_at;
use super::{AudioSink, MediaSource, SinkEvent};

/// [`AudioSink`] playing through the default output device.
///
/// Seeking rebuilds the rodio `Sink` and skips into the decoded source, so
/// it works for any format the decoder can open.
pub struct RodioSink {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<MediaSource>,
    total: Option<Duration>,
    // Position the current `Sink` started at; `get_pos` is relative to it.
    offset: Duration,
    volume: f32,
    metadata_pending: bool,
    ended_reported: bool,
}

impl RodioSink {
    pub fn open_default() -> Result<Self, SinkError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| SinkError::Output(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            total: None,
            offset: Duration::ZERO,
            volume: 1.0,
            metadata_pending: false,
            ended_reported: false,
        })
    }

    fn rebuild_at(&mut self, start_at: Duration) -> Result<(), SinkError> {
        let source = self.source.as_ref().ok_or(SinkError::NoSource)?;
        let was_playing = self.sink.as_ref().is_some_and(|s| !s.is_paused());

        let (sink, total) = create_sink_at(&self.stream, source, start_at)?;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        sink.set_volume(self.volume);
        if was_playing {
            sink.play();
        }

        self.sink = Some(sink);
        self.total = total;
        self.offset = start_at;
        self.ended_reported = false;
        Ok(())
    }
}

/// Position to seek to for `secs`, clamped to `total` when the length is
/// known. Values too large for a `Duration` land at the end.
pub(super) fn seek_target(secs: f64, total: Option<Duration>) -> Option<Duration> {
    if secs.is_nan() {
        return None;
    }
    let target = Duration::try_from_secs_f64(secs.max(0.0))
        .unwrap_or_else(|_| total.unwrap_or(Duration::MAX));
    Some(total.map_or(target, |end| target.min(end)))
}

impl AudioSink for RodioSink {
    fn load(&mut self, source: MediaSource) -> Result<(), SinkError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        debug!(url = %source.url, name = %source.name, "loading source");
        self.source = Some(source);
        if let Err(e) = self.rebuild_at(Duration::ZERO) {
            self.source = None;
            self.total = None;
            return Err(e);
        }
        self.metadata_pending = true;
        Ok(())
    }

    fn unload(&mut self) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.source = None;
        self.total = None;
        self.offset = Duration::ZERO;
        self.metadata_pending = false;
        self.ended_reported = false;
    }

    fn play(&mut self) -> Result<(), SinkError> {
        // A finished sink has nothing left to play; start over like a media element would.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.rebuild_at(Duration::ZERO)?;
        }
        let sink = self.sink.as_ref().ok_or(SinkError::NoSource)?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn is_paused(&self) -> bool {
        self.sink.as_ref().is_none_or(Sink::is_paused)
    }

    fn current_time(&self) -> f64 {
        let pos = self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos);
        (self.offset + pos).as_secs_f64()
    }

    fn set_current_time(&mut self, secs: f64) {
        let Some(target) = seek_target(secs, self.total) else {
            return;
        };
        if let Err(e) = self.rebuild_at(target) {
            warn!(error = %e, "seek failed");
        }
    }

    fn duration(&self) -> Option<f64> {
        self.total.map(|d| d.as_secs_f64())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn poll_events(&mut self) -> Vec<SinkEvent> {
        let mut events = Vec::new();
        if std::mem::take(&mut self.metadata_pending) {
            events.push(SinkEvent::LoadedMetadata);
        }
        if let Some(sink) = self.sink.as_ref() {
            if !sink.is_paused() {
                if sink.empty() {
                    if !self.ended_reported {
                        self.ended_reported = true;
                        events.push(SinkEvent::Ended);
                    }
                } else {
                    events.push(SinkEvent::TimeUpdate);
                }
            }
        }
        events
    }
}
