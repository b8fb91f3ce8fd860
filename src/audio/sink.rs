//! Helper for building `rodio` sinks from in-memory sources.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::SinkError;

use super::MediaSource;

/// Create a paused `Sink` for `source` that starts playback at `start_at`.
///
/// Also returns the decoded source's total length when the decoder knows it.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    source: &MediaSource,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), SinkError> {
    let decoder = Decoder::new(Cursor::new(Arc::clone(&source.data))).map_err(|e| {
        SinkError::Decode {
            name: source.name.clone(),
            reason: e.to_string(),
        }
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}
