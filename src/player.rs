//! The playback and queue core.
//!
//! [`Player`] owns the registry of imported tracks, the playback context,
//! transport state, the audio sink and both live handles (the playable
//! source and the cover image). Callers only ever go through its command
//! surface; the sink is never handed out.
//!
//! Nothing here returns an error. Failures end up as state: import progress
//! entries, a missing cover, or a stopped transport.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{AudioSink, MediaSource, SinkEvent};
use crate::config::{ImportSettings, Settings};
use crate::library::{
    AudioBlob, ImportBatch, ImportProgress, Registry, Track, TrackId, fallback_track,
    is_importable, track_from_tags,
};
use crate::metadata::{MetadataExtractor, TagData};
use crate::resource::{LiveHandle, ObjectUrl, ObjectUrls, UrlEntry};

mod context;
mod shuffle;
mod state;
mod time;

pub use context::{ContextSource, PlaybackContext};
pub use state::{Cover, PlayerState, RepeatMode};
pub use time::TimeThrottle;

use context::Removal;
use shuffle::{ShuffleSnapshot, ids, restore_order, shuffle_keep_first};

pub struct Player<S: AudioSink, E: MetadataExtractor> {
    sink: S,
    extractor: E,
    import_settings: ImportSettings,
    restore_order_on_unshuffle: bool,

    registry: Registry,
    context: PlaybackContext,

    playing: bool,
    shuffle: bool,
    repeat: RepeatMode,
    volume: f32,
    current_time: f64,
    duration: f64,
    throttle: TimeThrottle,

    urls: ObjectUrls,
    playable: LiveHandle,
    cover_handle: LiveHandle,
    cover: Option<Cover>,
    cover_request: Option<TrackId>,

    progress: ImportProgress,
    shuffle_snapshot: Option<ShuffleSnapshot>,
}

impl<S: AudioSink, E: MetadataExtractor> Player<S, E> {
    pub fn new(sink: S, extractor: E, settings: &Settings) -> Self {
        let playback = &settings.playback;
        let mut player = Self {
            sink,
            extractor,
            import_settings: settings.import.clone(),
            restore_order_on_unshuffle: playback.restore_order_on_unshuffle,
            registry: Registry::new(),
            context: PlaybackContext::default(),
            playing: false,
            shuffle: false,
            repeat: playback.repeat,
            volume: 1.0,
            current_time: 0.0,
            duration: 0.0,
            throttle: TimeThrottle::new(Duration::from_millis(playback.time_update_interval_ms)),
            urls: ObjectUrls::new(),
            playable: LiveHandle::default(),
            cover_handle: LiveHandle::default(),
            cover: None,
            cover_request: None,
            progress: ImportProgress::default(),
            shuffle_snapshot: None,
        };
        player.set_volume(playback.volume);
        player
    }

    // ---- observers ----

    /// Every imported track, in registry order.
    pub fn tracks(&self) -> &[Arc<Track>] {
        self.registry.tracks()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn playback_context(&self) -> &PlaybackContext {
        &self.context
    }

    pub fn current_track(&self) -> Option<&Arc<Track>> {
        self.context.current_track()
    }

    pub fn state(&self) -> PlayerState {
        PlayerState {
            current_index: self.context.current(),
            playing: self.playing,
            shuffle: self.shuffle,
            repeat: self.repeat,
            volume: self.volume,
            current_time: self.current_time,
            duration: self.duration,
        }
    }

    pub fn progress(&self) -> &ImportProgress {
        &self.progress
    }

    pub fn cover(&self) -> Option<&Cover> {
        self.cover.as_ref()
    }

    /// Whether a cover load is waiting for [`Player::load_cover`].
    pub fn cover_pending(&self) -> bool {
        self.cover_request.is_some()
    }

    /// The live handle the sink is currently playing from.
    pub fn playable_url(&self) -> Option<&ObjectUrl> {
        self.playable.get()
    }

    /// Bytes behind a live handle, e.g. the current cover.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<&UrlEntry> {
        self.urls.resolve(url)
    }

    pub fn resources(&self) -> &ObjectUrls {
        &self.urls
    }

    // ---- import ----

    /// Filter `files` through the allow-list and start a batch for the rest.
    ///
    /// Returns `None` (leaving progress untouched) when nothing is importable.
    pub fn begin_import(&mut self, files: Vec<AudioBlob>) -> Option<ImportBatch> {
        let files: Vec<AudioBlob> = files
            .into_iter()
            .filter(|f| is_importable(f, &self.import_settings))
            .collect();
        if files.is_empty() {
            debug!("import skipped: no supported files");
            return None;
        }

        info!(total = files.len(), "import started");
        self.progress = ImportProgress::started(files.len());
        Some(ImportBatch::new(files))
    }

    /// Import the next file of `batch`.
    ///
    /// Returns `false` once the batch is exhausted or cancelled, after
    /// marking progress as no longer loading.
    pub async fn import_next(&mut self, batch: &mut ImportBatch) -> bool {
        if batch.is_finished() {
            return false;
        }
        if batch.is_cancelled() {
            self.finish_import(batch, true);
            return false;
        }
        let Some(file) = batch.next_file() else {
            self.finish_import(batch, false);
            return false;
        };

        let id = self.registry.mint_id();
        match self.extractor.extract(&file).await {
            Ok(tags) => {
                debug!(file = file.name(), %id, "metadata extracted");
                self.append_track(track_from_tags(id, file, tags));
                self.progress.record_success();
            }
            Err(e) => {
                warn!(file = file.name(), error = %e, "metadata extraction failed; using file name");
                let name = file.name().to_string();
                self.append_track(fallback_track(id, file));
                self.progress.record_failure(&name, e.to_string());
            }
        }
        true
    }

    /// Import `files` one after another, in order.
    pub async fn import_files(&mut self, files: Vec<AudioBlob>) {
        if let Some(mut batch) = self.begin_import(files) {
            while self.import_next(&mut batch).await {}
        }
    }

    pub fn reset_progress(&mut self) {
        self.progress = ImportProgress::default();
    }

    fn finish_import(&mut self, batch: &mut ImportBatch, cancelled: bool) {
        batch.mark_finished();
        self.progress.is_loading = false;
        self.progress.cancelled = cancelled;
        info!(
            total = self.progress.total,
            successful = self.progress.successful,
            failed = self.progress.failed,
            cancelled,
            "import finished"
        );
    }

    fn append_track(&mut self, track: Track) {
        let first_ever = self.registry.is_empty() && self.context.current().is_none();
        let track = self.registry.push(track);
        if self.context.source() == ContextSource::Queue {
            self.context.push(Arc::clone(&track));
        }

        if first_ever {
            self.context.replace(vec![track], ContextSource::Selection);
            self.start(0);
        }
    }

    // ---- transport ----

    /// Make `tracks` the playback context and play `target` from it.
    ///
    /// No-op when `target` is not in `tracks`.
    pub fn play_from_context(&mut self, tracks: Vec<Arc<Track>>, target: TrackId) {
        let Some(index) = tracks.iter().position(|t| t.id == target) else {
            debug!(%target, "play_from_context: target not in list");
            return;
        };
        self.context.replace(tracks, ContextSource::Selection);
        self.start(index);
    }

    /// Make the registry itself the playback context and play `index` from it.
    pub fn play_queue_at(&mut self, index: usize) {
        if index >= self.registry.len() {
            return;
        }
        self.context
            .replace(self.registry.tracks().to_vec(), ContextSource::Queue);
        self.start(index);
    }

    /// Play the context entry at `index`. Out of range is a no-op.
    pub fn play_at(&mut self, index: usize) {
        if index >= self.context.len() {
            return;
        }
        self.start(index);
    }

    pub fn toggle_play(&mut self) {
        if self.playing {
            self.sink.pause();
            self.playing = false;
            return;
        }

        if self.context.current().is_none() {
            if self.registry.is_empty() {
                return;
            }
            if self.context.is_empty() {
                self.context
                    .replace(self.registry.tracks().to_vec(), ContextSource::Queue);
            }
            self.play_at(0);
            return;
        }

        self.resume();
    }

    pub fn play_next(&mut self) {
        let len = self.context.len();
        if len == 0 {
            return;
        }
        let next = self.context.current().map_or(0, |i| i + 1);
        if next < len {
            self.start(next);
        } else if self.repeat == RepeatMode::All {
            self.start(0);
        } else {
            debug!("end of context");
            self.sink.pause();
            self.playing = false;
        }
    }

    pub fn play_prev(&mut self) {
        let Some(current) = self.context.current() else {
            return;
        };
        if current > 0 {
            self.start(current - 1);
        } else if self.repeat == RepeatMode::All {
            self.start(self.context.len() - 1);
        } else {
            self.sink.set_current_time(0.0);
            self.current_time = 0.0;
        }
    }

    /// Jump to `secs` in the current track. No-op when nothing is loaded.
    pub fn seek(&mut self, secs: f64) {
        if self.context.current().is_none() {
            return;
        }
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self.sink.set_current_time(secs);
        self.current_time = secs;
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self.volume = volume;
        self.sink.set_volume(volume);
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    pub fn cycle_repeat_mode(&mut self) {
        self.repeat = self.repeat.cycled();
    }

    /// Turning shuffle on puts the current track first and shuffles the rest,
    /// in both the registry and the context. Turning it off keeps the shuffled
    /// order unless `restore_order_on_unshuffle` is set.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;

        if !self.shuffle {
            if let Some(snapshot) = self.shuffle_snapshot.take() {
                let registry = restore_order(self.registry.tracks(), &snapshot.registry);
                self.registry.reorder(registry);
                let context = match self.context.source() {
                    ContextSource::Queue => self.registry.tracks().to_vec(),
                    ContextSource::Selection => {
                        restore_order(self.context.tracks(), &snapshot.context)
                    }
                };
                self.context.reorder(context);
            }
            return;
        }

        if self.restore_order_on_unshuffle {
            self.shuffle_snapshot = Some(ShuffleSnapshot {
                registry: ids(self.registry.tracks()),
                context: ids(self.context.tracks()),
            });
        }

        let current = self.context.current_track().map(|t| t.id);
        let mut rng = rand::rng();

        let registry = shuffle_keep_first(self.registry.tracks(), current, &mut rng);
        self.registry.reorder(registry);

        let context = match self.context.source() {
            ContextSource::Queue => self.registry.tracks().to_vec(),
            ContextSource::Selection => {
                shuffle_keep_first(self.context.tracks(), current, &mut rng)
            }
        };
        self.context.reorder(context);
        debug!(current = ?self.context.current(), "shuffled");
    }

    /// Remove the registry entry at `index`.
    ///
    /// The track also leaves the context. If it was current, whatever now
    /// occupies its context slot starts playing, or the player goes idle.
    pub fn remove_track(&mut self, index: usize) {
        let Some(removed) = self.registry.remove(index) else {
            return;
        };
        debug!(id = %removed.id, title = %removed.title, "track removed");

        let Some(pos) = self.context.position(removed.id) else {
            return;
        };
        if self.context.remove_at(pos) == Some(Removal::Current) {
            if pos < self.context.len() {
                self.start(pos);
            } else {
                self.go_idle();
            }
        }
    }

    /// Move the registry entry at `from` to `to`. A queue context follows
    /// the move; the current track stays current.
    pub fn move_track(&mut self, from: usize, to: usize) {
        if from == to || !self.registry.move_item(from, to) {
            return;
        }
        if self.context.source() == ContextSource::Queue {
            self.context.move_item(from, to);
        }
    }

    /// Release both live handles and unload the sink.
    pub fn shutdown(&mut self) {
        self.go_idle();
        debug!(live = self.urls.live_count(), "player shut down");
    }

    // ---- sink events ----

    /// Drain and apply pending sink events.
    pub fn pump(&mut self) {
        for event in self.sink.poll_events() {
            self.handle_event(event, Instant::now());
        }
    }

    pub fn handle_event(&mut self, event: SinkEvent, now: Instant) {
        match event {
            SinkEvent::TimeUpdate => {
                if self.throttle.admit(now) {
                    self.current_time = self.sink.current_time();
                }
            }
            SinkEvent::LoadedMetadata => {
                self.duration = self.sink.duration().unwrap_or(0.0);
            }
            SinkEvent::Ended => {
                if self.repeat == RepeatMode::One {
                    self.sink.set_current_time(0.0);
                    self.current_time = 0.0;
                    self.resume();
                } else {
                    self.play_next();
                }
            }
        }
    }

    // ---- covers ----

    /// Serve the pending cover request, if any, by re-reading the current
    /// track's tags. Any failure leaves the player without a cover.
    pub async fn load_cover(&mut self) {
        let Some(id) = self.cover_request.take() else {
            return;
        };
        let Some(track) = self
            .context
            .current_track()
            .filter(|t| t.id == id)
            .cloned()
        else {
            debug!(%id, "cover request is stale");
            return;
        };
        if !track.has_cover {
            return;
        }

        match self.extractor.extract(&track.file).await {
            Ok(TagData {
                cover: Some(art), ..
            }) => {
                let url = self
                    .cover_handle
                    .replace(&mut self.urls, art.mime.clone(), Arc::from(art.data));
                self.cover = Some(Cover {
                    track: id,
                    url,
                    mime: art.mime,
                });
            }
            Ok(_) => debug!(%id, "no cover found"),
            Err(e) => warn!(%id, error = %e, "cover load failed"),
        }
    }

    // ---- internals ----

    /// Bind the context entry at `index` to a fresh playable handle and play it.
    fn start(&mut self, index: usize) {
        let Some(track) = self.context.get(index).cloned() else {
            return;
        };

        let url = self
            .playable
            .replace(&mut self.urls, track.file.mime(), track.file.shared());
        self.request_cover(&track);
        self.context.set_current(Some(index));
        self.current_time = 0.0;
        self.duration = track.duration.map_or(0.0, |d| d.as_secs_f64());

        let source = MediaSource {
            url,
            name: track.file.name().to_string(),
            mime: track.file.mime().to_string(),
            data: track.file.shared(),
        };
        match self.sink.load(source).and_then(|()| self.sink.play()) {
            Ok(()) => {
                self.playing = true;
                info!(index, id = %track.id, title = %track.title, artist = %track.artist, "now playing");
            }
            Err(e) => {
                self.playing = false;
                warn!(index, id = %track.id, error = %e, "could not start playback");
            }
        }
    }

    fn resume(&mut self) {
        match self.sink.play() {
            Ok(()) => self.playing = true,
            Err(e) => {
                self.playing = false;
                warn!(error = %e, "could not resume playback");
            }
        }
    }

    fn request_cover(&mut self, track: &Track) {
        self.cover_handle.release(&mut self.urls);
        self.cover = None;
        self.cover_request = Some(track.id);
    }

    fn go_idle(&mut self) {
        self.sink.pause();
        self.sink.unload();
        self.playable.release(&mut self.urls);
        self.cover_handle.release(&mut self.urls);
        self.cover = None;
        self.cover_request = None;
        self.context.set_current(None);
        self.playing = false;
        self.current_time = 0.0;
        self.duration = 0.0;
    }
}

impl<S: AudioSink, E: MetadataExtractor> Drop for Player<S, E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
