use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::audio::AudioSink;
use crate::config::Settings;
use crate::library::views::{albums, artists, find_album, find_artist, songs_by_title, stats};
use crate::library::{ImportBatch, ImportProgress, Track};
use crate::metadata::MetadataExtractor;
use crate::player::Player;

use super::ControlCmd;
use super::startup::apply_playback_defaults;

const TICK: Duration = Duration::from_millis(50);

/// Drive imports, sink events and stdin commands until `q`, or until stdin
/// is closed and there is nothing left to import or play.
pub fn run<S: AudioSink, E: MetadataExtractor>(
    player: &mut Player<S, E>,
    settings: &Settings,
    mut batch: Option<ImportBatch>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdin_open = true;
    if batch.is_none() {
        apply_playback_defaults(player, settings);
    }

    loop {
        // One file per iteration so commands and sink events stay responsive.
        if let Some(pending) = batch.as_mut() {
            if !async_io::block_on(player.import_next(pending)) {
                report_import(player.progress());
                batch = None;
                apply_playback_defaults(player, settings);
            }
        }

        if player.cover_pending() {
            async_io::block_on(player.load_cover());
            if let Some(cover) = player.cover() {
                info!(track = %cover.track, mime = %cover.mime, url = %cover.url, "cover ready");
            }
        }

        player.pump();

        loop {
            match control_rx.try_recv() {
                Ok(ControlCmd::Quit) => return Ok(()),
                Ok(cmd) => apply(player, cmd),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    stdin_open = false;
                    break;
                }
            }
        }

        if !stdin_open && batch.is_none() && !player.state().playing {
            return Ok(());
        }
        if batch.is_none() {
            thread::sleep(TICK);
        }
    }
}

fn apply<S: AudioSink, E: MetadataExtractor>(player: &mut Player<S, E>, cmd: ControlCmd) {
    match cmd {
        ControlCmd::PlayPause => player.toggle_play(),
        ControlCmd::Next => player.play_next(),
        ControlCmd::Prev => player.play_prev(),
        ControlCmd::Shuffle => {
            player.toggle_shuffle();
            println!("shuffle {}", if player.state().shuffle { "on" } else { "off" });
        }
        ControlCmd::Repeat => {
            player.cycle_repeat_mode();
            println!("repeat {:?}", player.state().repeat);
        }
        ControlCmd::Seek(secs) => player.seek(secs),
        ControlCmd::Volume(v) => player.set_volume(v),
        ControlCmd::Play(i) => player.play_at(i),
        ControlCmd::Queue(i) => player.play_queue_at(i),
        ControlCmd::Remove(i) => player.remove_track(i),
        ControlCmd::Move(from, to) => player.move_track(from, to),
        ControlCmd::Album(name) => {
            let groups = albums(player.tracks());
            match find_album(&groups, &name) {
                Some(album) => {
                    println!(
                        "{} by {}, {} songs{}",
                        album.name,
                        album.artist,
                        album.songs.len(),
                        album
                            .cover_track()
                            .map(|t| format!(", cover from {}", t.title))
                            .unwrap_or_default()
                    );
                    play_list(player, album.songs.clone());
                }
                None => warn!(album = %name, "no such album"),
            }
        }
        ControlCmd::Artist(name) => {
            let groups = artists(player.tracks());
            match find_artist(&groups, &name) {
                Some(artist) => play_list(player, artist.songs.clone()),
                None => warn!(artist = %name, "no such artist"),
            }
        }
        ControlCmd::Songs => {
            let sorted = songs_by_title(player.tracks());
            play_list(player, sorted);
        }
        ControlCmd::List => print_tracks(
            player.playback_context().tracks(),
            player.state().current_index,
        ),
        ControlCmd::Library => print_tracks(player.tracks(), None),
        ControlCmd::Status => print_status(player),
        ControlCmd::ResetProgress => player.reset_progress(),
        // Handled by the reader thread.
        ControlCmd::Quit | ControlCmd::CancelImport => {}
    }
}

fn play_list<S: AudioSink, E: MetadataExtractor>(player: &mut Player<S, E>, tracks: Vec<Arc<Track>>) {
    if let Some(first) = tracks.first().map(|t| t.id) {
        player.play_from_context(tracks, first);
    }
}

fn print_tracks(tracks: &[Arc<Track>], current: Option<usize>) {
    for (i, t) in tracks.iter().enumerate() {
        let marker = if Some(i) == current { '>' } else { ' ' };
        println!("{marker}{i:>4}  {} - {} ({})", t.title, t.artist, t.album);
    }
}

fn print_status<S: AudioSink, E: MetadataExtractor>(player: &Player<S, E>) {
    let state = player.state();
    match player.current_track() {
        Some(t) => println!(
            "{} {} - {}  {:.0}/{:.0}s",
            if state.playing { "playing" } else { "paused" },
            t.title,
            t.artist,
            state.current_time,
            state.duration
        ),
        None => println!("idle"),
    }
    let library = stats(player.tracks());
    println!(
        "shuffle {}  repeat {:?}  volume {:.2}  context {}",
        state.shuffle,
        state.repeat,
        state.volume,
        player.playback_context().len()
    );
    println!(
        "library {} songs  {} artists  {} albums",
        library.songs, library.artists, library.albums
    );
}

fn report_import(progress: &ImportProgress) {
    println!(
        "imported {}/{} ({} failed){}",
        progress.successful,
        progress.total,
        progress.failed,
        if progress.cancelled { ", cancelled" } else { "" }
    );
    for failed in &progress.failed_files {
        println!("  {}: {}", failed.name, failed.error);
    }
}
