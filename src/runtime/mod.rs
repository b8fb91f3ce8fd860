//! Headless host: wires the player to the default audio output and the
//! lofty tag reader, imports whatever was named on the command line and
//! takes transport commands from stdin.

use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use tracing::info;

use crate::audio::RodioSink;
use crate::metadata::LoftyExtractor;
use crate::player::Player;

mod control;
mod event_loop;
mod settings;
mod startup;

pub use control::ControlCmd;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    startup::init_tracing();
    let settings = settings::load_settings();

    let mut roots: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if roots.is_empty() {
        roots.push(env::current_dir()?);
    }
    let files = startup::load_inputs(&roots, &settings.import);

    let sink = RodioSink::open_default()?;
    let mut player = Player::new(sink, LoftyExtractor, &settings);
    let batch = player.begin_import(files);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    control::spawn_stdin_reader(control_tx, batch.as_ref().map(|b| b.cancel_token()));

    let result = event_loop::run(&mut player, &settings, batch, &control_rx);

    player.shutdown();
    info!("bye");
    result
}
