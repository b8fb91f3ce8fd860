//! Line-oriented transport commands read from stdin.

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use tracing::{debug, warn};

use crate::library::ImportCancel;

/// One parsed command. Indices are zero-based, as printed by `ls`/`lib`.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlCmd {
    Quit,
    PlayPause,
    Next,
    Prev,
    Shuffle,
    Repeat,
    Seek(f64),
    Volume(f32),
    /// Play an entry of the current playback context.
    Play(usize),
    /// Play an entry of the library, making the whole library the context.
    Queue(usize),
    Remove(usize),
    Move(usize, usize),
    Album(String),
    Artist(String),
    Songs,
    /// Print the playback context.
    List,
    /// Print the library in import order.
    Library,
    Status,
    ResetProgress,
    /// Stop the running import before its next file.
    CancelImport,
}

impl ControlCmd {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let cmd = match word {
            "q" | "quit" => Self::Quit,
            "p" | "pause" | "play" if rest.is_empty() => Self::PlayPause,
            "n" | "next" => Self::Next,
            "b" | "prev" => Self::Prev,
            "s" | "shuffle" => Self::Shuffle,
            "r" | "repeat" => Self::Repeat,
            "seek" => Self::Seek(number(rest, "seek")?),
            "vol" | "volume" => Self::Volume(number(rest, "vol")?),
            "play" => Self::Play(number(rest, "play")?),
            "queue" => Self::Queue(number(rest, "queue")?),
            "rm" => Self::Remove(number(rest, "rm")?),
            "mv" => {
                let (from, to) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: mv FROM TO".to_string())?;
                Self::Move(number(from, "mv")?, number(to.trim(), "mv")?)
            }
            "album" => Self::Album(name(rest, "album")?),
            "artist" => Self::Artist(name(rest, "artist")?),
            "songs" => Self::Songs,
            "ls" => Self::List,
            "lib" => Self::Library,
            "st" | "status" => Self::Status,
            "reset" => Self::ResetProgress,
            "x" | "cancel" => Self::CancelImport,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(cmd)
    }
}

fn number<T: std::str::FromStr>(arg: &str, cmd: &str) -> Result<T, String> {
    arg.parse()
        .map_err(|_| format!("{cmd}: expected a number, got {arg:?}"))
}

fn name(arg: &str, cmd: &str) -> Result<String, String> {
    if arg.is_empty() {
        return Err(format!("usage: {cmd} NAME"));
    }
    Ok(arg.to_string())
}

/// Read commands from stdin on a background thread.
///
/// `cancel` is set directly from this thread when a cancel command arrives.
/// The sender is dropped when stdin closes.
pub fn spawn_stdin_reader(control_tx: mpsc::Sender<ControlCmd>, cancel: Option<ImportCancel>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match ControlCmd::parse(&line) {
                Ok(ControlCmd::CancelImport) => match cancel.as_ref() {
                    Some(token) => token.cancel(),
                    None => debug!("no import to cancel"),
                },
                Ok(cmd) => {
                    let quit = cmd == ControlCmd::Quit;
                    if control_tx.send(cmd).is_err() || quit {
                        break;
                    }
                }
                Err(msg) => warn!("{msg}"),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_transport_words() {
        assert_eq!(ControlCmd::parse("p"), Ok(ControlCmd::PlayPause));
        assert_eq!(ControlCmd::parse("  play "), Ok(ControlCmd::PlayPause));
        assert_eq!(ControlCmd::parse("n"), Ok(ControlCmd::Next));
        assert_eq!(ControlCmd::parse("b"), Ok(ControlCmd::Prev));
        assert_eq!(ControlCmd::parse("q"), Ok(ControlCmd::Quit));
        assert_eq!(ControlCmd::parse("x"), Ok(ControlCmd::CancelImport));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(ControlCmd::parse("play 3"), Ok(ControlCmd::Play(3)));
        assert_eq!(ControlCmd::parse("seek 12.5"), Ok(ControlCmd::Seek(12.5)));
        assert_eq!(ControlCmd::parse("vol 0.4"), Ok(ControlCmd::Volume(0.4)));
        assert_eq!(ControlCmd::parse("mv 2   5"), Ok(ControlCmd::Move(2, 5)));
        assert_eq!(
            ControlCmd::parse("album Kind of Blue"),
            Ok(ControlCmd::Album("Kind of Blue".into()))
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(ControlCmd::parse("").is_err());
        assert!(ControlCmd::parse("dance").is_err());
        assert!(ControlCmd::parse("rm two").is_err());
        assert!(ControlCmd::parse("mv 1").is_err());
        assert!(ControlCmd::parse("artist").is_err());
        assert!(ControlCmd::parse("play -1").is_err());
    }
}
