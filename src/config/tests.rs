use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::player::RepeatMode;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_encore_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", "/tmp/encore-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/encore-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_documented_import_allow_list() {
    let s = Settings::default();
    assert_eq!(
        s.import.extensions,
        vec!["mp3", "wav", "ogg", "m4a", "flac"]
    );
    assert_eq!(s.import.mime_prefix, "audio");
    assert_eq!(s.playback.repeat, RepeatMode::Off);
    assert_eq!(s.playback.time_update_interval_ms, 250);
    assert!(!s.playback.restore_order_on_unshuffle);
    assert!(s.validate().is_ok());
}

#[test]
fn schema_parses_repeat_aliases_from_toml() {
    for (raw, expected) in [
        ("off", RepeatMode::Off),
        ("no-loop", RepeatMode::Off),
        ("one", RepeatMode::One),
        ("repeat-one", RepeatMode::One),
        ("all", RepeatMode::All),
        ("loop_all", RepeatMode::All),
    ] {
        let text = format!("[playback]\nrepeat = \"{raw}\"\n");
        let s: Settings = toml::from_str(&text).unwrap();
        assert_eq!(s.playback.repeat, expected, "alias {raw}");
    }
}

#[test]
fn normalized_extensions_strip_dots_and_case() {
    let import = ImportSettings {
        extensions: vec![".MP3".into(), " flac ".into(), "".into()],
        ..ImportSettings::default()
    };
    assert_eq!(import.normalized_extensions(), vec!["mp3", "flac"]);
}

#[test]
fn validate_rejects_out_of_range_volume_and_zero_interval() {
    let mut s = Settings::default();
    s.playback.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.time_update_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.import.extensions = vec!["  ".into()];
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
repeat = "repeat-one"
volume = 0.4
shuffle = true
restore_order_on_unshuffle = true
time_update_interval_ms = 100

[import]
extensions = ["mp3"]
mime_prefix = "audio/"
recursive = false
include_hidden = true
follow_links = false
max_depth = 3
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.repeat, RepeatMode::One);
    assert!((s.playback.volume - 0.4).abs() < f32::EPSILON);
    assert!(s.playback.shuffle);
    assert!(s.playback.restore_order_on_unshuffle);
    assert_eq!(s.playback.time_update_interval_ms, 100);
    assert_eq!(s.import.extensions, vec!["mp3".to_string()]);
    assert_eq!(s.import.mime_prefix, "audio/");
    assert!(!s.import.recursive);
    assert!(s.import.include_hidden);
    assert!(!s.import.follow_links);
    assert_eq!(s.import.max_depth, Some(3));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 0.9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ENCORE__PLAYBACK__VOLUME", "0.25");

    let s = Settings::load().unwrap();
    assert!((s.playback.volume - 0.25).abs() < f32::EPSILON);
}
