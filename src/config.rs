/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
}

#[derive(Clone, Debug)]
pub struct TimingConfig {
    pub frame: Duration,
    pub hologram_delay: Duration,
    pub ending_hold: Duration,  // ordinary ending screen
    pub crawl_step: Duration,   // narrative crawl: one row per step
}

#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Room 3 exit reuses the door rectangle of Rooms 1 and 2.
    pub shared_door: bool,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    layout: TomlLayout,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_frame")]
    frame_ms: u64,
    #[serde(default = "default_hologram_delay")]
    hologram_delay_ms: u64,
    #[serde(default = "default_ending_hold")]
    ending_hold_ms: u64,
    #[serde(default = "default_crawl_step")]
    crawl_step_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlLayout {
    #[serde(default = "default_shared_door")]
    shared_door: bool,
}

// ── Defaults ──

fn default_frame() -> u64 { 16 }            // ~60 fps
fn default_hologram_delay() -> u64 { 2000 }
fn default_ending_hold() -> u64 { 3000 }
fn default_crawl_step() -> u64 { 50 }
fn default_shared_door() -> bool { true }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            frame_ms: default_frame(),
            hologram_delay_ms: default_hologram_delay(),
            ending_hold_ms: default_ending_hold(),
            crawl_step_ms: default_crawl_step(),
        }
    }
}

impl Default for TomlLayout {
    fn default() -> Self {
        TomlLayout {
            shared_door: default_shared_door(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        match load_toml(&candidate_dirs()) {
            Ok(Some(cfg)) => cfg,
            Ok(None) => GameConfig::default(),
            Err(e) => {
                log::warn!("{e}; using default settings");
                eprintln!("Warning: {e}");
                eprintln!("Using default settings.");
                GameConfig::default()
            }
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(GameConfig::from(cfg))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        GameConfig {
            timing: TimingConfig {
                // a zero frame would spin the loop
                frame: Duration::from_millis(cfg.timing.frame_ms.max(1)),
                hologram_delay: Duration::from_millis(cfg.timing.hologram_delay_ms),
                ending_hold: Duration::from_millis(cfg.timing.ending_hold_ms),
                crawl_step: Duration::from_millis(cfg.timing.crawl_step_ms.max(1)),
            },
            layout: LayoutConfig {
                shared_door: cfg.layout.shared_door,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// First config.toml found in the candidate directories, if any.
fn load_toml(search_dirs: &[PathBuf]) -> Result<Option<GameConfig>, ConfigError> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        log::info!("Loading settings from {}", path.display());
        return GameConfig::from_toml_str(&text).map(Some);
    }
    Ok(None)
}
