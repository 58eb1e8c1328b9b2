use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use crate::use_cases::Phrases;

// Runtime constants (not game rules).
pub const STATE_CHANNEL_CAPACITY: usize = 64;
pub const DIRECTION_CHANNEL_CAPACITY: usize = 32;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

// How long each focus session lasts.
pub fn session_duration() -> Duration {
    Duration::from_secs(env_or("ATTENTION_SESSION_SECS", 30))
}

pub fn focus_cycles() -> u32 {
    env_or("ATTENTION_FOCUS_CYCLES", 1)
}

pub fn direction_interval() -> Duration {
    Duration::from_millis(env_or("ATTENTION_DIRECTION_INTERVAL_MS", 1500))
}

pub fn speech_word_duration() -> Duration {
    Duration::from_millis(env_or("ATTENTION_SPEECH_WORD_MS", 250))
}

pub fn phrases_path() -> Option<PathBuf> {
    env::var_os("ATTENTION_PHRASES_PATH").map(PathBuf::from)
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid phrases in {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

// Default phrases unless ATTENTION_PHRASES_PATH points at a TOML override.
pub fn load_phrases() -> Result<Phrases, ConfigError> {
    match phrases_path() {
        Some(path) => read_phrases(&path),
        None => Ok(Phrases::default()),
    }
}

pub fn read_phrases(path: &Path) -> Result<Phrases, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_phrases(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// Keys left out keep their default text.
pub fn parse_phrases(text: &str) -> Result<Phrases, toml::de::Error> {
    toml::from_str(text)
}
