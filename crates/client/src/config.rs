//! Client configuration from environment variables and command-line arguments.
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use game_content::{ConfigLoader, LevelLoader, ScriptLoader};
use game_core::{GameConfig, LevelState};

pub const USAGE: &str = "usage: questline <LEVEL.ron> [SCRIPT | TOKEN...]";

/// Where the action queue comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSource {
    /// Whitespace-separated tokens in a file.
    Script(PathBuf),
    /// Tokens given directly on the command line.
    Inline(Vec<String>),
}

/// Settings needed to run one level.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub level_path: Option<PathBuf>,
    pub actions: Option<ActionSource>,
    pub config_path: Option<PathBuf>,
    pub frame_interval: Option<Duration>,
    pub json_events: bool,
    pub log_dir: Option<PathBuf>,
}

/// Everything loaded from disk, ready to hand to the runtime.
#[derive(Debug)]
pub struct Session {
    pub level: LevelState,
    pub game_config: GameConfig,
    pub tokens: Vec<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `QUESTLINE_LEVEL` - Level file (RON)
    /// - `QUESTLINE_ACTIONS` - Action script file
    /// - `QUESTLINE_CONFIG` - Controller timings (TOML, default: built-in values)
    /// - `QUESTLINE_FRAME_MS` - Motion frame interval in milliseconds (default: 16)
    /// - `QUESTLINE_JSON_EVENTS` - Print events as JSON lines (default: false)
    /// - `QUESTLINE_LOG_DIR` - Also write logs to `questline.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self {
            level_path: env::var_os("QUESTLINE_LEVEL").map(PathBuf::from),
            actions: env::var_os("QUESTLINE_ACTIONS")
                .map(|path| ActionSource::Script(PathBuf::from(path))),
            config_path: env::var_os("QUESTLINE_CONFIG").map(PathBuf::from),
            log_dir: env::var_os("QUESTLINE_LOG_DIR").map(PathBuf::from),
            ..Self::default()
        };

        if let Some(ms) = read_env::<u64>("QUESTLINE_FRAME_MS") {
            config.frame_interval = Some(Duration::from_millis(ms.max(1)));
        }

        if let Some(enable) = read_env::<bool>("QUESTLINE_JSON_EVENTS") {
            config.json_events = enable;
        }

        config
    }

    /// Apply positional arguments on top of the environment.
    ///
    /// The first argument is the level. A single further argument naming an
    /// existing file is read as a script; anything else is taken as tokens.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(level) = args.next() {
            self.level_path = Some(PathBuf::from(level));
        }

        let rest: Vec<String> = args.collect();
        match rest.as_slice() {
            [] => {}
            [single] if Path::new(single).is_file() => {
                self.actions = Some(ActionSource::Script(PathBuf::from(single)));
            }
            _ => self.actions = Some(ActionSource::Inline(rest)),
        }

        self
    }

    /// Read the level, timings and action queue.
    pub fn load(&self) -> Result<Session> {
        let Some(level_path) = &self.level_path else {
            bail!("no level given; set QUESTLINE_LEVEL or pass a path\n{USAGE}");
        };
        let level = LevelLoader::load(level_path)?;

        let game_config = match &self.config_path {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("loading controller config {}", path.display()))?,
            None => GameConfig::default(),
        };

        let tokens = match &self.actions {
            Some(ActionSource::Script(path)) => ScriptLoader::load(path)?,
            Some(ActionSource::Inline(tokens)) => tokens.clone(),
            None => Vec::new(),
        };

        Ok(Session {
            level,
            game_config,
            tokens,
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
