//! Configuration loading and management.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use takt_core::DurationStyle;

/// Record file used when neither the config file nor `TAKT_FILE` names one.
const DEFAULT_FILE: &str = "~/.takt_file.csv";

/// Editor used when neither the config nor `$EDITOR` names one.
const DEFAULT_EDITOR: &str = "vim";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the CSV record file. A leading `~` is expanded.
    pub file: PathBuf,

    /// Editor for `takt edit`; falls back to `$EDITOR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Rows shown by the summary commands when no HEAD is given. 0 shows all.
    pub summary_limit: usize,

    /// Message used by `takt commit` when none is given.
    pub commit_message: String,

    /// How hour totals are rendered.
    pub duration_style: DurationStyle,

    /// Colored output. `NO_COLOR` overrides this.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_FILE),
            editor: None,
            summary_limit: 10,
            commit_message: "Commit by takt.".to_string(),
            duration_style: DurationStyle::Clock,
            color: true,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TAKT_FILE, TAKT_EDITOR, ...)
        figment = figment.merge(Env::prefixed("TAKT_"));

        let mut config: Self = figment.extract()?;
        config.file = expand_home(&config.file);
        Ok(config)
    }

    /// Editor command for `takt edit`.
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    /// Whether output should carry ANSI styling.
    ///
    /// Off when stdout is not a terminal, so redirected output stays plain.
    pub fn color_enabled(&self) -> bool {
        self.color_for(io::stdout().is_terminal())
    }

    fn color_for(&self, terminal: bool) -> bool {
        self.color && terminal && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Returns the platform-specific config directory for takt.
///
/// On Linux: `~/.config/takt`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("takt"))
}
