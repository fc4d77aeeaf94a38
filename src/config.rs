//! Application configuration, loaded from `config.toml` in the platform
//! config directory. A missing file falls back to production defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

const APP_DIR_NAME: &str = "trove";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_API_HOST: &str = "https://api.trovesnippets.com";
const DEFAULT_APP_HOST: &str = "https://app.trovesnippets.com";
const DEFAULT_SNIPPETS_HOST: &str = "https://snippets.trovesnippets.com";

// 1 hour
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60 * 60;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the snippet API.
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Base URL of the web application, used for "open in app" links.
    #[serde(default = "default_app_host")]
    pub app_host: String,
    /// Base URL of the public snippet pages.
    #[serde(default = "default_snippets_host")]
    pub snippets_host: String,
    /// How often the library is refetched in the background.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_app_host() -> String {
    DEFAULT_APP_HOST.to_string()
}

fn default_snippets_host() -> String {
    DEFAULT_SNIPPETS_HOST.to_string()
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            app_host: default_app_host(),
            snippets_host: default_snippets_host(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        match config_dir() {
            Some(dir) => Self::load_from(dir.join(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// URL that opens a snippet inside the web application. Team snippets
    /// route through the team entry action.
    pub fn app_url(&self, snippet_guid: &str, team_guid: Option<&str>) -> String {
        match team_guid {
            Some(team) => format!(
                "{}/enter?action=goto_team_snippet&t={team}&s={snippet_guid}",
                self.app_host
            ),
            None => format!(
                "{}/enter?action=goto_snippet&s={snippet_guid}",
                self.app_host
            ),
        }
    }

    /// URL of the public page for a snippet.
    pub fn page_url(&self, snippet_guid: &str) -> String {
        format!("{}/snippet/{snippet_guid}", self.snippets_host)
    }
}

/// Directory holding `config.toml` and `credentials.toml`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Directory holding the on-disk library cache.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_host = \"http://localhost:4000\"\n").unwrap();

        let config = Config::load_from(path).unwrap();
        assert_eq!(config.api_host, "http://localhost:4000");
        assert_eq!(config.app_host, DEFAULT_APP_HOST);
        assert_eq!(config.refresh_interval_secs, 3600);
    }

    #[test]
    fn app_url_distinguishes_team_snippets() {
        let config = Config::default();
        assert_eq!(
            config.app_url("s-1", None),
            "https://app.trovesnippets.com/enter?action=goto_snippet&s=s-1"
        );
        assert_eq!(
            config.app_url("s-1", Some("t-9")),
            "https://app.trovesnippets.com/enter?action=goto_team_snippet&t=t-9&s=s-1"
        );
    }

    #[test]
    fn page_url_points_at_snippets_host() {
        let config = Config::default();
        assert_eq!(
            config.page_url("abc"),
            "https://snippets.trovesnippets.com/snippet/abc"
        );
    }
}
