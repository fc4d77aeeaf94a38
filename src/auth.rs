//! API credentials, stored as `credentials.toml` next to the config file.
//! A missing file means the user has not connected their account yet; the
//! service treats that as "fetch disabled" rather than an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config;
use crate::error::Result;

const CREDENTIALS_FILE_NAME: &str = "credentials.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Credentials {
    pub api_key: String,
    pub api_token: String,
}

impl Credentials {
    pub fn load() -> Result<Option<Self>> {
        match config::config_dir() {
            Some(dir) => Self::load_from(dir.join(CREDENTIALS_FILE_NAME)),
            None => Ok(None),
        }
    }

    fn load_from(path: PathBuf) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let credentials: Credentials = toml::from_str(&contents)?;
        Ok(Some(credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Credentials::load_from(dir.path().join("credentials.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn loads_key_and_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "api_key = \"k\"\napi_token = \"t\"\n").unwrap();

        let credentials = Credentials::load_from(path).unwrap().unwrap();
        assert_eq!(credentials.api_key, "k");
        assert_eq!(credentials.api_token, "t");
    }
}
