use thiserror::Error;

pub type Result<T> = std::result::Result<T, TroveError>;

#[derive(Debug, Error)]
pub enum TroveError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("snippet API returned status {status}")]
    Api { status: u16 },

    #[error("no API credentials configured")]
    MissingCredentials,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("malformed library cache: {0}")]
    Cache(#[from] serde_json::Error),
}
