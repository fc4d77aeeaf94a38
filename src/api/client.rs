//! Blocking HTTP client for the snippet API. All requests carry the user's
//! key and token headers; callers run fetches off the UI thread.

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::{Result, TroveError};

use super::types::{CreateSnippetRequest, CreateSnippetResponse, LibraryResponse, NewSnippet, Snippet};

const API_KEY_HEADER: &str = "X-Api-Key";
const API_TOKEN_HEADER: &str = "X-Api-Token";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    http: reqwest::blocking::Client,
    api_host: String,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(api_host: String, credentials: Credentials) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_host,
            credentials,
        })
    }

    /// `GET /editor/snippets`: the personal library plus team libraries.
    pub fn fetch_library(&self) -> Result<LibraryResponse> {
        log::debug!("fetching snippet library from {}", self.api_host);
        let response = self
            .http
            .get(self.endpoint())
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(API_TOKEN_HEADER, &self.credentials.api_token)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TroveError::Api {
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }

    /// `POST /editor/snippets`: create a snippet and return the server's
    /// view of it.
    pub fn create_snippet(&self, attrs: NewSnippet) -> Result<Snippet> {
        let body = CreateSnippetRequest::from(attrs);
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .header(API_TOKEN_HEADER, &self.credentials.api_token)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TroveError::Api {
                status: status.as_u16(),
            });
        }
        let created: CreateSnippetResponse = response.json()?;
        Ok(created.snippet)
    }

    fn endpoint(&self) -> String {
        format!("{}/editor/snippets", self.api_host)
    }
}
