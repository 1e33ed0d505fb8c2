// src/core/net.rs
// Blocking HTTPS GET via ureq. One attempt per call; retries are the caller's business.

use std::time::Duration;

use thiserror::Error;

use crate::config::consts::USER_AGENT;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error for {url}: {msg}")]
    Transport { url: String, msg: String },
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("unreadable body for {url}: {msg}")]
    Body { url: String, msg: String },
}

/// Anything that can turn a URL into page markup.
/// The crawler only sees this trait, so tests can serve canned pages.
pub trait Fetch {
    fn fetch_page(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch_page(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let resp = self
            .agent
            .get(url)
            .timeout(timeout)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => FetchError::Status { status, url: s!(url) },
                ureq::Error::Transport(t) => FetchError::Transport { url: s!(url), msg: t.to_string() },
            })?;

        resp.into_string().map_err(|e| FetchError::Body { url: s!(url), msg: e.to_string() })
    }
}
