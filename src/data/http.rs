//! Blocking HTTP access.

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::AppError;

/// Some APIs reject requests without a descriptive User-Agent.
pub const USER_AGENT: &str = concat!("gemrxiv/", env!("CARGO_PKG_VERSION"));

/// GET with query parameters, returning the response body.
///
/// This is the only place the pipeline touches the network, so tests swap it
/// for canned responses.
pub trait HttpFetch {
    fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, AppError>;
}

pub struct ReqwestFetch {
    client: Client,
}

impl ReqwestFetch {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetch {
    fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, AppError> {
        debug!(action = "request", component = "http", url, params = query.len(), "GET");

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| AppError::network(format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "Request to {url} failed with status {}.",
                resp.status()
            )));
        }

        resp.text()
            .map_err(|e| AppError::network(format!("Failed to read response from {url}: {e}")))
    }
}
