// src/core/net.rs
//
// Blocking HTTP GET. One request at a time, no retries.

use reqwest::blocking::Client;
use url::Url;

use crate::config::options::ScrapeOptions;
use crate::error::FetchError;

/// Page source for the paginator. `HttpFetcher` in production; tests script their own.
pub trait Fetch {
    fn get(&mut self, url: &Url) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.timeout())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&mut self, url: &Url) -> Result<String, FetchError> {
        let transport = |source| FetchError::Transport { url: url.to_string(), source };

        let resp = self.client.get(url.as_str()).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        // Site is UTF-8; don't trust the declared charset.
        let body = resp.bytes().map_err(transport)?;
        tracing::debug!(url = %url, bytes = body.len(), "fetched");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
