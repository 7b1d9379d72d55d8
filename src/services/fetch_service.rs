use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, REFERER};
use url::Url;

use crate::config::Config;
use crate::errors::{FeedError, FeedResult};
use crate::services::traits::DocumentLoader;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Blocking HTTP and filesystem access for feeds and article pages
#[derive(Clone)]
pub struct FetchService {
    client: Client,
}

impl FetchService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.http_timeout)
                .user_agent(config.user_agent.clone())
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Whether the source should be fetched over HTTP rather than read from disk
    pub fn is_remote(source: &str) -> bool {
        Url::parse(source)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    fn get(&self, url: &str) -> FeedResult<Response> {
        let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FeedError::InvalidUrl(format!("unsupported scheme: {}", url)));
        }

        tracing::debug!(url = %url, "GET");
        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, ACCEPT_HTML)
            .header("DNT", "1")
            .header(REFERER, url)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

impl DocumentLoader for FetchService {
    fn load_feed(&self, source: &str) -> FeedResult<Vec<u8>> {
        if Self::is_remote(source) {
            let bytes = self.get(source)?.bytes()?;
            return Ok(bytes.to_vec());
        }

        tracing::debug!(path = %source, "Reading feed from disk");
        Ok(std::fs::read(source)?)
    }

    fn fetch_page(&self, url: &str) -> FeedResult<String> {
        Ok(self.get(url)?.text()?)
    }
}
