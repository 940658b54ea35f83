//! Thin `reqwest` wrapper with a fixed timeout and redirect cap.
//!
//! Certificate and hostname validation are switched off for every client
//! built here. The auditor has to reach sites with expired, self-signed or
//! mismatched certificates, so it trades transport authenticity for
//! reachability. Nothing fetched is ever trusted beyond being read and
//! pattern-matched.

use super::bundle::STATUS_HEADER;
use crate::config::FetchConfig;
use crate::error::FetchError;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::Response;
use std::collections::HashMap;
use std::time::Instant;

/// Metadata returned by a HEAD request.
#[derive(Debug, Clone)]
pub struct HeadResponse {
    pub status: u16,
    /// URL after following redirects.
    pub url: String,
    /// Lowercased headers plus the synthetic status line.
    pub headers: HashMap<String, String>,
    /// Milliseconds from sending the request until response headers arrived.
    pub ttfb_ms: u64,
}

/// A fully read GET response.
#[derive(Debug, Clone)]
pub struct GetResponse {
    pub status: u16,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl GetResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for audit retrievals.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build a client that follows at most `max_redirects` redirects.
    pub fn new(config: &FetchConfig, max_redirects: usize) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .redirect(Policy::limited(max_redirects))
            .danger_accept_invalid_certs(true)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { inner })
    }

    /// Headers-only probe. TTFB is measured here and nowhere else.
    pub async fn head(&self, url: &str) -> Result<HeadResponse, FetchError> {
        let start = Instant::now();
        let resp = self
            .inner
            .head(url)
            .send()
            .await
            .map_err(|e| FetchError::from_request(url, e))?;
        let ttfb_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        Ok(HeadResponse {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
            headers: collect_headers(&resp),
            ttfb_ms,
        })
    }

    /// GET the URL and read the body as text, whatever the status code.
    pub async fn get(&self, url: &str) -> Result<GetResponse, FetchError> {
        let resp = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_request(url, e))?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let headers = collect_headers(&resp);
        let body = resp.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(GetResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}

fn collect_headers(resp: &Response) -> HashMap<String, String> {
    let mut headers = lowercase_headers(resp.headers());
    headers.insert(
        STATUS_HEADER.to_string(),
        format!("{:?} {}", resp.version(), resp.status()),
    );
    headers
}

/// Flatten a header map, joining repeated headers with `, `.
pub(crate) fn lowercase_headers(map: &HeaderMap) -> HashMap<String, String> {
    let mut out: HashMap<String, String> = HashMap::new();
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(name.as_str().to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}
