//! Fetch cache
//!
//! Idempotent, path-addressed download cache. Every remote resource lands in
//! the cache directory under its site path; the presence of the file is proof
//! of a prior successful download, so a second `materialize` for the same
//! path never touches the network. The cache is never invalidated
//! automatically — a stale cache warning at startup is the caller's job.

use crate::{DocsetError, Result};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use url::Url;

/// Builds the blocking HTTP client used for the whole run.
///
/// No request timeout is set; the skip-and-continue policy only covers HTTP
/// error statuses, so an unresponsive remote stalls the crawl.
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("dyalog-docset/", env!("CARGO_PKG_VERSION")))
        .timeout(None)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Path-addressed local cache for remote resources
pub struct FetchCache {
    client: Client,
    base_url: String,
    cache_dir: PathBuf,
}

impl FetchCache {
    pub fn new(client: Client, base_url: &str, cache_dir: &Path) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    /// Local cache location for a site path.
    pub fn local_path(&self, path: &str) -> PathBuf {
        self.cache_dir.join(path.trim_start_matches('/'))
    }

    /// Directory holding cached seed-discovery JSON.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Ensures a site path is present in the cache and returns its location.
    ///
    /// On a cache hit this is a pure filesystem check. On a miss the resource
    /// is fetched with a blocking GET and streamed to disk; parent
    /// directories are created as needed. A non-success status maps to
    /// [`DocsetError::Retrieval`] carrying the URL and status for logging.
    /// Writes are not atomic: a crash mid-download can leave a partial file
    /// that a later run will treat as a hit.
    pub fn materialize(&self, path: &str) -> Result<PathBuf> {
        let local = self.local_path(path);
        if local.exists() {
            return Ok(local);
        }

        if let Some(parent) = local.parent() {
            fs::create_dir_all(parent)?;
        }

        let url = self.remote_url(path)?;
        let mut response = self.client.get(url.clone()).send()?;
        if !response.status().is_success() {
            return Err(DocsetError::Retrieval {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut file = File::create(&local)?;
        response.copy_to(&mut file)?;
        Ok(local)
    }

    /// Fetches a site path as text without caching (seed discovery payloads
    /// cache their parsed form instead).
    pub fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.remote_url(path)?;
        self.fetch_url_text(url)
    }

    /// Fetches an arbitrary absolute URL as text (the pinned help script
    /// lives outside the help site).
    pub fn fetch_absolute_text(&self, url: &str) -> Result<String> {
        self.fetch_url_text(Url::parse(url)?)
    }

    fn remote_url(&self, path: &str) -> Result<Url> {
        // Url::parse percent-encodes the spaces the help site uses in paths.
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    fn fetch_url_text(&self, url: Url) -> Result<String> {
        let response = self.client.get(url.clone()).send()?;
        if !response.status().is_success() {
            return Err(DocsetError::Retrieval {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.text()?)
    }
}
