//! Table-of-contents scraping
//!
//! The help site's navigation tree lives in `/Data/Tocs/Dyalog.js`, a JSONP
//! file naming a chunk prefix and a chunk count; each chunk maps page paths
//! to tree metadata. The union of the chunk keys is the crawl's primary seed
//! set. Parsed payloads are cached as plain JSON in the fetch cache directory
//! so a rerun never re-downloads them.

use crate::fetch::FetchCache;
use crate::seeds::jsonp::parse_jsonp;
use crate::{Result, SeedError};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const TOC_PATH: &str = "/Data/Tocs/Dyalog.js";

/// MadCap writes a placeholder row into every chunk; it is not a page.
const CHUNK_PLACEHOLDER: &str = "___";

/// Scrapes the site ToC and returns every page path it names.
pub fn scrape_help_toc(fetcher: &FetchCache) -> Result<BTreeSet<String>> {
    let toc = cached_json(fetcher.cache_dir(), "toc.json", || {
        let body = fetcher.fetch_text(TOC_PATH)?;
        Ok(parse_jsonp(TOC_PATH, &body)?)
    })?;

    let prefix = toc["prefix"].as_str().ok_or_else(|| SeedError::JsonpFormat {
        path: TOC_PATH.to_string(),
        reason: "missing chunk prefix".to_string(),
    })?;
    let numchunks = chunk_count(&toc)?;
    debug!(prefix, numchunks, "resolved ToC chunk layout");

    let chunks = cached_json(fetcher.cache_dir(), "chunks.json", || {
        let mut chunks = Vec::with_capacity(numchunks as usize);
        for i in 0..numchunks {
            info!("fetching ToC chunk {}/{}", i + 1, numchunks);
            let path = format!("/Data/Tocs/{prefix}{i}.js");
            let body = fetcher.fetch_text(&path)?;
            chunks.push(parse_jsonp(&path, &body)?);
        }
        Ok(Value::Array(chunks))
    })?;

    let chunk_list = chunks.as_array().ok_or_else(|| SeedError::JsonpFormat {
        path: TOC_PATH.to_string(),
        reason: "cached chunk list is not an array".to_string(),
    })?;
    Ok(chunk_pages(chunk_list))
}

/// The chunk count is written as a string in some site versions and a number
/// in others.
fn chunk_count(toc: &Value) -> Result<u64> {
    let numchunks = &toc["numchunks"];
    numchunks
        .as_u64()
        .or_else(|| numchunks.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| {
            SeedError::JsonpFormat {
                path: TOC_PATH.to_string(),
                reason: format!("unusable numchunks value {numchunks}"),
            }
            .into()
        })
}

/// Collects the union of page paths across all ToC chunks.
fn chunk_pages(chunks: &[Value]) -> BTreeSet<String> {
    chunks
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|chunk| chunk.keys())
        .filter(|key| key.as_str() != CHUNK_PLACEHOLDER)
        .cloned()
        .collect()
}

/// Returns the cached parse of a seed payload, creating it on first use.
///
/// An unreadable or corrupt cache file falls through to `create`, which also
/// rewrites the cache.
fn cached_json<F>(cache_dir: &Path, name: &str, create: F) -> Result<Value>
where
    F: FnOnce() -> Result<Value>,
{
    let cache_path = cache_dir.join(name);
    if let Ok(text) = fs::read_to_string(&cache_path) {
        if let Ok(value) = serde_json::from_str(&text) {
            debug!("using cached {name}");
            return Ok(value);
        }
    }

    let value = create()?;
    fs::create_dir_all(cache_dir)?;
    fs::write(&cache_path, serde_json::to_string(&value).map_err(SeedError::from)?)?;
    Ok(value)
}
