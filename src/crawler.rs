//! Crawl orchestration
//!
//! Drives a whole docset build: discover seeds, drain the page frontier
//! (fetch, extract, sanitize, write), drain the asset set, then build the
//! search index. Pages that fail with an HTTP error status are logged and
//! skipped; every other error aborts the build.

use crate::bundle::DocsetLayout;
use crate::config::Settings;
use crate::extract::{extract_refs, extract_title};
use crate::fetch::{build_http_client, FetchCache};
use crate::frontier::Frontier;
use crate::index::SearchIndex;
use crate::sanitize::sanitize_document;
use crate::seeds::{scrape_help_toc, scrape_symbol_help, NodeEvaluator};
use crate::{DocsetError, Result};
use dom_query::Document;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Runs one complete docset build according to `settings`.
pub fn build_docset(settings: &Settings) -> Result<()> {
    let layout = DocsetLayout::new(&settings.docset_dir);
    layout.ensure_dirs()?;
    layout.copy_static_resources(&settings.res_dir)?;

    let client = build_http_client()?;
    let fetcher = FetchCache::new(client, &settings.base_url, &settings.cache_dir);
    fs::create_dir_all(&settings.cache_dir)?;

    let evaluator = NodeEvaluator {
        work_dir: settings.cache_dir.clone(),
    };
    let symbol_help =
        scrape_symbol_help(&fetcher, &evaluator, &settings.hlp_js_url, &settings.version)?;
    let toc_pages = scrape_help_toc(&fetcher)?;

    let mut frontier =
        Frontier::with_seeds(toc_pages.into_iter().chain(symbol_help.values().cloned()));
    info!("starting crawl with {} seed pages", frontier.pending_pages());

    let documents_dir = layout.documents_dir();
    let page_entries = crawl(&fetcher, &mut frontier, &documents_dir, &settings.base_url)?;
    drain_assets(&fetcher, &mut frontier, &documents_dir)?;

    let mut index = SearchIndex::create(&layout.index_path())?;
    index.build(page_entries.into_iter().chain(symbol_help))?;
    info!("indexed {} entries", index.count()?);

    info!("docset written to {}", layout.root().display());
    Ok(())
}

/// Drains the page frontier to completion.
///
/// Returns the (title, path) pairs of every successfully processed page, in
/// visit order, ready for the index builder.
pub fn crawl(
    fetcher: &FetchCache,
    frontier: &mut Frontier,
    documents_dir: &Path,
    base_url: &str,
) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();

    while let Some(page) = frontier.take_next_page() {
        match process_page(fetcher, frontier, documents_dir, base_url, &page) {
            Ok(title) => entries.push((title, page.clone())),
            Err(DocsetError::Retrieval { url, status }) => {
                warn!("skipping page {url}: HTTP {status}");
            }
            Err(err) => return Err(err),
        }
        frontier.mark_done(&page);
        info!(
            "[{}/{}] {page}",
            frontier.done_pages(),
            frontier.done_pages() + frontier.pending_pages()
        );
    }

    Ok(entries)
}

/// Fetches, extracts, sanitizes, and writes a single page.
///
/// Extraction must run before sanitization; the sanitizer removes elements
/// (breadcrumbs in particular) that still carry crawlable links.
fn process_page(
    fetcher: &FetchCache,
    frontier: &mut Frontier,
    documents_dir: &Path,
    base_url: &str,
    page: &str,
) -> Result<String> {
    let cached = fetcher.materialize(page)?;
    let html = String::from_utf8_lossy(&fs::read(&cached)?).into_owned();
    let doc = Document::from(html.as_str());

    let refs = extract_refs(&doc, page);
    frontier.add_pages(refs.pages);
    frontier.add_assets(refs.assets);

    sanitize_document(&doc, page, base_url);

    let out_path = documents_dir
        .join(page.trim_start_matches('/'))
        .with_extension("html");
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, doc.html().as_bytes())?;

    Ok(extract_title(&doc).unwrap_or_else(|| fallback_title(page)))
}

/// Display name for a page without a `<title>`: its file stem.
fn fallback_title(page: &str) -> String {
    Path::new(page)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| page.to_string())
}

/// Mirrors every collected asset into Documents/ verbatim.
///
/// Asset failures follow the page policy: HTTP error statuses are logged and
/// skipped, anything else aborts.
pub fn drain_assets(
    fetcher: &FetchCache,
    frontier: &mut Frontier,
    documents_dir: &Path,
) -> Result<()> {
    let assets = frontier.take_assets();
    info!("mirroring {} assets", assets.len());

    for asset in assets {
        match copy_asset(fetcher, documents_dir, &asset) {
            Ok(()) => debug!("mirrored {asset}"),
            Err(DocsetError::Retrieval { url, status }) => {
                warn!("skipping asset {url}: HTTP {status}");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn copy_asset(fetcher: &FetchCache, documents_dir: &Path, asset: &str) -> Result<()> {
    let cached = fetcher.materialize(asset)?;
    let dest = documents_dir.join(asset.trim_start_matches('/'));
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&cached, &dest)?;
    Ok(())
}
