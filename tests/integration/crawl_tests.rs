//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a miniature help site and exercise the
//! fetch cache and the full crawl cycle end-to-end. The crawler's HTTP layer
//! is blocking, so each test drives it through `spawn_blocking`.

use dyalog_docset::crawler::{crawl, drain_assets};
use dyalog_docset::fetch::{build_http_client, FetchCache};
use dyalog_docset::index::SearchIndex;
use dyalog_docset::{DocsetError, Frontier};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetch_cache(base_url: &str, cache_dir: &Path) -> FetchCache {
    FetchCache::new(
        build_http_client().expect("Failed to build client"),
        base_url,
        cache_dir,
    )
}

fn html_page(title: &str, body: &str) -> String {
    format!("<html><head><title>{title}</title></head><body>{body}</body></html>")
}

#[tokio::test]
async fn test_cache_hit_downloads_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Content/UserGuide/intro.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Introduction", "hi")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let cache_dir = dir.path().to_path_buf();

    let (first, second) = tokio::task::spawn_blocking(move || {
        let fetcher = fetch_cache(&base_url, &cache_dir);
        let first = fetcher.materialize("/Content/UserGuide/intro.htm").unwrap();
        let second = fetcher.materialize("/Content/UserGuide/intro.htm").unwrap();
        (first, second)
    })
    .await
    .unwrap();

    assert_eq!(first, second);
    assert!(fs::read_to_string(first).unwrap().contains("Introduction"));
}

#[tokio::test]
async fn test_http_error_maps_to_retrieval() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Content/UserGuide/gone.htm"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let cache_dir = dir.path().to_path_buf();

    let result = tokio::task::spawn_blocking(move || {
        fetch_cache(&base_url, &cache_dir).materialize("/Content/UserGuide/gone.htm")
    })
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(DocsetError::Retrieval { status: 404, .. })
    ));
    // A failed download must not leave a cache file behind.
    assert!(!dir.path().join("Content/UserGuide/gone.htm").exists());
}

#[tokio::test]
async fn test_full_crawl_builds_sanitized_docset() {
    let mock_server = MockServer::start().await;

    // Seed page: links to a sibling page, an off-site page, and a stylesheet.
    Mock::given(method("GET"))
        .and(path("/Content/UserGuide/intro.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Introduction",
            r#"<div class="breadcrumbs">UserGuide &gt; Introduction</div>
               <script>var x = 1;</script>
               <link rel="stylesheet" href="../../Skins/Default.css">
               <a href="details.htm">Details</a>
               <a href="http://offsite.invalid/x.htm">elsewhere</a>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Sibling page links back; the cycle must not refetch the seed.
    Mock::given(method("GET"))
        .and(path("/Content/UserGuide/details.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Details",
            r#"<a href="intro.htm">back</a>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Skins/Default.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body { margin: 0; }"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let cache_dir = dir.path().join("tmp");
    let documents_dir = dir.path().join("Documents");

    let (entries, docs) = {
        let base_url = base_url.clone();
        let documents_dir = documents_dir.clone();
        tokio::task::spawn_blocking(move || {
            let fetcher = fetch_cache(&base_url, &cache_dir);
            let mut frontier =
                Frontier::with_seeds(vec!["/Content/UserGuide/intro.htm".to_string()]);
            let entries = crawl(&fetcher, &mut frontier, &documents_dir, &base_url).unwrap();
            drain_assets(&fetcher, &mut frontier, &documents_dir).unwrap();
            (entries, documents_dir)
        })
        .await
        .unwrap()
    };

    // Both pages written under their renamed extension.
    let intro = fs::read_to_string(docs.join("Content/UserGuide/intro.html")).unwrap();
    assert!(docs.join("Content/UserGuide/details.html").is_file());

    // Sanitized: furniture and scripts gone, links rewritten, origin recorded.
    assert!(!intro.contains("breadcrumbs"));
    assert!(!intro.contains("<script"));
    assert!(intro.contains(r#"href="details.html""#));
    assert!(intro.contains(r#"href="http://offsite.invalid/x.htm""#));
    assert!(intro.contains(&format!("<!--Online page at {base_url}/#UserGuide/intro.htm-->")));

    // Asset mirrored verbatim.
    assert_eq!(
        fs::read_to_string(docs.join("Skins/Default.css")).unwrap(),
        "body { margin: 0; }"
    );

    // Titles paired with the visited paths, ready for indexing.
    let mut titles: Vec<&str> = entries.iter().map(|(title, _)| title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Details", "Introduction"]);

    let mut index = SearchIndex::create_in_memory().unwrap();
    index.build(entries).unwrap();
    assert_eq!(index.count().unwrap(), 2);

    // The off-site link must never have been requested from the mock server.
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| !r.url.path().contains("x.htm")));
}

#[tokio::test]
async fn test_failed_page_is_skipped_and_crawl_continues() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Content/UserGuide/gone.htm"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Content/UserGuide/alive.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Alive", "ok")))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let cache_dir = dir.path().join("tmp");
    let documents_dir = dir.path().join("Documents");

    let entries = {
        let documents_dir = documents_dir.clone();
        tokio::task::spawn_blocking(move || {
            let fetcher = fetch_cache(&base_url, &cache_dir);
            let mut frontier = Frontier::with_seeds(vec![
                "/Content/UserGuide/gone.htm".to_string(),
                "/Content/UserGuide/alive.htm".to_string(),
            ]);
            crawl(&fetcher, &mut frontier, &documents_dir, &base_url).unwrap()
        })
        .await
        .unwrap()
    };

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "Alive");
    assert!(documents_dir.join("Content/UserGuide/alive.html").is_file());
    assert!(!documents_dir.join("Content/UserGuide/gone.html").exists());
}
