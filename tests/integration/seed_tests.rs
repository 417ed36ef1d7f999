//! Integration tests for seed discovery
//!
//! The ToC scrape runs against a wiremock stand-in for the help site; symbol
//! help runs with a canned script evaluator so the tests never execute node.

use dyalog_docset::fetch::{build_http_client, FetchCache};
use dyalog_docset::seeds::{scrape_help_toc, scrape_symbol_help, ScriptEvaluator};
use dyalog_docset::SeedError;
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

#[tokio::test]
async fn test_toc_scrape_unions_chunks_and_caches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Data/Tocs/Dyalog.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"define({"numchunks":"2","prefix":"Dyalog_Toc"});"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Data/Tocs/Dyalog_Toc0.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"define({"/Content/UserGuide/intro.htm":{"i":[1]},"___":{}});"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Data/Tocs/Dyalog_Toc1.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"define({"/Content/UserGuide/details.htm":{"i":[2]}});"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let cache_dir = dir.path().to_path_buf();

    let (first, second) = tokio::task::spawn_blocking(move || {
        let fetcher = fetch_cache(&base_url, &cache_dir);
        let first = scrape_help_toc(&fetcher).unwrap();
        // Second scrape must come from the JSON cache; the expect(1) mounts
        // above fail the test if it hits the network again.
        let second = scrape_help_toc(&fetcher).unwrap();
        (first, second)
    })
    .await
    .unwrap();

    let pages: Vec<&str> = first.iter().map(String::as_str).collect();
    assert_eq!(
        pages,
        vec![
            "/Content/UserGuide/details.htm",
            "/Content/UserGuide/intro.htm"
        ]
    );
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_toc_scrape_rejects_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Data/Tocs/Dyalog.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not jsonp</html>"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let cache_dir = dir.path().to_path_buf();

    let result = tokio::task::spawn_blocking(move || {
        scrape_help_toc(&fetch_cache(&base_url, &cache_dir))
    })
    .await
    .unwrap();

    assert!(result.is_err());
}

/// Evaluator returning a canned symbol table, recording what it was asked to
/// run.
struct CannedEvaluator {
    table: &'static str,
}

impl ScriptEvaluator for CannedEvaluator {
    fn evaluate(&self, source: &str) -> Result<String, SeedError> {
        // The harness wrapper must be present in what would run under node.
        assert!(source.contains("D.InitHelp('18.0')"));
        assert!(source.contains("console.log(JSON.stringify(D.hlp))"));
        Ok(self.table.to_string())
    }
}

#[tokio::test]
async fn test_symbol_help_harvest_with_canned_evaluator() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hlp.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("var D_src = 1;\n"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let base_url = mock_server.uri();
    let hlp_js_url = format!("{base_url}/hlp.js");
    let cache_dir = dir.path().to_path_buf();

    let symbols = tokio::task::spawn_blocking(move || {
        let fetcher = fetch_cache(&base_url, &cache_dir);
        let evaluator = CannedEvaluator {
            table: r##"{"⌽":"https://help.dyalog.com/latest/#Language/Symbols/Circle Stile.htm","About":"https://www.dyalog.com/"}"##,
        };
        scrape_symbol_help(&fetcher, &evaluator, &hlp_js_url, "18.0").unwrap()
    })
    .await
    .unwrap();

    assert_eq!(symbols.len(), 1);
    assert_eq!(
        symbols.get("⌽").map(String::as_str),
        Some("/Content/Language/Symbols/Circle Stile.htm")
    );
}
