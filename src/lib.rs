//! dyalog-docset: builds an offline Dash docset from the Dyalog APL help site
//!
//! This crate implements the crawl-and-normalize engine that mirrors the
//! online help, sanitizes every page into portable HTML, and builds the
//! searchIndex database the docset viewer queries.

pub mod bundle;
pub mod classify;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod index;
pub mod links;
pub mod sanitize;
pub mod seeds;

use thiserror::Error;

/// Main error type for docset generation
#[derive(Debug, Error)]
pub enum DocsetError {
    #[error("download failed: {url} returned HTTP {status}")]
    Retrieval { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("no entry type rule matches path {path:?} (title {title:?}); the classification table needs updating")]
    Unclassified { path: String, title: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("seed discovery error: {0}")]
    Seed(#[from] SeedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while discovering seed pages (ToC scrape, symbol help)
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed JSONP payload from {path}: {reason}")]
    JsonpFormat { path: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("help script evaluation failed: {0}")]
    ScriptEval(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for docset operations
pub type Result<T> = std::result::Result<T, DocsetError>;

// Re-export commonly used types
pub use classify::{classify, EntryType};
pub use config::Settings;
pub use crawler::build_docset;
pub use frontier::Frontier;
