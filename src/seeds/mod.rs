//! Seed discovery
//!
//! Supplies the crawl frontier's initial page set from two external sources:
//! the help site's chunked JSONP table of contents, and the symbol-to-page
//! table harvested by executing the pinned RIDE help script. Both are
//! startup-critical: a malformed payload here is fatal, since no seeds means
//! no crawl.

pub mod jsonp;
pub mod ride;
pub mod toc;

pub use ride::{scrape_symbol_help, NodeEvaluator, ScriptEvaluator};
pub use toc::scrape_help_toc;
