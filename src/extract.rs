//! Link extraction
//!
//! Pulls same-origin page links and stylesheet/image asset references out of
//! a parsed page. This must run before sanitization: the sanitizer deletes
//! some of the very elements carrying these references.

use crate::links::{is_relative_href, resolve_href};
use dom_query::{Document, Selection};

/// References discovered on one page
#[derive(Debug, Default)]
pub struct PageRefs {
    /// Site-relative page paths to crawl.
    pub pages: Vec<String>,
    /// Site-relative stylesheet/image paths to mirror verbatim.
    pub assets: Vec<String>,
}

/// Extracts all same-origin references from a page.
///
/// `page` is the page's own site path, used to resolve relative hrefs.
pub fn extract_refs(doc: &Document, page: &str) -> PageRefs {
    let mut refs = PageRefs::default();

    collect(doc, "a[href]", "href", page, &mut refs.pages);
    collect(doc, r#"link[rel="stylesheet"][href]"#, "href", page, &mut refs.assets);
    collect(doc, "img[src]", "src", page, &mut refs.assets);

    refs
}

/// Extracts the page title used as the index display name.
pub fn extract_title(doc: &Document) -> Option<String> {
    let title = doc.select("title").text().trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn collect(doc: &Document, selector: &str, attr: &str, page: &str, out: &mut Vec<String>) {
    for node in doc.select(selector).nodes() {
        let element = Selection::from(*node);
        let Some(value) = element.attr(attr) else {
            continue;
        };
        if !is_relative_href(&value) {
            continue;
        }
        if let Some(resolved) = resolve_href(page, &value) {
            out.push(resolved);
        }
    }
}
