//! HTML sanitizer
//!
//! Rewrites a fetched help page, in place, into the portable form the docset
//! viewer renders. Five operations, applied in order, each idempotent on its
//! own output: strip site furniture, strip scripts, rewrite same-origin link
//! extensions, insert section anchors, and record the view-online comment.

use crate::links::{is_relative_href, rewrite_extension};
use dom_query::{Document, NodeRef, Selection};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// MadCap Flare chrome that makes no sense offline.
const FURNITURE_SELECTOR: &str = ".MCWebHelpFramesetLinkTop, .breadcrumbs";

/// Heading tags that delimit sections; `h3` is the page title and excluded.
const HEADING_SELECTOR: &str = "h4, h5, p.TableCaption";

/// Cleaned heading texts that never get an anchor.
const UNWANTED_HEADINGS: &[&str] = &["example", "examples"];

/// Everything except unreserved characters is percent-encoded, `/` included,
/// so an anchor name can never be misread as a path separator.
const ANCHOR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Sanitizes a parsed page in place.
///
/// `page` is the page's site path (used for the view-online comment) and
/// `base_url` the remote help root.
pub fn sanitize_document(doc: &Document, page: &str, base_url: &str) {
    // Remove the "Open topic with navigation" link and breadcrumbs.
    doc.select(FURNITURE_SELECTOR).remove();

    // The viewer renders static HTML; scripts are inert at best.
    doc.select("body").remove_attr("onload");
    doc.select("script").remove();

    // Patch relative links to point at the renamed .html pages.
    rewrite_relative_links(doc);

    insert_section_anchors(doc);
    insert_online_comment(doc, page, base_url);
}

fn rewrite_relative_links(doc: &Document) {
    for node in doc.select("a[href]").nodes().to_vec() {
        let link = Selection::from(node);
        let Some(href) = link.attr("href") else {
            continue;
        };
        if !is_relative_href(&href) {
            continue;
        }
        let rewritten = rewrite_extension(&href);
        if rewritten != *href {
            link.set_attr("href", &rewritten);
        }
    }
}

/// Collapses runs of whitespace and strips a trailing colon.
pub fn clean_heading_name(heading: &str) -> String {
    let collapsed = heading.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .strip_suffix(':')
        .unwrap_or(&collapsed)
        .to_string()
}

/// Inserts a named navigation anchor before each qualifying section heading.
///
/// Consecutive headings with identical cleaned text collapse to one anchor
/// (duplicate anchor names break jump-to-section). A page with fewer than two
/// qualifying headings gets none at all: a single section is redundant with
/// the page title.
fn insert_section_anchors(doc: &Document) {
    // Anchors from a previous pass mean there is nothing left to do.
    if doc.select("a.dashAnchor").exists() {
        return;
    }

    let nodes = doc.select(HEADING_SELECTOR).nodes().to_vec();
    let mut sections: Vec<(NodeRef, String)> = Vec::new();
    for node in nodes {
        let heading = Selection::from(node);
        let name = clean_heading_name(&heading.text());
        if !is_caption(&node) && UNWANTED_HEADINGS.contains(&name.to_lowercase().as_str()) {
            continue;
        }
        if sections.last().map(|(_, last)| last == &name) == Some(true) {
            continue;
        }
        sections.push((node, name));
    }

    if sections.len() < 2 {
        return;
    }

    for (node, name) in sections {
        let heading = Selection::from(node);
        let encoded = utf8_percent_encode(&name, ANCHOR_ENCODE_SET).to_string();
        let replacement = format!(
            r#"<a name="//apple_ref/cpp/Section/{encoded}" class="dashAnchor"></a>{original}"#,
            original = heading.html()
        );
        heading.replace_with_html(replacement);
    }
}

fn is_caption(node: &NodeRef) -> bool {
    node.node_name().as_deref() == Some("p")
}

/// Records the original online location so the viewer can offer to open the
/// live page. The comment sits at the top of the `<html>` element; the
/// viewer finds it by position.
fn insert_online_comment(doc: &Document, page: &str, base_url: &str) {
    let marker = format!(
        "Online page at {}/#{}",
        base_url.trim_end_matches('/'),
        page.strip_prefix("/Content/").unwrap_or(page)
    );

    let html_element = doc.select("html");
    let inner = html_element.inner_html();
    if inner.starts_with(&format!("<!--{marker}-->")) {
        return;
    }
    html_element.set_html(format!("<!--{marker}-->{inner}"));
}
