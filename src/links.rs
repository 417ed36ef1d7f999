//! Resource reference rules
//!
//! A resource reference is a site-relative URL path identifying a page or an
//! asset. This module owns the rules for recognizing same-origin hrefs,
//! resolving them against the referring page, and rewriting the source site's
//! `.htm` extension to the portable `.html` the docset viewer expects.

use percent_encoding::percent_decode_str;
use url::Url;

/// Dummy origin used for relative resolution; only the resulting path is kept.
const RESOLVE_ORIGIN: &str = "https://docset.invalid";

/// Checks whether an href is a same-origin/relative reference worth following.
///
/// A reference qualifies when it carries no network location (no scheme, no
/// `//host` prefix) and is not a `javascript:` or `mailto:` pseudo-URL.
pub fn is_relative_href(href: &str) -> bool {
    if href.starts_with("javascript:") || href.starts_with("mailto:") {
        return false;
    }
    if href.starts_with("//") {
        return false;
    }
    // Anything that parses on its own is an absolute URL and off-site.
    Url::parse(href).is_err()
}

/// Resolves an href found on `page` to a site-relative path.
///
/// The fragment is stripped first: a page and the same page with a different
/// `#fragment` are the same resource. If the base contains the `../index.htm`
/// sentinel the link is a `_top` redirect back to the site root and the
/// fragment carries the real target under `/Content/`. Everything else
/// resolves relatively against the referring page's path.
///
/// Returns `None` for hrefs that cannot be interpreted as a path.
pub fn resolve_href(page: &str, href: &str) -> Option<String> {
    let (base, fragment) = split_fragment(href);

    if base.contains("../index.htm") {
        return Some(format!("/Content/{fragment}"));
    }

    let origin = Url::parse(RESOLVE_ORIGIN).ok()?;
    let resolved = origin.join(page).ok()?.join(base).ok()?;

    // Url::join percent-encodes spaces and friends; references are compared
    // and mapped to cache paths in decoded form.
    let path = percent_decode_str(resolved.path())
        .decode_utf8_lossy()
        .into_owned();
    Some(path)
}

/// Rewrites a trailing `.htm` of the path part to `.html`, keeping any
/// fragment. Already-portable hrefs pass through unchanged, so the rewrite is
/// idempotent.
pub fn rewrite_extension(href: &str) -> String {
    let (base, fragment) = split_fragment(href);
    let base = if base.ends_with(".htm") {
        format!("{base}l")
    } else {
        base.to_string()
    };
    if fragment.is_empty() && !href.contains('#') {
        base
    } else {
        format!("{base}#{fragment}")
    }
}

/// Normalizes an index path's extension to the portable `.html` form.
pub fn normalize_extension(path: &str) -> String {
    let stem = path
        .strip_suffix(".html")
        .or_else(|| path.strip_suffix(".htm"))
        .unwrap_or(path);
    format!("{stem}.html")
}

fn split_fragment(href: &str) -> (&str, &str) {
    match href.split_once('#') {
        Some((base, fragment)) => (base, fragment),
        None => (href, ""),
    }
}
