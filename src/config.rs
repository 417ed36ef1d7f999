//! Runtime settings for a docset build
//!
//! Everything here has a sensible default for the current Dyalog release;
//! the CLI only overrides them for testing or when a new version ships.

use std::path::PathBuf;

/// Default content root of the online help.
pub const DEFAULT_BASE_URL: &str = "https://help.dyalog.com/latest";

/// Dyalog version passed to the help script when harvesting symbol help.
/// Keep this updated for new versions of Dyalog, together with the pinned
/// script URL below.
pub const DEFAULT_VERSION: &str = "18.0";

/// Pinned revision of the RIDE help script used for symbol lookups.
pub const DEFAULT_HLP_JS_URL: &str =
    "https://raw.githubusercontent.com/Dyalog/ride/aa40802d01adf1410a9a9af14149437961e5389c/src/hlp.js";

/// Settings for one docset build
#[derive(Debug, Clone)]
pub struct Settings {
    /// Remote help site root, without a trailing slash.
    pub base_url: String,

    /// Directory the finished docset bundle is written to.
    pub docset_dir: PathBuf,

    /// Local fetch cache; mirrors the remote path hierarchy.
    pub cache_dir: PathBuf,

    /// Directory holding the static Info.plist and icon.
    pub res_dir: PathBuf,

    /// Dyalog version tag handed to the help script.
    pub version: String,

    /// URL of the pinned RIDE help script.
    pub hlp_js_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            docset_dir: PathBuf::from("Dyalog APL.docset"),
            cache_dir: PathBuf::from("tmp"),
            res_dir: PathBuf::from("res"),
            version: DEFAULT_VERSION.to_string(),
            hlp_js_url: DEFAULT_HLP_JS_URL.to_string(),
        }
    }
}
