//! Symbol help harvesting
//!
//! Primitive glyphs (`⌽`, `⍋`, ...) have no ToC presence; the RIDE editor
//! ships a help script mapping each symbol to its online help URL. We fetch a
//! pinned revision of that script, patch it so it runs headless, execute it
//! under node, and read the mapping off stdout as JSON. Script execution sits
//! behind [`ScriptEvaluator`] so tests never need node installed.

use crate::fetch::FetchCache;
use crate::{Result, SeedError};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Runs a JavaScript source to completion and returns its stdout.
pub trait ScriptEvaluator {
    fn evaluate(&self, source: &str) -> std::result::Result<String, SeedError>;
}

/// Evaluates scripts with the system `node` binary.
///
/// The script is written into `work_dir` before execution so a failing run
/// leaves something to inspect.
pub struct NodeEvaluator {
    pub work_dir: PathBuf,
}

impl ScriptEvaluator for NodeEvaluator {
    fn evaluate(&self, source: &str) -> std::result::Result<String, SeedError> {
        fs::create_dir_all(&self.work_dir)?;
        let script = self.work_dir.join("hlp.js");
        fs::write(&script, source)?;

        let output = Command::new("node").arg(&script).output()?;
        if !output.status.success() {
            return Err(SeedError::ScriptEval(format!(
                "node exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Wraps the raw help script so it runs outside the editor.
///
/// The script expects a global `D` with editor services and registers its
/// table as `D.hlp`; we provide the one service it calls, drive
/// initialization for the given Dyalog version, and print the table as JSON.
pub fn patch_help_script(source: &str, version: &str) -> String {
    format!(
        "D={{aboutDetails: () => ''}}\n{source}D.InitHelp('{version}')\n;console.log(JSON.stringify(D.hlp));"
    )
}

/// Harvests the symbol-to-page table.
///
/// Returns cleaned display names mapped to site-relative `/Content/` paths.
/// The help script URLs carry the page path in their fragment; entries
/// without a fragment point outside the help content and are dropped.
pub fn scrape_symbol_help(
    fetcher: &FetchCache,
    evaluator: &dyn ScriptEvaluator,
    hlp_js_url: &str,
    version: &str,
) -> Result<BTreeMap<String, String>> {
    info!("harvesting symbol help from {hlp_js_url}");
    let source = fetcher.fetch_absolute_text(hlp_js_url)?;
    let raw = evaluator.evaluate(&patch_help_script(&source, version))?;
    let table: BTreeMap<String, String> =
        serde_json::from_str(&raw).map_err(SeedError::from)?;

    let symbols = filter_symbol_help(table);
    debug!("symbol help yielded {} entries", symbols.len());
    Ok(symbols)
}

/// Keeps entries whose URL carries a `#fragment` page path, rewriting each to
/// the site-relative path the crawler understands.
pub fn filter_symbol_help(
    table: impl IntoIterator<Item = (String, String)>,
) -> BTreeMap<String, String> {
    table
        .into_iter()
        .filter_map(|(name, url)| {
            let (_, fragment) = url.split_once('#')?;
            Some((name, format!("/Content/{fragment}")))
        })
        .collect()
}
