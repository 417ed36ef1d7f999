//! dyalog-docset main entry point
//!
//! Command-line interface for building the Dyalog APL docset.

use clap::Parser;
use dyalog_docset::config::{Settings, DEFAULT_BASE_URL, DEFAULT_HLP_JS_URL, DEFAULT_VERSION};
use dyalog_docset::crawler::build_docset;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// dyalog-docset: builds an offline Dash docset from the Dyalog help site
///
/// Crawls the online help, sanitizes every page into portable offline HTML,
/// harvests symbol help from the RIDE help script, and writes the docset
/// bundle with its search index.
#[derive(Parser, Debug)]
#[command(name = "dyalog-docset")]
#[command(version = "1.0.0")]
#[command(about = "Builds a Dash docset from the Dyalog APL online help", long_about = None)]
struct Cli {
    /// Content root of the online help
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Output directory for the docset bundle
    #[arg(long, default_value = "Dyalog APL.docset")]
    docset_dir: PathBuf,

    /// Download cache directory (kept between runs; delete it to refetch)
    #[arg(long, default_value = "tmp")]
    cache_dir: PathBuf,

    /// Directory holding the static Info.plist and icon
    #[arg(long, default_value = "res")]
    res_dir: PathBuf,

    /// Dyalog version passed to the help script
    #[arg(long, default_value = DEFAULT_VERSION)]
    dyalog_version: String,

    /// URL of the pinned RIDE help script
    #[arg(long, default_value = DEFAULT_HLP_JS_URL)]
    hlp_js_url: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let settings = Settings {
        base_url: cli.base_url.trim_end_matches('/').to_string(),
        docset_dir: cli.docset_dir,
        cache_dir: cli.cache_dir,
        res_dir: cli.res_dir,
        version: cli.dyalog_version,
        hlp_js_url: cli.hlp_js_url,
    };

    if settings.cache_dir.exists() {
        tracing::warn!(
            "cache directory {} exists; cached pages may be stale (delete it to refetch)",
            settings.cache_dir.display()
        );
    }

    match build_docset(&settings) {
        Ok(()) => {
            tracing::info!("Docset build completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Docset build failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dyalog_docset=info,warn"),
            1 => EnvFilter::new("dyalog_docset=debug,info"),
            2 => EnvFilter::new("dyalog_docset=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
