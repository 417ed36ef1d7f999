//! Crawl frontier
//!
//! Owns the mutable crawl state: the set of discovered-but-unfetched page
//! paths, the side set of asset paths, and the terminal done set. A page that
//! reaches the done set never re-enters the pending set, whether its fetch
//! succeeded or failed. Pop order is unspecified — correctness depends only
//! on every reachable page being visited exactly once.

use std::collections::HashSet;

/// Work queues driving the crawl
#[derive(Debug, Default)]
pub struct Frontier {
    pending_pages: HashSet<String>,
    pending_assets: HashSet<String>,
    done: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier from the seed page paths.
    ///
    /// `/index.htm` is pre-marked done: it is the frameset wrapper around the
    /// help and must never be downloaded.
    pub fn with_seeds<I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut frontier = Self {
            done: HashSet::from(["/index.htm".to_string()]),
            ..Self::default()
        };
        frontier.add_pages(seeds);
        frontier
    }

    /// Pops an arbitrary pending page, or `None` when the crawl is finished.
    pub fn take_next_page(&mut self) -> Option<String> {
        let page = self.pending_pages.iter().next().cloned()?;
        self.pending_pages.remove(&page);
        Some(page)
    }

    /// Marks a page terminally processed (fetched or failed).
    pub fn mark_done(&mut self, page: &str) {
        self.done.insert(page.to_string());
        self.pending_pages.remove(page);
    }

    /// Unions newly discovered page paths into the pending set, minus
    /// everything already done.
    pub fn add_pages<I>(&mut self, pages: I)
    where
        I: IntoIterator<Item = String>,
    {
        for page in pages {
            if !self.done.contains(&page) {
                self.pending_pages.insert(page);
            }
        }
    }

    /// Records asset paths for the post-crawl download pass.
    pub fn add_assets<I>(&mut self, assets: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.pending_assets.extend(assets);
    }

    /// Takes the collected asset set, leaving the frontier's empty.
    pub fn take_assets(&mut self) -> HashSet<String> {
        std::mem::take(&mut self.pending_assets)
    }

    pub fn pending_pages(&self) -> usize {
        self.pending_pages.len()
    }

    pub fn done_pages(&self) -> usize {
        self.done.len()
    }

    pub fn pending_assets(&self) -> usize {
        self.pending_assets.len()
    }

    pub fn is_done(&self, page: &str) -> bool {
        self.done.contains(page)
    }
}
