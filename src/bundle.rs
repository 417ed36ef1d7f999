//! Docset bundle layout
//!
//! A Dash docset is a fixed directory shape:
//!
//! ```text
//! Dyalog APL.docset/
//!   icon.png
//!   Contents/
//!     Info.plist
//!     Resources/
//!       docSet.dsidx
//!       Documents/
//! ```
//!
//! This module owns the paths and the static-resource copy; the crawler and
//! the index writer fill in Documents/ and docSet.dsidx.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Paths inside one docset bundle
pub struct DocsetLayout {
    root: PathBuf,
}

impl DocsetLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contents_dir(&self) -> PathBuf {
        self.root.join("Contents")
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources").join("Documents")
    }

    /// Location of the searchIndex SQLite database.
    pub fn index_path(&self) -> PathBuf {
        self.contents_dir().join("Resources").join("docSet.dsidx")
    }

    /// Creates the full directory skeleton. Idempotent.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.documents_dir())?;
        Ok(())
    }

    /// Copies the static metadata files (Info.plist, icon) out of `res_dir`.
    ///
    /// A missing source file is only warned about: the docset still works
    /// without an icon, and a custom res directory may be deliberately
    /// partial.
    pub fn copy_static_resources(&self, res_dir: &Path) -> Result<()> {
        let copies = [
            (res_dir.join("Info.plist"), self.contents_dir().join("Info.plist")),
            (res_dir.join("icon.png"), self.root.join("icon.png")),
        ];
        for (src, dest) in copies {
            if !src.exists() {
                warn!("static resource {} not found, skipping", src.display());
                continue;
            }
            fs::copy(&src, &dest)?;
            debug!("copied {} -> {}", src.display(), dest.display());
        }
        Ok(())
    }
}
