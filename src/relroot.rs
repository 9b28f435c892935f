//! Root-relative path computation.
//!
//! Output documents mirror the source tree under a build root whose
//! absolute mount point is unknown at build time. Every page therefore
//! references shared assets through a prefix of `..` segments that walks
//! back up to the site root — `styles.css` becomes
//! `{{ ROOT }}/_static/styles.css` in a template, and `ROOT` resolves to
//! `.` for `index.md` but `../..` for `guides/install/index.md`.
//!
//! Pure path arithmetic; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

/// Relative path from a document's output location back to the site root.
///
/// Depth is the number of directories between `source_root` and the
/// document — the document's own filename is not counted. A document
/// directly under the root yields `.` rather than an empty path, so the
/// result is always safe to prepend to an asset path.
///
/// A document that isn't prefixed by `source_root` is treated as already
/// root-relative.
pub fn relative_root(document: &Path, source_root: &Path) -> PathBuf {
    let relative = document.strip_prefix(source_root).unwrap_or(document);
    let depth = relative.components().count().saturating_sub(1);

    if depth == 0 {
        return PathBuf::from(".");
    }

    let mut prefix = PathBuf::new();
    for _ in 0..depth {
        prefix.push("..");
    }
    prefix
}
