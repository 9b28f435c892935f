//! Build orchestration: one full incremental pass over a project.
//!
//! ## Pass structure
//!
//! ```text
//! site/                         # source root (config: source)
//! ├── _lantern.yaml
//! ├── _templates/               # template pool, loaded once
//! │   └── default.html
//! ├── _static/                  # static pass: copy-if-stale
//! │   └── styles.css
//! ├── index.md                  # document pass: render-if-stale
//! ├── guides/
//! │   └── install.md
//! └── _build/                   # output root (config: build)
//!     ├── _static/styles.css
//!     ├── index.html
//!     └── guides/install.html
//! ```
//!
//! The **static pass** mirrors every file under `_static/` whose suffix
//! is in the configured list, copying byte-for-byte when the output is
//! stale against its source.
//!
//! The **document pass** walks every `*.md` under the source root
//! (skipping configured top-level ignore names, `_build` foremost),
//! loads each document, resolves its declared template, and re-renders
//! only when the output is stale against *either* the document or the
//! template file.
//!
//! The pass is single-threaded and synchronous; it returns whether any
//! artifact was written, which drives the one-line summary. Any error —
//! malformed document, unknown template, filesystem failure — aborts
//! the whole pass. No skip-and-continue: no output is better than
//! silently-wrong output.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::config::BuildConfig;
use crate::document::{self, DocumentError};
use crate::output;
use crate::stale::is_stale;
use crate::template::{DEFAULT_TEMPLATE, TemplateError, TemplatePool};

/// Directory under the source root holding the template pool.
pub const TEMPLATE_DIR: &str = "_templates";

/// Directory under the source root holding verbatim-copied assets.
pub const STATIC_DIR: &str = "_static";

/// Extension identifying source documents.
const DOCUMENT_EXT: &str = "md";

/// Extension of rendered outputs.
const OUTPUT_EXT: &str = "html";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Run one build pass. Returns whether any artifact was written.
///
/// `config.source` and `config.build` are resolved against
/// `project_root` (the directory holding the configuration file), so
/// the caller's working directory never matters.
pub fn generate(config: &BuildConfig, project_root: &Path) -> Result<bool, GenerateError> {
    let source = project_root.join(&config.source);
    let build = project_root.join(&config.build);

    if !build.is_dir() {
        fs::create_dir_all(&build)?;
        output::print_item(format!("Made build directory: {}", build.display()));
    }

    let pool = TemplatePool::load(&source.join(TEMPLATE_DIR))?;

    let mut updates = false;
    updates |= copy_static(config, &source, &build)?;
    updates |= build_documents(config, &source, &build, &pool)?;
    Ok(updates)
}

/// Static pass: mirror stale `_static/` files into the build tree.
fn copy_static(config: &BuildConfig, source: &Path, build: &Path) -> Result<bool, GenerateError> {
    let static_root = source.join(STATIC_DIR);
    if !static_root.is_dir() {
        return Ok(false);
    }

    let mut updates = false;
    for entry in WalkDir::new(&static_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_static_asset(entry.path(), &config.static_ext) {
            continue;
        }

        let src = entry.path();
        let dst = build.join(relative_to(src, source));
        if !is_stale(&dst, &[src])? {
            continue;
        }

        ensure_parent(&dst)?;
        fs::copy(src, &dst)?;
        output::print_item(format!("Copied {} to {}", src.display(), dst.display()));
        updates = true;
    }
    Ok(updates)
}

/// Document pass: render stale markdown documents through their templates.
fn build_documents(
    config: &BuildConfig,
    source: &Path,
    build: &Path,
    pool: &TemplatePool,
) -> Result<bool, GenerateError> {
    let mut updates = false;

    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e, &config.ignore));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), DOCUMENT_EXT) {
            continue;
        }

        let src = entry.path();
        let dst = build
            .join(relative_to(src, source))
            .with_extension(OUTPUT_EXT);

        // The document must load before the staleness check — it names
        // the template, which is the second staleness dimension.
        let record = document::load(src, source)?;
        let name = record.template_name().unwrap_or(DEFAULT_TEMPLATE);
        let template_path = pool.resolve(name)?;

        if !is_stale(&dst, &[src, &template_path])? {
            continue;
        }

        let rendered = pool.render(name, &record.fields)?;
        ensure_parent(&dst)?;
        fs::write(&dst, rendered)?;
        output::print_item(format!("Built {} from {}", dst.display(), src.display()));
        updates = true;
    }
    Ok(updates)
}

/// Top-level entries named in the ignore list are pruned entirely.
fn is_ignored(entry: &DirEntry, ignore: &[String]) -> bool {
    entry.depth() == 1 && ignore.iter().any(|name| entry.file_name() == name.as_str())
}

/// Suffix match against the configured static extension list.
fn is_static_asset(path: &Path, static_ext: &[String]) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    static_ext.iter().any(|ext| name.ends_with(ext.as_str()))
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

/// Mirror path under the build root: entry path relative to the source root.
fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Create intervening output directories, announcing each creation.
fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.is_dir()
    {
        fs::create_dir_all(parent)?;
        output::print_item(format!("Made subdirectory: {}", parent.display()));
    }
    Ok(())
}
