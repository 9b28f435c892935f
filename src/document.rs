//! Document loading: front matter + markdown body → a template-ready record.
//!
//! A source document is a markdown file that **must** open with a
//! complete YAML front matter block:
//!
//! ```text
//! ---
//! title: Installing
//! template: guide
//! ---
//!
//! # Requirements
//! ...
//! ```
//!
//! Loading parses the front matter into a dynamically-keyed mapping
//! (keys are user-defined; values may be strings, numbers, booleans, or
//! sequences — whatever the document's template consumes), renders the
//! body through [`crate::markdown`], and injects two reserved computed
//! keys:
//!
//! - [`BODY_KEY`] — the rendered HTML body, trimmed
//! - [`ROOT_KEY`] — the relative path back to the site root, from
//!   [`crate::relroot::relative_root`]
//!
//! If a document's own front matter uses `BODY` or `ROOT`, the computed
//! values silently overwrite the user's — the reserved keys always win.
//!
//! A document without a leading front matter block is a hard error.
//! There is no fallback metadata and no partial load: a half-understood
//! document produces no output at all.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::markdown;
use crate::relroot::relative_root;

/// Reserved key holding the rendered HTML body.
pub const BODY_KEY: &str = "BODY";

/// Reserved key holding the root-relative path prefix.
pub const ROOT_KEY: &str = "ROOT";

/// Front matter key naming the template to render with.
pub const TEMPLATE_KEY: &str = "template";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error reading `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{path}` does not begin with complete YAML metadata")]
    MissingFrontMatter { path: PathBuf },
    #[error("invalid YAML metadata in `{path}`: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("metadata in `{path}` is not a key/value mapping")]
    NotAMapping { path: PathBuf },
}

/// One loaded document, ready for template substitution.
///
/// Created fresh per build attempt and never persisted; the orchestrator
/// feeds it to the template and drops it.
#[derive(Debug, Clone)]
pub struct Record {
    /// Front matter fields plus the reserved `BODY` and `ROOT` keys.
    pub fields: Mapping,
}

impl Record {
    /// Template name declared in front matter, if any.
    pub fn template_name(&self) -> Option<&str> {
        self.fields
            .get(&Value::from(TEMPLATE_KEY))
            .and_then(Value::as_str)
    }

    /// Rendered HTML body.
    pub fn body(&self) -> Option<&str> {
        self.fields.get(&Value::from(BODY_KEY)).and_then(Value::as_str)
    }
}

/// Load one source document.
///
/// `source_root` anchors the computed `ROOT` prefix; `path` should live
/// under it. The only side effect is the file read.
pub fn load(path: &Path, source_root: &Path) -> Result<Record, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let rendered = markdown::render(&text);
    let Some(raw) = rendered.metadata else {
        return Err(DocumentError::MissingFrontMatter {
            path: path.to_path_buf(),
        });
    };

    let value: Value = serde_yaml::from_str(&raw).map_err(|source| DocumentError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Mapping(mut fields) = value else {
        return Err(DocumentError::NotAMapping {
            path: path.to_path_buf(),
        });
    };

    // Reserved keys overwrite any front matter using the same names.
    fields.insert(Value::from(BODY_KEY), Value::from(rendered.html));
    fields.insert(
        Value::from(ROOT_KEY),
        Value::from(
            relative_root(path, source_root)
                .to_string_lossy()
                .into_owned(),
        ),
    );

    Ok(Record { fields })
}
