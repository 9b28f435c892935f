//! Template pool: named templates loaded once per build.
//!
//! Templates live flat in the project's `_templates` directory; the
//! template *name* is the file stem, so `_templates/guide.html` is
//! resolved by a document declaring `template: guide`. The directory is
//! scanned non-recursively at build start into a minijinja environment;
//! after that the pool is read-only for the rest of the pass, an
//! O(templates) cost amortized across every document sharing them.
//!
//! A document's record fields become the template's named values, so a
//! template sees whatever the front matter defines plus the reserved
//! `BODY` and `ROOT` keys:
//!
//! ```html
//! <!DOCTYPE html>
//! <html lang="en">
//! <head>
//!   <title>{{ title }}</title>
//!   <link rel="stylesheet" href="{{ ROOT }}/_static/styles.css">
//! </head>
//! <body>
//! {{ BODY }}
//! </body>
//! </html>
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use minijinja::Environment;
use serde_yaml::Mapping;
use thiserror::Error;

/// Template used when a document declares none.
pub const DEFAULT_TEMPLATE: &str = "default";

/// File extension of template files.
const TEMPLATE_EXT: &str = "html";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error reading templates from `{dir}`: {source}")]
    Io {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no template named `{name}` in `{dir}`")]
    NotFound { name: String, dir: PathBuf },
    #[error("template error: {0}")]
    Engine(#[from] minijinja::Error),
}

/// All templates for one build invocation, keyed by file stem.
#[derive(Debug)]
pub struct TemplatePool {
    env: Environment<'static>,
    dir: PathBuf,
    names: BTreeSet<String>,
}

impl TemplatePool {
    /// Scan `dir` (non-recursively) for `*.html` files and compile them.
    ///
    /// A missing directory yields an empty pool; resolution will then
    /// fail with `NotFound`, which carries the directory path the user
    /// needs to create.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let io_err = |source| TemplateError::Io {
            dir: dir.to_path_buf(),
            source,
        };

        let mut env = Environment::new();
        let mut names = BTreeSet::new();

        if dir.is_dir() {
            for entry in fs::read_dir(dir).map_err(io_err)? {
                let path = entry.map_err(io_err)?.path();
                if !path.is_file() {
                    continue;
                }
                let is_template = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXT));
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if !is_template {
                    continue;
                }

                let content = fs::read_to_string(&path).map_err(io_err)?;
                // Registered under the bare stem: minijinja keys auto-escaping
                // off the name's extension, and these templates receive
                // pre-rendered HTML in `BODY` that must pass through raw.
                env.add_template_owned(stem.to_string(), content)?;
                names.insert(stem.to_string());
            }
        }

        Ok(Self {
            env,
            dir: dir.to_path_buf(),
            names,
        })
    }

    /// Whether `name` is present in the pool.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Template names in the pool, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Path of the file backing template `name`.
    ///
    /// The orchestrator feeds this to the staleness oracle — a touched
    /// template must rebuild every document rendering through it.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{TEMPLATE_EXT}"))
    }

    /// Resolve `name` to its backing file path, or `NotFound`.
    ///
    /// Resolution precedes the staleness check: the oracle requires its
    /// sources to exist, and a document declaring an unknown template is
    /// fatal whether or not its output happens to be current.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, TemplateError> {
        if !self.contains(name) {
            return Err(TemplateError::NotFound {
                name: name.to_string(),
                dir: self.dir.clone(),
            });
        }
        Ok(self.source_path(name))
    }

    /// Render template `name` with a record's fields as named values.
    pub fn render(&self, name: &str, fields: &Mapping) -> Result<String, TemplateError> {
        self.resolve(name)?;
        let template = self.env.get_template(name)?;
        Ok(template.render(minijinja::Value::from_serialize(fields))?)
    }
}
