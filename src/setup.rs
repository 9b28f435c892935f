//! Project scaffolding.
//!
//! `lantern setup <DIR>` writes a starter tree that builds cleanly on
//! the first run:
//!
//! ```text
//! <DIR>/
//! ├── _lantern.yaml            # build configuration
//! ├── Makefile                 # `make generate` / `make clean`
//! ├── index.md                 # front matter + one heading
//! ├── _build/                  # output root (empty)
//! ├── _static/
//! │   └── styles.css
//! └── _templates/
//!     └── default.html         # references {{ title }}, {{ ROOT }}, {{ BODY }}
//! ```
//!
//! The project directory is created first and must not already exist —
//! refusing to scaffold into an existing directory beats clobbering
//! someone's files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::output;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("project directory `{path}` already exists")]
    AlreadyExists { path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

const SUBDIRS: &[&str] = &["_build", "_static", "_templates"];

const CONFIG: &str = "\
source: .
build: _build
ignore:
  - _build
static_ext:
  - .css
  - .js
  - .jpg
  - .png
";

const MAKEFILE: &str = "\
# Default lantern Makefile

BLD := _build

.PHONY: generate
generate:
\tlantern build

.PHONY: clean
clean:
\trm -rf $(BLD)
";

const INDEX: &str = "\
---
title: Index page
---

# Your lantern site
";

const DEFAULT_TEMPLATE: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"UTF-8\">
  <title>{{ title }}</title>
  <link rel=\"stylesheet\" href=\"{{ ROOT }}/_static/styles.css\">
</head>
<body>
{{ BODY }}
</body>
</html>
";

const STYLES: &str = "/* lantern site CSS */\n";

/// Starter file table: path relative to the project directory, content.
const FILES: &[(&str, &str)] = &[
    ("_lantern.yaml", CONFIG),
    ("Makefile", MAKEFILE),
    ("index.md", INDEX),
    ("_templates/default.html", DEFAULT_TEMPLATE),
    ("_static/styles.css", STYLES),
];

/// Scaffold a new project at `dir`.
pub fn setup(dir: &Path) -> Result<(), SetupError> {
    match fs::create_dir(dir) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(SetupError::AlreadyExists {
                path: dir.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    }
    output::print_item(format!("Made project directory `{}`", dir.display()));

    for subdir in SUBDIRS {
        fs::create_dir(dir.join(subdir))?;
        output::print_item(format!("Made subdirectory `{}`", dir.join(subdir).display()));
    }

    for (name, content) in FILES {
        fs::write(dir.join(name), content)?;
        output::print_item(format!("Created `{}`", dir.join(name).display()));
    }

    Ok(())
}
