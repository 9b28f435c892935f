//! Build configuration.
//!
//! A project is described by one `_lantern.yaml` at its root:
//!
//! ```yaml
//! source: .             # source root, relative to the config file
//! build: _build         # output root
//! ignore:               # top-level source dirs skipped in the document pass
//!   - _build
//! static_ext:           # file suffixes copied verbatim from _static/
//!   - .css
//!   - .js
//!   - .jpg
//!   - .png
//! ```
//!
//! The configuration is loaded once and passed by value into the build
//! orchestrator — nothing downstream reads it from a well-known path or
//! any other ambient state. The orchestrator treats a loaded config as
//! fully validated. Unknown keys are rejected to catch typos early.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Well-known configuration filename at the project root.
pub const CONFIG_FILENAME: &str = "_lantern.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to find configuration file `{path}`")]
    Missing { path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("YAML parse error in `{path}`: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    /// Remediation guidance suitable for printing under the error line.
    pub fn remediation(&self) -> Option<String> {
        match self {
            ConfigError::Missing { .. } => Some(
                "> Did you set up a project?\n\
                 \x20   - Usage: $ lantern setup <PROJECT-NAME>\n\
                 > Check that you are in the root project directory."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// One project's build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Source root directory.
    pub source: PathBuf,
    /// Output root directory.
    pub build: PathBuf,
    /// Top-level source directory names skipped during the document pass.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// File suffixes copied verbatim from `_static/`.
    #[serde(default)]
    pub static_ext: Vec<String>,
}

/// Load the configuration from `path`.
///
/// A missing file is its own error variant — it usually means the user
/// is in the wrong directory, and the CLI prints setup guidance for it.
pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "source: .\nbuild: _build\nignore: [_build, drafts]\nstatic_ext: ['.css', '.png']\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.source, PathBuf::from("."));
        assert_eq!(config.build, PathBuf::from("_build"));
        assert_eq!(config.ignore, vec!["_build", "drafts"]);
        assert_eq!(config.static_ext, vec![".css", ".png"]);
    }

    #[test]
    fn ignore_and_static_ext_default_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "source: site\nbuild: out\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.ignore.is_empty());
        assert!(config.static_ext.is_empty());
    }

    #[test]
    fn missing_file_has_remediation() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(&tmp.path().join(CONFIG_FILENAME)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
        let guidance = err.remediation().unwrap();
        assert!(guidance.contains("lantern setup"));
    }

    #[test]
    fn malformed_yaml_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "source: [unclosed\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        assert!(err.remediation().is_none());
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "source: .\nbuild: _build\nstatic_exts: []\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Yaml { .. })));
    }
}
