use std::path::{Path, PathBuf};

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use crate::cli::{GraphFormat, RepoMode};
use crate::constants::paths::DEFAULT_CONFIG;
use crate::error::DepGraphError;

/// Settings read from the TOML configuration file
///
/// Every key is optional here; required values are checked once file and
/// command-line settings have been merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    pub package_name: Option<String>,
    pub repository_url: Option<String>,
    pub repo_mode: Option<RepoMode>,
    pub filter_substring: Option<String>,
    pub output_image: Option<PathBuf>,
    pub ascii_tree: Option<bool>,
    pub graph_format: Option<GraphFormat>,
    pub highlight_cycles: Option<bool>,
}

impl ConfigFile {
    /// Load the configuration for a run
    ///
    /// An explicitly given file must exist. Without one, `config.toml` in the
    /// current directory is read if present and an empty configuration is
    /// used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DepGraphError> {
        match explicit {
            Some(path) => Self::parse_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG);
                if path.is_file() {
                    Self::parse_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn parse_file(path: &Path) -> Result<Self, DepGraphError> {
        let content = std::fs::read_to_string(path).map_err(|e| DepGraphError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse_str(&content, &path.display().to_string())
    }

    /// Parse TOML text, labelling syntax errors with `name`
    pub fn parse_str(content: &str, name: &str) -> Result<Self, DepGraphError> {
        toml::from_str(content).map_err(|e| {
            // Try to extract span information from the error
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            DepGraphError::TomlParseError(Box::new(crate::error::TomlParseError {
                file: name.to_string(),
                source_code: NamedSource::new(name, content.to_string()),
                span,
                source: e,
            }))
        })
    }
}
