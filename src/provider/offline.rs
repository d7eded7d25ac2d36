//! Offline provider backed by a JSON repository file

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::DependencyProvider;
use crate::error::DepGraphError;

/// A dependency entry in the repository file
///
/// Entries are either a bare package name or an object carrying a version,
/// which is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RepositoryDependency {
    Simple(String),
    Detailed {
        id: String,
        #[allow(dead_code)]
        version: Option<String>,
    },
}

impl RepositoryDependency {
    fn into_id(self) -> String {
        match self {
            RepositoryDependency::Simple(id) => id,
            RepositoryDependency::Detailed { id, .. } => id,
        }
    }
}

/// Provider serving dependencies from a static mapping
///
/// The repository file is a JSON object mapping package names to their
/// dependency lists:
///
/// ```json
/// {
///   "App": ["Core", { "id": "Logging", "version": "2.1.0" }],
///   "Core": [],
///   "Logging": ["Core"]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OfflineProvider {
    repository: HashMap<String, Vec<String>>,
}

impl OfflineProvider {
    /// Load a repository file
    pub fn from_file(path: &Path) -> Result<Self, DepGraphError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DepGraphError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, DepGraphError> {
        let raw: HashMap<String, Vec<RepositoryDependency>> = serde_json::from_str(content)?;
        let repository = raw
            .into_iter()
            .map(|(package, deps)| {
                let deps = deps.into_iter().map(RepositoryDependency::into_id).collect();
                (package, deps)
            })
            .collect();
        Ok(Self { repository })
    }

    /// Build a provider from `(package, dependencies)` pairs
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let repository = entries
            .into_iter()
            .map(|(package, deps)| (package.into(), deps.into_iter().map(Into::into).collect()))
            .collect();
        Self { repository }
    }

    pub fn len(&self) -> usize {
        self.repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }
}

impl DependencyProvider for OfflineProvider {
    fn direct_dependencies(&self, package: &str) -> Result<Vec<String>, DepGraphError> {
        self.repository
            .get(package)
            .cloned()
            .ok_or_else(|| DepGraphError::PackageNotFound {
                package: package.to_string(),
            })
    }
}
