//! # Configuration Module
//!
//! Settings for a visualization run come from three places, in increasing
//! priority: the TOML configuration file, `DEP_WHEEL_*` environment
//! variables and command-line flags. [`ConfigFile`] holds what the file
//! says; [`VisualizerConfig`] is the validated result the executor runs
//! with.
//!
//! ## Example
//!
//! ```
//! use dep_wheel::cli::RepoMode;
//! use dep_wheel::common::ConfigBuilder;
//! use dep_wheel::config::VisualizerConfig;
//!
//! let config = VisualizerConfig::builder()
//!     .with_package_name("App")
//!     .with_repository_url("repo.json")
//!     .with_repo_mode(RepoMode::Offline)
//!     .with_filter_substring(Some("test".to_string()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.output_image.to_str(), Some("graph.svg"));
//! assert!(config.highlight_cycles);
//! ```

mod file;

use std::path::PathBuf;

pub use file::ConfigFile;

use crate::cli::{GraphFormat, OutputFormat, RepoMode};
use crate::constants::paths::DEFAULT_IMAGE;
use crate::error::DepGraphError;

#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    pub package_name: String,
    pub repository_url: String,
    pub repo_mode: RepoMode,
    pub filter_substring: Option<String>,
    pub output_image: PathBuf,
    pub ascii_tree: bool,
    pub graph_format: GraphFormat,
    pub highlight_cycles: bool,
    pub report_format: OutputFormat,
    pub max_cycles: Option<usize>,
    pub error_on_cycles: bool,
}

impl VisualizerConfig {
    pub fn builder() -> VisualizerConfigBuilder {
        VisualizerConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct VisualizerConfigBuilder {
    package_name: Option<String>,
    repository_url: Option<String>,
    repo_mode: Option<RepoMode>,
    filter_substring: Option<String>,
    output_image: Option<PathBuf>,
    ascii_tree: Option<bool>,
    graph_format: Option<GraphFormat>,
    highlight_cycles: Option<bool>,
    report_format: Option<OutputFormat>,
    max_cycles: Option<usize>,
    error_on_cycles: Option<bool>,
}

impl VisualizerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the values of a configuration file
    pub fn from_file(file: ConfigFile) -> Self {
        Self {
            package_name: file.package_name,
            repository_url: file.repository_url,
            repo_mode: file.repo_mode,
            filter_substring: file.filter_substring,
            output_image: file.output_image,
            ascii_tree: file.ascii_tree,
            graph_format: file.graph_format,
            highlight_cycles: file.highlight_cycles,
            ..Self::default()
        }
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn with_repository_url(mut self, repository_url: impl Into<String>) -> Self {
        self.repository_url = Some(repository_url.into());
        self
    }

    pub fn with_repo_mode(mut self, repo_mode: RepoMode) -> Self {
        self.repo_mode = Some(repo_mode);
        self
    }

    pub fn with_filter_substring(mut self, filter_substring: Option<String>) -> Self {
        self.filter_substring = filter_substring;
        self
    }

    pub fn with_output_image(mut self, output_image: PathBuf) -> Self {
        self.output_image = Some(output_image);
        self
    }

    pub fn with_ascii_tree(mut self, ascii_tree: bool) -> Self {
        self.ascii_tree = Some(ascii_tree);
        self
    }

    pub fn with_graph_format(mut self, graph_format: GraphFormat) -> Self {
        self.graph_format = Some(graph_format);
        self
    }

    pub fn with_highlight_cycles(mut self, highlight_cycles: bool) -> Self {
        self.highlight_cycles = Some(highlight_cycles);
        self
    }

    pub fn with_report_format(mut self, report_format: OutputFormat) -> Self {
        self.report_format = Some(report_format);
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<usize>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_error_on_cycles(mut self, error_on_cycles: bool) -> Self {
        self.error_on_cycles = Some(error_on_cycles);
        self
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, DepGraphError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(DepGraphError::ConfigurationError {
            message: format!("{field} must not be empty"),
        }),
        None => Err(DepGraphError::ConfigurationError {
            message: format!("Missing required field: {field}"),
        }),
    }
}

impl crate::common::ConfigBuilder for VisualizerConfigBuilder {
    type Config = VisualizerConfig;

    fn build(self) -> Result<Self::Config, DepGraphError> {
        Ok(VisualizerConfig {
            package_name: required(self.package_name, "package_name")?,
            repository_url: required(self.repository_url, "repository_url")?,
            repo_mode: self
                .repo_mode
                .ok_or_else(|| DepGraphError::ConfigurationError {
                    message: "Missing required field: repo_mode".to_string(),
                })?,
            filter_substring: self.filter_substring.filter(|s| !s.is_empty()),
            output_image: self
                .output_image
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE)),
            ascii_tree: self.ascii_tree.unwrap_or(false),
            graph_format: self.graph_format.unwrap_or_default(),
            highlight_cycles: self.highlight_cycles.unwrap_or(true),
            report_format: self.report_format.unwrap_or(OutputFormat::Human),
            max_cycles: self.max_cycles,
            error_on_cycles: self.error_on_cycles.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    fn minimal() -> VisualizerConfigBuilder {
        VisualizerConfig::builder()
            .with_package_name("App")
            .with_repository_url("repo.json")
            .with_repo_mode(RepoMode::Offline)
    }

    #[test]
    fn test_defaults() {
        let config = minimal().build().unwrap();

        assert_eq!(config.output_image, PathBuf::from("graph.svg"));
        assert_eq!(config.graph_format, GraphFormat::Mermaid);
        assert_eq!(config.report_format, OutputFormat::Human);
        assert!(config.highlight_cycles);
        assert!(!config.ascii_tree);
        assert!(!config.error_on_cycles);
        assert_eq!(config.filter_substring, None);
    }

    #[test]
    fn test_missing_package_name() {
        let err = VisualizerConfig::builder()
            .with_repository_url("repo.json")
            .with_repo_mode(RepoMode::Offline)
            .build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field: package_name"
        );
    }

    #[test]
    fn test_blank_repository_url() {
        let err = minimal().with_repository_url("  ").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: repository_url must not be empty"
        );
    }

    #[test]
    fn test_missing_repo_mode() {
        let result = VisualizerConfig::builder()
            .with_package_name("App")
            .with_repository_url("repo.json")
            .build();
        assert!(matches!(result, Err(DepGraphError::ConfigurationError { .. })));
    }

    #[test]
    fn test_empty_filter_means_none() {
        let config = minimal()
            .with_filter_substring(Some(String::new()))
            .build()
            .unwrap();
        assert_eq!(config.filter_substring, None);
    }

    #[test]
    fn test_flags_override_file() {
        let file = ConfigFile {
            package_name: Some("FromFile".to_string()),
            repository_url: Some("repo.json".to_string()),
            repo_mode: Some(RepoMode::Offline),
            ascii_tree: Some(false),
            ..ConfigFile::default()
        };

        let config = VisualizerConfigBuilder::from_file(file)
            .with_package_name("FromFlag")
            .with_ascii_tree(true)
            .build()
            .unwrap();

        assert_eq!(config.package_name, "FromFlag");
        assert!(config.ascii_tree);
    }
}
