use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(dep_wheel::toml_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct TomlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DepGraphError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(dep_wheel::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlParseError(Box<TomlParseError>),

    #[error("JSON serialization error")]
    #[diagnostic(
        code(dep_wheel::json_error),
        help("Check that the file contains valid JSON")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(dep_wheel::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(dep_wheel::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(dep_wheel::config_error),
        help("Check your command arguments and configuration file")
    )]
    ConfigurationError { message: String },

    #[error("Package '{package}' is not present in the offline repository")]
    #[diagnostic(
        code(dep_wheel::package_not_found),
        help("Add the package to the repository file or check its spelling")
    )]
    PackageNotFound { package: String },

    #[error("Registry at '{url}' is unavailable: {message}")]
    #[diagnostic(
        code(dep_wheel::registry_unavailable),
        help("Check the repository URL and your network connection")
    )]
    RegistryUnavailable { url: String, message: String },

    #[error("Request to '{url}' failed")]
    #[diagnostic(
        code(dep_wheel::http_error),
        help("The registry may be unreachable or the package may not exist")
    )]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No stable versions found for package '{package}'")]
    #[diagnostic(
        code(dep_wheel::no_stable_version),
        help("Only prerelease or unlisted versions are published for this package")
    )]
    NoStableVersion { package: String },

    #[error("Failed to open package archive for '{package}'")]
    #[diagnostic(code(dep_wheel::archive_error))]
    Archive {
        package: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Package archive for '{package}' contains no .nuspec manifest")]
    #[diagnostic(code(dep_wheel::missing_manifest))]
    MissingManifest { package: String },

    #[error("Failed to parse the .nuspec manifest of '{package}'")]
    #[diagnostic(code(dep_wheel::manifest_parse_error))]
    ManifestParse {
        package: String,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("Failed to write image '{path}'")]
    #[diagnostic(
        code(dep_wheel::render_error),
        help("Check that the output directory exists and is writable")
    )]
    RenderError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DepGraphError {
    /// One-line message including every underlying cause
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_toml_parse_error_display() {
        let source_code = "package_name = ";
        let toml_err = toml::from_str::<toml::Value>(source_code).unwrap_err();

        let error = TomlParseError {
            file: "config.toml".to_string(),
            source_code: NamedSource::new("config.toml", source_code.to_string()),
            span: Some((15, 0).into()),
            source: toml_err,
        };

        assert_eq!(error.to_string(), "Invalid TOML syntax in 'config.toml'");
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = DepGraphError::FileReadError {
            path: PathBuf::from("/tmp/missing.json"),
            source: io_err,
        };

        assert_eq!(error.to_string(), "Failed to read file '/tmp/missing.json'");
    }

    #[test]
    fn test_configuration_error() {
        let error = DepGraphError::ConfigurationError {
            message: "package_name must not be empty".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Configuration error: package_name must not be empty"
        );
    }

    #[test]
    fn test_package_not_found() {
        let error = DepGraphError::PackageNotFound {
            package: "Serilog".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Package 'Serilog' is not present in the offline repository"
        );
    }

    #[test]
    fn test_error_codes() {
        let error = DepGraphError::RenderError {
            path: PathBuf::from("graph.svg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };

        use miette::Diagnostic;
        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::other("some io error");
        let err: DepGraphError = io_err.into();

        match err {
            DepGraphError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let err: DepGraphError = json_err.into();

        match err {
            DepGraphError::Json(_) => {}
            _ => panic!("Expected Json variant"),
        }
    }

    #[test]
    fn test_full_message_includes_causes() {
        let error = DepGraphError::RenderError {
            path: PathBuf::from("graph.svg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };

        assert_eq!(
            error.full_message(),
            "Failed to write image 'graph.svg': access denied"
        );
    }
}
