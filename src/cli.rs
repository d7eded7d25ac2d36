use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "dep-wheel",
    about = "🎡 Visualize the transitive dependency graph of a package",
    long_about = "dep-wheel resolves every package reachable from a root package, either from a \
                  local JSON repository file or from a NuGet v3 feed. It reports the resolved \
                  graph, dependency cycles and a dependencies-first install order, prints a \
                  Mermaid or DOT edge list and an optional ASCII tree, and writes a layered SVG \
                  diagram. Settings come from a TOML file and can be overridden by flags or \
                  DEP_WHEEL_* environment variables.",
    version
)]
pub struct Cli {
    /// Configuration file (config.toml in the current directory by default)
    #[arg(short, long, value_name = "FILE", env = "DEP_WHEEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root package to resolve
    #[arg(short, long, value_name = "PACKAGE", env = "DEP_WHEEL_PACKAGE")]
    pub package: Option<String>,

    /// Repository file (offline) or service index URL (online)
    #[arg(short, long, value_name = "URL_OR_PATH", env = "DEP_WHEEL_REPOSITORY")]
    pub repository: Option<String>,

    /// Where dependencies are fetched from
    #[arg(short, long, value_enum, env = "DEP_WHEEL_MODE")]
    pub mode: Option<RepoMode>,

    /// Skip packages whose name contains this text, ignoring case
    #[arg(long, value_name = "TEXT", env = "DEP_WHEEL_FILTER")]
    pub filter: Option<String>,

    /// Path of the SVG diagram
    #[arg(short, long, value_name = "FILE", env = "DEP_WHEEL_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print the resolved graph as an ASCII tree
    #[arg(long, env = "DEP_WHEEL_ASCII")]
    pub ascii: bool,

    /// Report format
    #[arg(
        short,
        long,
        value_enum,
        default_value = crate::constants::output::DEFAULT_FORMAT,
        env = "DEP_WHEEL_FORMAT"
    )]
    pub format: OutputFormat,

    /// Graph description format printed after the report
    #[arg(short, long, value_enum, env = "DEP_WHEEL_GRAPH_FORMAT")]
    pub graph_format: Option<GraphFormat>,

    /// Draw cycle members in the default colors
    #[arg(long, env = "DEP_WHEEL_NO_HIGHLIGHT")]
    pub no_highlight: bool,

    /// Maximum number of cycles to display (shows all by default)
    #[arg(long, env = "DEP_WHEEL_MAX_CYCLES")]
    pub max_cycles: Option<usize>,

    /// Exit with error code if cycles found
    #[arg(long, env = "DEP_WHEEL_ERROR_ON_CYCLES")]
    pub error_on_cycles: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoMode {
    /// Query a NuGet v3 service index
    Online,
    /// Read a local JSON repository file
    Offline,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    #[default]
    Mermaid,
    Dot,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "dep-wheel",
            "--package",
            "App",
            "--mode",
            "offline",
            "--graph-format",
            "dot",
            "--ascii",
            "--error-on-cycles",
        ])
        .unwrap();

        assert_eq!(cli.package.as_deref(), Some("App"));
        assert_eq!(cli.mode, Some(RepoMode::Offline));
        assert_eq!(cli.graph_format, Some(GraphFormat::Dot));
        assert_eq!(cli.format, OutputFormat::Human);
        assert!(cli.ascii);
        assert!(cli.error_on_cycles);
        assert!(!cli.no_highlight);
    }
}
