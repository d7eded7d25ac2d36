//! Visualize command implementation

use miette::{Result, WrapErr};

use crate::cli::Cli;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::{ConfigFile, VisualizerConfig, VisualizerConfigBuilder};
use crate::error::DepGraphError;

impl FromCommand for VisualizerConfig {
    fn from_command(cli: Cli) -> Result<Self, DepGraphError> {
        let file = ConfigFile::load(cli.config.as_deref())?;
        let mut builder = VisualizerConfigBuilder::from_file(file)
            .with_report_format(cli.format)
            .with_max_cycles(cli.max_cycles)
            .with_error_on_cycles(cli.error_on_cycles);

        if let Some(package) = cli.package {
            builder = builder.with_package_name(package);
        }
        if let Some(repository) = cli.repository {
            builder = builder.with_repository_url(repository);
        }
        if let Some(mode) = cli.mode {
            builder = builder.with_repo_mode(mode);
        }
        if cli.filter.is_some() {
            builder = builder.with_filter_substring(cli.filter);
        }
        if let Some(output) = cli.output {
            builder = builder.with_output_image(output);
        }
        if cli.ascii {
            builder = builder.with_ascii_tree(true);
        }
        if let Some(format) = cli.graph_format {
            builder = builder.with_graph_format(format);
        }
        if cli.no_highlight {
            builder = builder.with_highlight_cycles(false);
        }

        builder.build()
    }
}

crate::impl_try_from_command!(VisualizerConfig);

/// Execute a visualization run
pub fn execute_visualize_command(cli: Cli) -> Result<()> {
    let config = VisualizerConfig::from_command(cli)
        .wrap_err("Failed to load dep-wheel configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::visualize::VisualizeExecutor;
    VisualizeExecutor::execute(config)
}
