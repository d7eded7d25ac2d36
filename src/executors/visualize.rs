//! Visualize command executor

use std::io::{self, Write};
use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::{GraphFormat, OutputFormat, RepoMode};
use crate::config::VisualizerConfig;
use crate::detector::CycleDetector;
use crate::executors::CommandExecutor;
use crate::graph::{
    DependencyGraphBuilder, GraphTextExporter, InstallOrder, LayoutExporter, TreeRenderer,
};
use crate::progress::ProgressReporter;
use crate::provider::{DependencyProvider, NuGetProvider, OfflineProvider};
use crate::reports::{HumanReportGenerator, JsonReportGenerator, ReportGenerator, Resolution};

pub struct VisualizeExecutor;

impl CommandExecutor for VisualizeExecutor {
    type Config = VisualizerConfig;

    fn execute(config: Self::Config) -> Result<()> {
        print_header(&config);

        let provider = open_provider(&config)?;

        let mut progress = ProgressReporter::for_terminal();
        if let Some(p) = progress.as_mut() {
            p.start_resolution(&config.package_name);
        }

        let mut builder = DependencyGraphBuilder::new(
            provider,
            config.package_name.as_str(),
            config.filter_substring.as_deref(),
        );
        builder.build(progress.as_ref());

        if let Some(p) = progress.as_mut() {
            p.finish_resolution(builder.graph().package_count(), builder.cycles().len());
        }

        let graph = builder.graph();

        let mut detector = CycleDetector::new();
        detector.detect_cycles(graph);
        let install_order = InstallOrder::compute(graph);

        let resolution = Resolution {
            graph,
            cycles: builder.cycles(),
            groups: detector.groups(),
            install_order: &install_order,
            failures: builder.failures(),
        };

        // The human report lists these itself
        if config.report_format == OutputFormat::Json {
            for failure in builder.failures() {
                eprintln!(
                    "{} Could not fetch dependencies of {}: {}",
                    style("⚠").yellow().bold(),
                    style(&failure.package).bold(),
                    failure.message
                );
            }
        }

        let report = match config.report_format {
            OutputFormat::Human => {
                HumanReportGenerator::new(config.max_cycles).generate_report(&resolution)
            }
            OutputFormat::Json => JsonReportGenerator::new().generate_report(&resolution),
        }
        .into_diagnostic()
        .wrap_err("Failed to generate report")?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        match config.report_format {
            OutputFormat::Json => writeln!(out, "{report}").into_diagnostic()?,
            OutputFormat::Human => {
                write!(out, "{report}").into_diagnostic()?;

                if config.ascii_tree {
                    writeln!(out, "\n{} Dependency tree:", style("🌳").green()).into_diagnostic()?;
                    for line in TreeRenderer::render(graph, None) {
                        writeln!(out, "{line}").into_diagnostic()?;
                    }
                }

                let exporter = GraphTextExporter::new(config.highlight_cycles);
                writeln!(out).into_diagnostic()?;
                match config.graph_format {
                    GraphFormat::Mermaid => exporter
                        .render_mermaid(graph, &mut out)
                        .wrap_err("Failed to render Mermaid graph")?,
                    GraphFormat::Dot => exporter
                        .render_dot(graph, detector.groups(), &mut out)
                        .wrap_err("Failed to render DOT graph")?,
                }
            }
        }
        out.flush().into_diagnostic()?;
        drop(out);

        export_image(&config, &resolution);

        // Exit with error code if cycles found and requested
        if config.error_on_cycles && !builder.cycles().is_empty() {
            std::process::exit(1);
        }

        Ok(())
    }
}

fn print_header(config: &VisualizerConfig) {
    eprintln!(
        "{} Target package: {}",
        style("🎡").cyan(),
        style(&config.package_name).green().bold()
    );
    eprintln!(
        "  {} Mode: {} ({})",
        style("→").dim(),
        match config.repo_mode {
            RepoMode::Online => "online",
            RepoMode::Offline => "offline",
        },
        style(&config.repository_url).dim()
    );
    if let Some(filter) = &config.filter_substring {
        eprintln!("  {} Filter: '{}'", style("→").dim(), style(filter).yellow());
    }
}

fn open_provider(config: &VisualizerConfig) -> Result<Box<dyn DependencyProvider>> {
    match config.repo_mode {
        RepoMode::Offline => {
            let provider = OfflineProvider::from_file(Path::new(&config.repository_url))
                .wrap_err("Failed to load offline repository")?;
            eprintln!(
                "{} Loaded {} packages from {}",
                style("📂").blue(),
                style(provider.len()).yellow(),
                style(&config.repository_url).bold()
            );
            Ok(Box::new(provider))
        }
        RepoMode::Online => {
            let provider = NuGetProvider::connect(&config.repository_url)
                .wrap_err("Failed to connect to the package registry")?;
            eprintln!(
                "{} Connected to {}",
                style("🌐").blue(),
                style(&config.repository_url).bold()
            );
            Ok(Box::new(provider))
        }
    }
}

/// Write the SVG diagram; failures are reported without aborting the run
fn export_image(config: &VisualizerConfig, resolution: &Resolution<'_>) {
    let exporter = LayoutExporter::new(config.highlight_cycles);
    match exporter.export(resolution.graph, resolution.groups, &config.output_image) {
        Ok(()) => eprintln!(
            "{} Graph image written to {}",
            style("✓").green(),
            style(config.output_image.display()).bold()
        ),
        Err(e) => eprintln!(
            "{} Could not write graph image: {}",
            style("⚠").yellow().bold(),
            style(e.full_message()).yellow()
        ),
    }
}
