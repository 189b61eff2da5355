use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use assetlint_core::config::Thresholds;
use assetlint_core::lint;
use assetlint_core::report::model::{IssueFilter, ToolInfo};
use assetlint_core::report::render;

mod args;

const DEFAULT_LOG_FILTER: &str = "assetlint_core=warn,assetlint_cli=info";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("assetlint_core=debug,assetlint_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

/// Defaults, then the config file, then individual flags.
fn resolve_thresholds(args: &args::Args) -> Result<Thresholds> {
    let mut thresholds = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => Thresholds::default(),
    };

    if let Some(v) = args.max_triangles {
        thresholds.max_triangles_per_mesh = v;
    }
    if let Some(v) = args.max_texture_size {
        thresholds.max_texture_size = v;
    }
    if let Some(v) = args.max_blueprint_nodes {
        thresholds.max_blueprint_nodes = v;
    }
    if let Some(v) = args.max_texture_samples {
        thresholds.max_texture_samples_per_material = v;
    }

    thresholds.validate()?;
    Ok(thresholds)
}

fn main() -> Result<()> {
    let args = args::Args::parse();
    init_logging(args.verbose);

    let thresholds = resolve_thresholds(&args)?;

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: args.commit.clone(),
    };

    tracing::info!("Analyzing {}", args.manifest.display());
    let mut report = lint(&args.manifest, args.mode.into(), &thresholds, tool)?;
    let exit_code = report.classification.exit_code;

    let filter = IssueFilter {
        min_severity: args.min_severity.map(Into::into),
        category: args.category.map(Into::into),
    };
    report.issues = filter.apply(&report.issues);

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report, &report.issues),
        args::OutputFormat::Csv => render::render_csv(&report.issues)?,
    };

    match args.out {
        Some(path) => std::fs::write(&path, &output)
            .with_context(|| format!("failed to write output: {}", path.display()))?,
        None => print!("{output}"),
    }

    std::process::exit(exit_code);
}
