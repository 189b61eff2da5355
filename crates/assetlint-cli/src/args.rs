use std::path::PathBuf;

use assetlint_core::analyzer::ScanMode;
use assetlint_core::rules::catalog::{Category, Severity};
use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "assetlint",
    version,
    about = "Rank optimization issues in a game project's content assets"
)]
pub struct Args {
    /// Path to the project manifest (.json)
    pub manifest: PathBuf,

    /// Scan the whole catalogue or only the open scene
    #[arg(long, default_value = "catalogue")]
    pub mode: Mode,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Only show issues at or above this severity
    #[arg(long)]
    pub min_severity: Option<SeverityArg>,

    /// Only show issues in this category
    #[arg(long)]
    pub category: Option<CategoryArg>,

    /// JSON file with threshold overrides
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub max_triangles: Option<u64>,

    #[arg(long)]
    pub max_texture_size: Option<u32>,

    #[arg(long)]
    pub max_blueprint_nodes: Option<u64>,

    #[arg(long)]
    pub max_texture_samples: Option<u32>,

    /// Optional git commit hash for tool metadata
    #[arg(long)]
    pub commit: Option<String>,

    /// Log scan details to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    Catalogue,
    Scene,
}

impl From<Mode> for ScanMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Catalogue => ScanMode::Catalogue,
            Mode::Scene => ScanMode::Scene,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Info,
    Warning,
    Critical,
}

impl From<SeverityArg> for Severity {
    fn from(s: SeverityArg) -> Self {
        match s {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Critical => Severity::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Mesh,
    Texture,
    Material,
    Blueprint,
    Audio,
    Particle,
    Other,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Mesh => Category::Mesh,
            CategoryArg::Texture => Category::Texture,
            CategoryArg::Material => Category::Material,
            CategoryArg::Blueprint => Category::Blueprint,
            CategoryArg::Audio => Category::Audio,
            CategoryArg::Particle => Category::Particle,
            CategoryArg::Other => Category::Other,
        }
    }
}
