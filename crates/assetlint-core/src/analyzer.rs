//! Scan orchestration.
//!
//! Two entry points drive the rule tables over an [`AssetSource`]:
//!
//! - [`scan_catalogue`] sweeps every asset kind once, in a fixed order,
//!   then runs project-wide rules.
//! - [`scan_scene`] walks the actors of the open scene and checks each
//!   referenced mesh and texture once, however often it is placed.
//!
//! Both run to completion on the caller's thread, report progress with
//! non-decreasing fractions ending at `1.0`, and hand the sorted issue list
//! to the sink exactly once. Assets whose data cannot be read are skipped.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Thresholds;
use crate::report::model::Issue;
use crate::rules::eval::{
    BLUEPRINT_RULES, MATERIAL_RULES, MESH_RULES, PROJECT_RULES, TEXTURE_RULES,
};
use crate::signals::extract::{extract_blueprint, extract_material, extract_mesh, extract_texture};
use crate::signals::model::ProjectFacts;
use crate::source::{AssetError, AssetKind, AssetSource, BlueprintView, MaterialView, MeshView, TextureView};
use crate::util::deterministic::sort_issues;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Catalogue,
    Scene,
}

/// Receiver of scan progress and the final report.
pub trait ReportSink {
    /// Called with non-decreasing fractions in `[0, 1]`; the last call
    /// carries `1.0`.
    fn on_progress(&mut self, label: &str, fraction: f64);

    /// Called once, after the final progress event.
    fn on_complete(&mut self, issues: &[Issue]);
}

/// Sink that keeps everything it is told.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub progress: Vec<(String, f64)>,
    pub issues: Vec<Issue>,
    pub completions: usize,
}

impl ReportSink for CollectingSink {
    fn on_progress(&mut self, label: &str, fraction: f64) {
        self.progress.push((label.to_string(), fraction));
    }

    fn on_complete(&mut self, issues: &[Issue]) {
        self.issues = issues.to_vec();
        self.completions += 1;
    }
}

/// Sink that forwards progress to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn on_progress(&mut self, label: &str, fraction: f64) {
        debug!(progress = fraction, "{label}");
    }

    fn on_complete(&mut self, issues: &[Issue]) {
        debug!(issues = issues.len(), "report delivered");
    }
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Ok,
    /// Scene mode ran without an active scene.
    EmptyScene,
}

/// Sorted issues together with the status of the scan that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub issues: Vec<Issue>,
    pub status: ScanStatus,
}

/// Runs the scan selected by `mode`.
pub fn scan<S: AssetSource + ?Sized>(
    source: &S,
    mode: ScanMode,
    thresholds: &Thresholds,
    sink: &mut dyn ReportSink,
) -> ScanOutcome {
    match mode {
        ScanMode::Catalogue => ScanOutcome {
            issues: scan_catalogue(source, thresholds, sink),
            status: ScanStatus::Ok,
        },
        ScanMode::Scene => run_scene(source, thresholds, sink),
    }
}

/// Applies every rule across the whole catalogue.
pub fn scan_catalogue<S: AssetSource + ?Sized>(
    source: &S,
    thresholds: &Thresholds,
    sink: &mut dyn ReportSink,
) -> Vec<Issue> {
    let t = *thresholds;
    let mut issues = Vec::new();

    sink.on_progress("Checking meshes", 0.10);
    for mesh in source.meshes() {
        check_mesh(mesh.as_ref(), &t, &mut issues);
    }
    log_sweep(AssetKind::Mesh, &issues);

    sink.on_progress("Checking textures", 0.40);
    let before = issues.len();
    for texture in source.textures() {
        check_texture(texture.as_ref(), &t, &mut issues);
    }
    log_sweep(AssetKind::Texture, &issues[before..]);

    sink.on_progress("Checking materials", 0.70);
    let before = issues.len();
    for material in source.materials() {
        if source.is_engine_asset(material.path()) {
            continue;
        }
        check_material(material.as_ref(), &t, &mut issues);
    }

    let project = ProjectFacts {
        base_materials: source.count(AssetKind::Material),
        material_instances: source.count(AssetKind::MaterialInstance),
    };
    issues.extend(PROJECT_RULES.iter().filter_map(|rule| rule(&project, &t)));
    log_sweep(AssetKind::Material, &issues[before..]);

    sink.on_progress("Checking blueprints", 0.80);
    let before = issues.len();
    for blueprint in source.blueprints() {
        if source.is_engine_asset(blueprint.path()) {
            continue;
        }
        check_blueprint(blueprint.as_ref(), &t, &mut issues);
    }
    log_sweep(AssetKind::Blueprint, &issues[before..]);

    sink.on_progress("Sorting results", 0.90);
    finish(issues, sink)
}

/// Checks meshes and textures referenced by the open scene.
///
/// Each distinct mesh and texture path is evaluated at most once per scan.
/// Material and blueprint rules do not run in this mode.
pub fn scan_scene<S: AssetSource + ?Sized>(
    source: &S,
    thresholds: &Thresholds,
    sink: &mut dyn ReportSink,
) -> Vec<Issue> {
    run_scene(source, thresholds, sink).issues
}

/// Enumerates the scene once; the status reflects that single lookup.
fn run_scene<S: AssetSource + ?Sized>(
    source: &S,
    thresholds: &Thresholds,
    sink: &mut dyn ReportSink,
) -> ScanOutcome {
    let t = *thresholds;

    let Some(actors) = source.scene() else {
        warn!("no active scene, nothing to analyze");
        sink.on_progress("No active scene", 1.0);
        sink.on_complete(&[]);
        return ScanOutcome {
            issues: Vec::new(),
            status: ScanStatus::EmptyScene,
        };
    };

    sink.on_progress("Scanning scene", 0.10);

    let mut issues = Vec::new();
    let mut seen_meshes: BTreeSet<String> = BTreeSet::new();
    let mut seen_textures: BTreeSet<String> = BTreeSet::new();
    let total = actors.len();

    for (idx, actor) in actors.iter().enumerate() {
        for instance in actor.mesh_instances() {
            if let Some(mesh) = &instance.mesh {
                if seen_meshes.insert(mesh.path().to_string()) {
                    check_mesh(mesh.as_ref(), &t, &mut issues);
                }
            } else {
                debug!(actor = actor.name(), "skipping instance with unresolved mesh");
            }

            // Each texture is its own asset; a dangling reference in the
            // same material does not hide the others.
            for material in &instance.materials {
                for texture in material.resolved_textures() {
                    if seen_textures.insert(texture.path().to_string()) {
                        check_texture(texture.as_ref(), &t, &mut issues);
                    }
                }
            }
        }

        let fraction = 0.10 + 0.80 * (idx + 1) as f64 / total as f64;
        sink.on_progress(&format!("Scanned {}", actor.name()), fraction);
    }

    info!(
        actors = total,
        meshes = seen_meshes.len(),
        textures = seen_textures.len(),
        "scene traversal finished"
    );

    sink.on_progress("Sorting results", 0.90);
    ScanOutcome {
        issues: finish(issues, sink),
        status: ScanStatus::Ok,
    }
}

fn finish(mut issues: Vec<Issue>, sink: &mut dyn ReportSink) -> Vec<Issue> {
    sort_issues(&mut issues);
    info!("Analysis complete! Found {} issues.", issues.len());
    sink.on_progress("Analysis complete", 1.0);
    sink.on_complete(&issues);
    issues
}

fn check_mesh(mesh: &dyn MeshView, t: &Thresholds, out: &mut Vec<Issue>) {
    match extract_mesh(mesh) {
        Ok(facts) => out.extend(MESH_RULES.iter().filter_map(|rule| rule(&facts, t))),
        Err(err) => skip(AssetKind::Mesh, mesh.path(), &err),
    }
}

fn check_texture(texture: &dyn TextureView, t: &Thresholds, out: &mut Vec<Issue>) {
    match extract_texture(texture) {
        Ok(facts) => out.extend(TEXTURE_RULES.iter().filter_map(|rule| rule(&facts, t))),
        Err(err) => skip(AssetKind::Texture, texture.path(), &err),
    }
}

fn check_material(material: &dyn MaterialView, t: &Thresholds, out: &mut Vec<Issue>) {
    match extract_material(material) {
        Ok(facts) => out.extend(MATERIAL_RULES.iter().filter_map(|rule| rule(&facts, t))),
        Err(err) => skip(AssetKind::Material, material.path(), &err),
    }
}

fn check_blueprint(blueprint: &dyn BlueprintView, t: &Thresholds, out: &mut Vec<Issue>) {
    match extract_blueprint(blueprint) {
        Ok(facts) => out.extend(BLUEPRINT_RULES.iter().filter_map(|rule| rule(&facts, t))),
        Err(err) => skip(AssetKind::Blueprint, blueprint.path(), &err),
    }
}

fn skip(kind: AssetKind, path: &str, err: &AssetError) {
    debug!(%kind, path, error = %err, "skipping unreadable asset");
}

fn log_sweep(kind: AssetKind, found: &[Issue]) {
    debug!(%kind, issues = found.len(), "sweep finished");
}
