//! Rule evaluation.
//!
//! Each rule is a pure function from extracted facts and thresholds to at
//! most one issue. Rules are grouped into per-kind tables in catalogue
//! order; the analyzer runs every rule of a table against each asset of
//! that kind.

use crate::config::Thresholds;
use crate::report::model::Issue;
use crate::rules::catalog::{RuleId, Severity};
use crate::rules::score;
use crate::signals::model::{BlueprintFacts, MaterialFacts, MeshFacts, ProjectFacts, TextureFacts};

/// Triangle count above which a mesh without LODs is flagged.
pub const LOD_TRIANGLE_FLOOR: u64 = 10_000;

/// Sample count above which a translucent material is flagged.
pub const TRANSLUCENT_SAMPLE_LIMIT: u32 = 5;

/// Estimated instruction count above which a material is flagged.
pub const SHADER_INSTRUCTION_LIMIT: u32 = 300;

/// Node count above which Event Tick usage is flagged.
pub const TICK_NODE_LIMIT: u64 = 100;

/// Base material count above which instance usage is inspected.
pub const INSTANCE_BASE_FLOOR: usize = 10;

/// Asset path reported by project-wide rules.
pub const PROJECT_PATH: &str = "<project>";

pub type MeshRule = fn(&MeshFacts, &Thresholds) -> Option<Issue>;
pub type TextureRule = fn(&TextureFacts, &Thresholds) -> Option<Issue>;
pub type MaterialRule = fn(&MaterialFacts, &Thresholds) -> Option<Issue>;
pub type BlueprintRule = fn(&BlueprintFacts, &Thresholds) -> Option<Issue>;
pub type ProjectRule = fn(&ProjectFacts, &Thresholds) -> Option<Issue>;

pub const MESH_RULES: &[MeshRule] = &[high_poly_mesh, missing_lod_chain];
pub const TEXTURE_RULES: &[TextureRule] = &[oversized_texture];
pub const MATERIAL_RULES: &[MaterialRule] = &[
    texture_sample_count,
    two_sided_material,
    complex_translucent_material,
    shader_complexity,
];
pub const BLUEPRINT_RULES: &[BlueprintRule] = &[complex_blueprint, tick_in_complex_blueprint];
pub const PROJECT_RULES: &[ProjectRule] = &[underused_material_instances];

/// Builds an issue whose severity follows the rule's fixed severity, or the
/// severity map otherwise.
fn issue(
    rule: RuleId,
    title: String,
    description: String,
    impact: f64,
    asset_path: &str,
    suggested_fix: &str,
) -> Issue {
    let def = rule.def();
    Issue {
        rule_id: rule,
        title,
        description,
        category: def.category,
        severity: rule_severity(rule, impact),
        impact,
        asset_path: asset_path.to_string(),
        suggested_fix: suggested_fix.to_string(),
    }
}

fn ratio(measured: f64, threshold: f64) -> f64 {
    measured / threshold
}

pub fn high_poly_mesh(mesh: &MeshFacts, t: &Thresholds) -> Option<Issue> {
    if mesh.triangles <= t.max_triangles_per_mesh {
        return None;
    }
    let r = ratio(mesh.triangles as f64, t.max_triangles_per_mesh as f64);
    Some(issue(
        RuleId::RMesh01,
        format!("High Poly Count: {}", mesh.name),
        format!(
            "Mesh has {} triangles (threshold: {}, {:.2}x over budget)",
            mesh.triangles, t.max_triangles_per_mesh, r
        ),
        score::high_poly(mesh.triangles, t.max_triangles_per_mesh),
        &mesh.path,
        "Reduce polygon count or create LODs",
    ))
}

pub fn missing_lod_chain(mesh: &MeshFacts, _t: &Thresholds) -> Option<Issue> {
    if mesh.lod_count > 1 || mesh.triangles <= LOD_TRIANGLE_FLOOR {
        return None;
    }
    Some(issue(
        RuleId::RMesh02,
        format!("Missing LODs: {}", mesh.name),
        format!(
            "Mesh with {} triangles has {} LOD level(s); meshes over {} triangles should have a LOD chain",
            mesh.triangles, mesh.lod_count, LOD_TRIANGLE_FLOOR
        ),
        score::missing_lods(mesh.triangles),
        &mesh.path,
        "Generate LOD chain",
    ))
}

pub fn oversized_texture(texture: &TextureFacts, t: &Thresholds) -> Option<Issue> {
    let dim = texture.max_dimension();
    if dim <= t.max_texture_size {
        return None;
    }
    let r = ratio(f64::from(dim), f64::from(t.max_texture_size));
    let memory_mb = texture.estimated_memory_mb();
    Some(issue(
        RuleId::RTex01,
        format!("Large Texture: {}", texture.name),
        format!(
            "Texture size: {}x{} (threshold: {}, {:.2}x over budget, ~{} MB uncompressed)",
            texture.width, texture.height, t.max_texture_size, r, memory_mb
        ),
        score::oversized_texture(dim, t.max_texture_size, memory_mb),
        &texture.path,
        "Resize texture or enable virtual texturing",
    ))
}

pub fn texture_sample_count(material: &MaterialFacts, t: &Thresholds) -> Option<Issue> {
    if material.sample_count <= t.max_texture_samples_per_material {
        return None;
    }
    let r = ratio(
        f64::from(material.sample_count),
        f64::from(t.max_texture_samples_per_material),
    );
    Some(issue(
        RuleId::RMat01,
        format!("Too Many Texture Samples: {}", material.name),
        format!(
            "Material samples {} textures (threshold: {}, {:.2}x over budget)",
            material.sample_count, t.max_texture_samples_per_material, r
        ),
        score::texture_samples(material.sample_count, t.max_texture_samples_per_material),
        &material.path,
        "Pack channels into fewer textures or move detail to a material function",
    ))
}

pub fn two_sided_material(material: &MaterialFacts, _t: &Thresholds) -> Option<Issue> {
    if !material.two_sided {
        return None;
    }
    Some(issue(
        RuleId::RMat02,
        format!("Two-Sided Material: {}", material.name),
        "Two-sided rendering disables back-face culling and doubles pixel shading for affected geometry"
            .to_string(),
        score::TWO_SIDED_IMPACT,
        &material.path,
        "Disable two-sided unless the geometry is visible from both sides",
    ))
}

pub fn complex_translucent_material(material: &MaterialFacts, _t: &Thresholds) -> Option<Issue> {
    if !material.blend_mode.is_translucent() || material.sample_count <= TRANSLUCENT_SAMPLE_LIMIT {
        return None;
    }
    Some(issue(
        RuleId::RMat03,
        format!("Complex Translucent Material: {}", material.name),
        format!(
            "{:?} material samples {} textures (limit for translucency: {})",
            material.blend_mode, material.sample_count, TRANSLUCENT_SAMPLE_LIMIT
        ),
        score::complex_translucency(material.sample_count),
        &material.path,
        "Reduce texture samples or switch to masked blending",
    ))
}

pub fn shader_complexity(material: &MaterialFacts, _t: &Thresholds) -> Option<Issue> {
    let instructions = material.estimated_instructions;
    if instructions <= SHADER_INSTRUCTION_LIMIT {
        return None;
    }
    let r = ratio(f64::from(instructions), f64::from(SHADER_INSTRUCTION_LIMIT));
    Some(issue(
        RuleId::RMat04,
        format!("High Shader Complexity: {}", material.name),
        format!(
            "Estimated {} shader instructions (threshold: {}, {:.2}x over budget)",
            instructions, SHADER_INSTRUCTION_LIMIT, r
        ),
        score::shader_complexity(instructions, SHADER_INSTRUCTION_LIMIT),
        &material.path,
        "Simplify the material graph or bake expensive math into textures",
    ))
}

pub fn complex_blueprint(bp: &BlueprintFacts, t: &Thresholds) -> Option<Issue> {
    if bp.total_nodes <= t.max_blueprint_nodes {
        return None;
    }
    let r = ratio(bp.total_nodes as f64, t.max_blueprint_nodes as f64);
    Some(issue(
        RuleId::RBp01,
        format!("Complex Blueprint: {}", bp.name),
        format!(
            "Blueprint has {} nodes (threshold: {}, {:.2}x over budget)",
            bp.total_nodes, t.max_blueprint_nodes, r
        ),
        score::complex_blueprint(bp.total_nodes, t.max_blueprint_nodes),
        &bp.path,
        "Split logic into functions or components, or move hot paths to C++",
    ))
}

pub fn tick_in_complex_blueprint(bp: &BlueprintFacts, _t: &Thresholds) -> Option<Issue> {
    if !bp.has_event_tick || bp.total_nodes <= TICK_NODE_LIMIT {
        return None;
    }
    Some(issue(
        RuleId::RBp02,
        format!("Event Tick in Complex Blueprint: {}", bp.name),
        format!(
            "Blueprint with {} nodes runs logic on Event Tick (limit: {} nodes)",
            bp.total_nodes, TICK_NODE_LIMIT
        ),
        score::tick_in_complex_blueprint(bp.total_nodes),
        &bp.path,
        "Replace Event Tick with timers or event-driven updates",
    ))
}

pub fn underused_material_instances(p: &ProjectFacts, _t: &Thresholds) -> Option<Issue> {
    let b = p.base_materials;
    let i = p.material_instances;
    if b <= INSTANCE_BASE_FLOOR || i >= 2 * b {
        return None;
    }
    Some(issue(
        RuleId::RProj01,
        "Under-used Material Instances".to_string(),
        format!(
            "Project has {} base materials and {} material instances ({:.2} instances per material, expected at least 2)",
            b,
            i,
            i as f64 / b as f64
        ),
        score::underused_instances(b, i),
        PROJECT_PATH,
        "Create material instances from shared master materials instead of new base materials",
    ))
}

/// Severity an issue must carry given its rule and impact.
pub fn expected_severity(issue: &Issue) -> Severity {
    rule_severity(issue.rule_id, issue.impact)
}

fn rule_severity(rule: RuleId, impact: f64) -> Severity {
    rule.def()
        .fixed_severity
        .unwrap_or_else(|| score::severity_for(impact))
}
