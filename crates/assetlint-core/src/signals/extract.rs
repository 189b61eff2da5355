use std::collections::BTreeSet;

use crate::signals::model::*;
use crate::source::{
    AssetError, BlendMode, BlueprintView, GraphKind, MaterialView, MeshView, TextureView,
};

const SHADER_BASE_INSTRUCTIONS: u32 = 50;
const SHADER_INSTRUCTIONS_PER_SAMPLE: u32 = 15;
const SHADER_TRANSLUCENCY_INSTRUCTIONS: u32 = 30;

const EVENT_TICK: &str = "Event Tick";

/// Reads the geometry facts of a mesh.
///
/// Fails when the source has no LOD 0 render data for it.
pub fn extract_mesh(mesh: &dyn MeshView) -> Result<MeshFacts, AssetError> {
    Ok(MeshFacts {
        name: mesh.name().to_string(),
        path: mesh.path().to_string(),
        lod_count: mesh.lod_count()?,
        triangles: mesh.triangle_count()?,
    })
}

pub fn extract_texture(texture: &dyn TextureView) -> Result<TextureFacts, AssetError> {
    let (width, height) = texture.dimensions()?;
    Ok(TextureFacts {
        name: texture.name().to_string(),
        path: texture.path().to_string(),
        width,
        height,
    })
}

/// Reads a material and estimates its shader cost.
///
/// Repeated references to the same texture count as one sample.
pub fn extract_material(material: &dyn MaterialView) -> Result<MaterialFacts, AssetError> {
    let textures = material.used_textures()?;
    let distinct: BTreeSet<&str> = textures.iter().map(|t| t.path()).collect();
    let sample_count = u32::try_from(distinct.len()).unwrap_or(u32::MAX);

    let two_sided = material.is_two_sided();
    let blend_mode = material.blend_mode();

    Ok(MaterialFacts {
        name: material.name().to_string(),
        path: material.path().to_string(),
        two_sided,
        blend_mode,
        sample_count,
        estimated_instructions: estimate_instructions(sample_count, two_sided, blend_mode),
    })
}

/// Rough pixel-shader instruction count.
///
/// Two-sided rendering doubles the base cost; translucency adds a fixed
/// blending overhead after doubling.
pub fn estimate_instructions(sample_count: u32, two_sided: bool, blend_mode: BlendMode) -> u32 {
    let mut instructions = SHADER_BASE_INSTRUCTIONS
        .saturating_add(SHADER_INSTRUCTIONS_PER_SAMPLE.saturating_mul(sample_count));
    if two_sided {
        instructions = instructions.saturating_mul(2);
    }
    if blend_mode == BlendMode::Translucent {
        instructions = instructions.saturating_add(SHADER_TRANSLUCENCY_INSTRUCTIONS);
    }
    instructions
}

pub fn extract_blueprint(blueprint: &dyn BlueprintView) -> Result<BlueprintFacts, AssetError> {
    let graphs = blueprint.graphs()?;

    let total_nodes = graphs.iter().map(|g| g.node_titles.len() as u64).sum();
    let has_event_tick = graphs
        .iter()
        .filter(|g| g.kind == GraphKind::Event)
        .flat_map(|g| g.node_titles.iter())
        .any(|title| title.contains(EVENT_TICK));

    Ok(BlueprintFacts {
        name: blueprint.name().to_string(),
        path: blueprint.path().to_string(),
        total_nodes,
        has_event_tick,
    })
}
