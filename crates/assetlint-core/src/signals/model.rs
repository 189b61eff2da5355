use serde::{Deserialize, Serialize};

use crate::source::BlendMode;

/// Measured geometry of a static mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshFacts {
    pub name: String,
    pub path: String,
    pub lod_count: u32,
    /// Triangles in LOD 0.
    pub triangles: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureFacts {
    pub name: String,
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl TextureFacts {
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Uncompressed RGBA8 footprint of a square texture of the largest
    /// dimension, in whole MiB.
    ///
    /// Computed in `u128`; any `u32` dimension fits without overflow.
    pub fn estimated_memory_mb(&self) -> u64 {
        let dim = u128::from(self.max_dimension());
        let mb = (dim * dim * 4) >> 20;
        u64::try_from(mb).unwrap_or(u64::MAX)
    }
}

/// Shader-relevant properties of a base material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialFacts {
    pub name: String,
    pub path: String,
    pub two_sided: bool,
    pub blend_mode: BlendMode,
    /// Distinct textures sampled.
    pub sample_count: u32,
    pub estimated_instructions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintFacts {
    pub name: String,
    pub path: String,
    /// Nodes across event and function graphs.
    pub total_nodes: u64,
    /// An event graph contains an "Event Tick" node.
    pub has_event_tick: bool,
}

/// Catalogue-wide totals used by project rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFacts {
    pub base_materials: usize,
    pub material_instances: usize,
}
