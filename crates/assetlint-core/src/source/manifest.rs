//! JSON manifest binding of the asset source.
//!
//! A manifest is a flat export of a project's content catalogue plus an
//! optional snapshot of the open scene. Optional geometry fields model
//! assets whose data could not be read at export time.

use serde::{Deserialize, Serialize};

use crate::source::{
    ActorView, AssetError, AssetKind, AssetSource, AssetView, BlendMode, BlueprintView,
    EngineFilter, GraphKind, GraphView, MaterialView, MeshInstance, MeshView, TextureView,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Manifest {
    pub engine: EngineFilter,
    pub meshes: Vec<MeshRecord>,
    pub textures: Vec<TextureRecord>,
    pub materials: Vec<MaterialRecord>,
    pub material_instances: Vec<MaterialInstanceRecord>,
    pub blueprints: Vec<BlueprintRecord>,
    pub scene: Option<SceneRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub lod_count: Option<u32>,
    #[serde(default)]
    pub triangles: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextureRecord {
    pub name: String,
    pub path: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub two_sided: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// Paths of the textures sampled by this material.
    #[serde(default)]
    pub textures: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialInstanceRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlueprintRecord {
    pub name: String,
    pub path: String,
    /// `None` when the blueprint's graphs could not be loaded.
    #[serde(default)]
    pub graphs: Option<Vec<GraphRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphRecord {
    pub kind: GraphKind,
    #[serde(default)]
    pub name: String,
    /// Node titles in graph order.
    #[serde(default)]
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SceneRecord {
    #[serde(default)]
    pub actors: Vec<ActorRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorRecord {
    pub name: String,
    #[serde(default)]
    pub instances: Vec<InstanceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceRecord {
    /// Path of the placed mesh.
    pub mesh: String,
    /// Paths of the materials in slot order.
    #[serde(default)]
    pub materials: Vec<String>,
}

impl Manifest {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    fn mesh(&self, path: &str) -> Option<&MeshRecord> {
        self.meshes.iter().find(|m| m.path == path)
    }

    fn texture(&self, path: &str) -> Option<&TextureRecord> {
        self.textures.iter().find(|t| t.path == path)
    }

    fn material(&self, path: &str) -> Option<&MaterialRecord> {
        self.materials.iter().find(|m| m.path == path)
    }
}

impl MeshView for MeshRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn lod_count(&self) -> Result<u32, AssetError> {
        self.lod_count.ok_or_else(|| AssetError::MissingData {
            path: self.path.clone(),
            what: "LOD",
        })
    }

    fn triangle_count(&self) -> Result<u64, AssetError> {
        self.triangles.ok_or_else(|| AssetError::MissingData {
            path: self.path.clone(),
            what: "geometry",
        })
    }
}

impl TextureView for TextureRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn dimensions(&self) -> Result<(u32, u32), AssetError> {
        Ok((self.width, self.height))
    }
}

impl AssetView for MaterialInstanceRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }
}

impl BlueprintView for BlueprintRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn graphs(&self) -> Result<Vec<GraphView<'_>>, AssetError> {
        let graphs = self.graphs.as_ref().ok_or_else(|| AssetError::MissingData {
            path: self.path.clone(),
            what: "graph",
        })?;

        Ok(graphs
            .iter()
            .map(|g| GraphView {
                kind: g.kind,
                node_titles: g.nodes.iter().map(String::as_str).collect(),
            })
            .collect())
    }
}

/// Material view that resolves texture references against its manifest.
struct ManifestMaterial<'a> {
    record: &'a MaterialRecord,
    manifest: &'a Manifest,
}

impl MaterialView for ManifestMaterial<'_> {
    fn name(&self) -> &str {
        &self.record.name
    }

    fn path(&self) -> &str {
        &self.record.path
    }

    fn is_two_sided(&self) -> bool {
        self.record.two_sided
    }

    fn blend_mode(&self) -> BlendMode {
        self.record.blend_mode
    }

    fn used_textures(&self) -> Result<Vec<Box<dyn TextureView + '_>>, AssetError> {
        self.record
            .textures
            .iter()
            .map(|path| match self.manifest.texture(path) {
                Some(t) => Ok(Box::new(t) as Box<dyn TextureView + '_>),
                None => Err(AssetError::Unresolved {
                    path: self.record.path.clone(),
                    kind: AssetKind::Texture,
                    reference: path.clone(),
                }),
            })
            .collect()
    }

    fn resolved_textures(&self) -> Vec<Box<dyn TextureView + '_>> {
        self.record
            .textures
            .iter()
            .filter_map(|path| self.manifest.texture(path))
            .map(|t| Box::new(t) as Box<dyn TextureView + '_>)
            .collect()
    }
}

struct ManifestActor<'a> {
    record: &'a ActorRecord,
    manifest: &'a Manifest,
}

impl ActorView for ManifestActor<'_> {
    fn name(&self) -> &str {
        &self.record.name
    }

    fn mesh_instances(&self) -> Vec<MeshInstance<'_>> {
        self.record
            .instances
            .iter()
            .map(|inst| MeshInstance {
                mesh: self
                    .manifest
                    .mesh(&inst.mesh)
                    .map(|m| Box::new(m) as Box<dyn MeshView + '_>),
                // Unresolvable material slots are dropped.
                materials: inst
                    .materials
                    .iter()
                    .filter_map(|path| self.manifest.material(path))
                    .map(|record| {
                        Box::new(ManifestMaterial {
                            record,
                            manifest: self.manifest,
                        }) as Box<dyn MaterialView + '_>
                    })
                    .collect(),
            })
            .collect()
    }
}

impl AssetSource for Manifest {
    fn meshes(&self) -> Vec<Box<dyn MeshView + '_>> {
        self.meshes
            .iter()
            .map(|m| Box::new(m) as Box<dyn MeshView + '_>)
            .collect()
    }

    fn textures(&self) -> Vec<Box<dyn TextureView + '_>> {
        self.textures
            .iter()
            .map(|t| Box::new(t) as Box<dyn TextureView + '_>)
            .collect()
    }

    fn materials(&self) -> Vec<Box<dyn MaterialView + '_>> {
        self.materials
            .iter()
            .map(|record| {
                Box::new(ManifestMaterial {
                    record,
                    manifest: self,
                }) as Box<dyn MaterialView + '_>
            })
            .collect()
    }

    fn material_instances(&self) -> Vec<Box<dyn AssetView + '_>> {
        self.material_instances
            .iter()
            .map(|mi| Box::new(mi) as Box<dyn AssetView + '_>)
            .collect()
    }

    fn blueprints(&self) -> Vec<Box<dyn BlueprintView + '_>> {
        self.blueprints
            .iter()
            .map(|b| Box::new(b) as Box<dyn BlueprintView + '_>)
            .collect()
    }

    fn scene(&self) -> Option<Vec<Box<dyn ActorView + '_>>> {
        let scene = self.scene.as_ref()?;
        Some(
            scene
                .actors
                .iter()
                .map(|record| {
                    Box::new(ManifestActor {
                        record,
                        manifest: self,
                    }) as Box<dyn ActorView + '_>
                })
                .collect(),
        )
    }

    fn is_engine_asset(&self, path: &str) -> bool {
        self.engine.matches(path)
    }

    fn count(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Mesh => self.meshes.len(),
            AssetKind::Texture => self.textures.len(),
            AssetKind::Material => self.materials.len(),
            AssetKind::MaterialInstance => self.material_instances.len(),
            AssetKind::Blueprint => self.blueprints.len(),
        }
    }
}
