//! Asset source boundary.
//!
//! The analyzer never talks to a content system directly. Everything it
//! reads goes through the [`AssetSource`] capability trait and the per-kind
//! view traits below, which keeps scans testable with synthetic catalogues
//! and scenes.
//!
//! Views are handed out as boxed trait objects borrowed from the source, so
//! a binding is free to resolve references lazily.

pub mod manifest;
pub mod read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Asset kinds the source can enumerate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Mesh,
    Texture,
    Material,
    MaterialInstance,
    Blueprint,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Mesh => "mesh",
            AssetKind::Texture => "texture",
            AssetKind::Material => "material",
            AssetKind::MaterialInstance => "material-instance",
            AssetKind::Blueprint => "blueprint",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to read a property of an asset that otherwise exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset {path} has no {what} data")]
    MissingData { path: String, what: &'static str },

    #[error("asset {path} references unresolved {kind} {reference}")]
    Unresolved {
        path: String,
        kind: AssetKind,
        reference: String,
    },
}

/// Material blend modes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Opaque,
    Masked,
    Translucent,
    Additive,
    Modulate,
}

impl BlendMode {
    /// Non-opaque modes that blend with the framebuffer.
    pub fn is_translucent(self) -> bool {
        matches!(
            self,
            BlendMode::Translucent | BlendMode::Additive | BlendMode::Modulate
        )
    }
}

/// Graph flavours inside a blueprint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Event,
    Function,
}

/// One blueprint graph, reduced to what the rules inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphView<'a> {
    pub kind: GraphKind,
    pub node_titles: Vec<&'a str>,
}

pub trait MeshView {
    fn name(&self) -> &str;
    fn path(&self) -> &str;
    fn lod_count(&self) -> Result<u32, AssetError>;
    /// Triangle count of LOD 0.
    fn triangle_count(&self) -> Result<u64, AssetError>;
}

pub trait TextureView {
    fn name(&self) -> &str;
    fn path(&self) -> &str;
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> Result<(u32, u32), AssetError>;
}

pub trait MaterialView {
    fn name(&self) -> &str;
    fn path(&self) -> &str;
    fn is_two_sided(&self) -> bool;
    fn blend_mode(&self) -> BlendMode;
    /// Textures read by the material's shader. May contain repeats.
    ///
    /// Fails if any reference cannot be resolved.
    fn used_textures(&self) -> Result<Vec<Box<dyn TextureView + '_>>, AssetError>;

    /// The referenced textures that resolve, in reference order.
    ///
    /// Unresolved references are left out instead of failing the material.
    fn resolved_textures(&self) -> Vec<Box<dyn TextureView + '_>>;
}

pub trait BlueprintView {
    fn name(&self) -> &str;
    fn path(&self) -> &str;
    fn graphs(&self) -> Result<Vec<GraphView<'_>>, AssetError>;
}

/// Identity-only view, used for kinds the rules only count.
pub trait AssetView {
    fn name(&self) -> &str;
    fn path(&self) -> &str;
}

/// A placed mesh in the scene with its material slots.
///
/// `mesh` is `None` when the instance references a mesh the source cannot
/// resolve.
pub struct MeshInstance<'a> {
    pub mesh: Option<Box<dyn MeshView + 'a>>,
    pub materials: Vec<Box<dyn MaterialView + 'a>>,
}

pub trait ActorView {
    fn name(&self) -> &str;
    fn mesh_instances(&self) -> Vec<MeshInstance<'_>>;
}

/// Capability interface over an asset catalogue.
///
/// Enumeration order is the order rules observe assets in.
pub trait AssetSource {
    fn meshes(&self) -> Vec<Box<dyn MeshView + '_>>;
    fn textures(&self) -> Vec<Box<dyn TextureView + '_>>;
    fn materials(&self) -> Vec<Box<dyn MaterialView + '_>>;
    fn material_instances(&self) -> Vec<Box<dyn AssetView + '_>>;
    fn blueprints(&self) -> Vec<Box<dyn BlueprintView + '_>>;

    /// Actors of the active scene, or `None` when no scene is loaded.
    fn scene(&self) -> Option<Vec<Box<dyn ActorView + '_>>>;

    /// Whether `path` belongs to engine or vendor content.
    fn is_engine_asset(&self, path: &str) -> bool;

    /// Number of assets of `kind` in the catalogue.
    fn count(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Mesh => self.meshes().len(),
            AssetKind::Texture => self.textures().len(),
            AssetKind::Material => self.materials().len(),
            AssetKind::MaterialInstance => self.material_instances().len(),
            AssetKind::Blueprint => self.blueprints().len(),
        }
    }
}

impl<T: MeshView + ?Sized> MeshView for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn path(&self) -> &str {
        (**self).path()
    }
    fn lod_count(&self) -> Result<u32, AssetError> {
        (**self).lod_count()
    }
    fn triangle_count(&self) -> Result<u64, AssetError> {
        (**self).triangle_count()
    }
}

impl<T: TextureView + ?Sized> TextureView for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn path(&self) -> &str {
        (**self).path()
    }
    fn dimensions(&self) -> Result<(u32, u32), AssetError> {
        (**self).dimensions()
    }
}

impl<T: BlueprintView + ?Sized> BlueprintView for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn path(&self) -> &str {
        (**self).path()
    }
    fn graphs(&self) -> Result<Vec<GraphView<'_>>, AssetError> {
        (**self).graphs()
    }
}

impl<T: AssetView + ?Sized> AssetView for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn path(&self) -> &str {
        (**self).path()
    }
}

/// Prefix-based engine content predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineFilter {
    pub prefixes: Vec<String>,
}

impl Default for EngineFilter {
    fn default() -> Self {
        Self {
            prefixes: vec!["/Engine/".to_string()],
        }
    }
}

impl EngineFilter {
    pub fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_filter_defaults_to_engine_prefix() {
        let filter = EngineFilter::default();
        assert!(filter.matches("/Engine/BasicShapes/Cube"));
        assert!(!filter.matches("/Game/Props/Crate"));
        assert!(!filter.matches("/Game/Engine/Crate"));
    }

    #[test]
    fn engine_filter_accepts_extra_prefixes() {
        let filter = EngineFilter {
            prefixes: vec!["/Engine/".into(), "/Marketplace/".into()],
        };
        assert!(filter.matches("/Marketplace/Trees/Oak"));
    }

    #[test]
    fn translucent_modes() {
        assert!(BlendMode::Translucent.is_translucent());
        assert!(BlendMode::Additive.is_translucent());
        assert!(BlendMode::Modulate.is_translucent());
        assert!(!BlendMode::Opaque.is_translucent());
        assert!(!BlendMode::Masked.is_translucent());
    }

    #[test]
    fn asset_kind_names_are_stable() {
        assert_eq!(AssetKind::MaterialInstance.to_string(), "material-instance");
        assert_eq!(
            serde_json::to_string(&AssetKind::MaterialInstance).unwrap(),
            "\"material-instance\""
        );
    }
}
