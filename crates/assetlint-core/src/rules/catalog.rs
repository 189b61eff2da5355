use serde::{Deserialize, Serialize};

use crate::source::AssetKind;

/// Stable identifiers of the inspection rules.
///
/// Declaration order is catalogue order, which is also the order rules run
/// in within a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "R-MESH-01")]
    RMesh01,
    #[serde(rename = "R-MESH-02")]
    RMesh02,
    #[serde(rename = "R-TEX-01")]
    RTex01,
    #[serde(rename = "R-MAT-01")]
    RMat01,
    #[serde(rename = "R-MAT-02")]
    RMat02,
    #[serde(rename = "R-MAT-03")]
    RMat03,
    #[serde(rename = "R-MAT-04")]
    RMat04,
    #[serde(rename = "R-BP-01")]
    RBp01,
    #[serde(rename = "R-BP-02")]
    RBp02,
    #[serde(rename = "R-PROJ-01")]
    RProj01,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::RMesh01 => "R-MESH-01",
            RuleId::RMesh02 => "R-MESH-02",
            RuleId::RTex01 => "R-TEX-01",
            RuleId::RMat01 => "R-MAT-01",
            RuleId::RMat02 => "R-MAT-02",
            RuleId::RMat03 => "R-MAT-03",
            RuleId::RMat04 => "R-MAT-04",
            RuleId::RBp01 => "R-BP-01",
            RuleId::RBp02 => "R-BP-02",
            RuleId::RProj01 => "R-PROJ-01",
        }
    }

    pub fn def(self) -> &'static RuleDef {
        // CATALOG is indexed by declaration order.
        &CATALOG[self as usize]
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue severity. Ordering is semantic: `Info < Warning < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filtering bucket of an issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mesh,
    Texture,
    Material,
    Blueprint,
    Audio,
    Particle,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Mesh,
        Category::Texture,
        Category::Material,
        Category::Blueprint,
        Category::Audio,
        Category::Particle,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mesh => "mesh",
            Category::Texture => "texture",
            Category::Material => "material",
            Category::Blueprint => "blueprint",
            Category::Audio => "audio",
            Category::Particle => "particle",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDef {
    pub id: RuleId,
    pub title: &'static str,
    pub category: Category,
    /// Asset kind swept to evaluate the rule. Project-wide rules report the
    /// kind whose enumeration they follow.
    pub kind: AssetKind,
    /// Severity assigned regardless of impact, if any.
    pub fixed_severity: Option<Severity>,
}

pub const CATALOG: &[RuleDef] = &[
    RuleDef {
        id: RuleId::RMesh01,
        title: "High-poly mesh",
        category: Category::Mesh,
        kind: AssetKind::Mesh,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RMesh02,
        title: "Missing LOD chain",
        category: Category::Mesh,
        kind: AssetKind::Mesh,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RTex01,
        title: "Oversized texture",
        category: Category::Texture,
        kind: AssetKind::Texture,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RMat01,
        title: "Too many texture samples",
        category: Category::Material,
        kind: AssetKind::Material,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RMat02,
        title: "Two-sided material",
        category: Category::Material,
        kind: AssetKind::Material,
        fixed_severity: Some(Severity::Warning),
    },
    RuleDef {
        id: RuleId::RMat03,
        title: "Complex translucent material",
        category: Category::Material,
        kind: AssetKind::Material,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RMat04,
        title: "High shader complexity",
        category: Category::Material,
        kind: AssetKind::Material,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RBp01,
        title: "Complex blueprint",
        category: Category::Blueprint,
        kind: AssetKind::Blueprint,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RBp02,
        title: "Event Tick in complex blueprint",
        category: Category::Blueprint,
        kind: AssetKind::Blueprint,
        fixed_severity: None,
    },
    RuleDef {
        id: RuleId::RProj01,
        title: "Under-used material instances",
        category: Category::Material,
        kind: AssetKind::MaterialInstance,
        fixed_severity: None,
    },
];
