use std::sync::Arc;

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Surface description attached to a mesh.
///
/// Materials are shared through `Arc`; a preset swaps the `Arc` on the mesh
/// and never mutates the material it replaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Vec4,
    pub roughness: f32,
    pub metalness: f32,
    pub wireframe: bool,
    pub transparent: bool,
    pub double_sided: bool,
    /// Texture references are opaque to this crate; kept so that the
    /// textured preset round-trips everything the loader attached.
    pub textures: Vec<String>,
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Vec4::ONE,
            roughness: 0.5,
            metalness: 0.0,
            wireframe: false,
            transparent: false,
            double_sided: false,
            textures: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.textures.push(texture.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.color.w
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    /// The model's own materials and textures.
    #[default]
    Textured,
    /// Uniform matte grey for form study.
    Clay,
    /// Topology view.
    Wireframe,
    /// Translucent shell so the skeleton shows through.
    XRay,
    /// Metallic physically-based look.
    Pbr,
}

impl MaterialPreset {
    pub const ALL: [MaterialPreset; 5] = [
        MaterialPreset::Textured,
        MaterialPreset::Clay,
        MaterialPreset::Wireframe,
        MaterialPreset::XRay,
        MaterialPreset::Pbr,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MaterialPreset::Textured => "Textured",
            MaterialPreset::Clay => "Clay",
            MaterialPreset::Wireframe => "Wireframe",
            MaterialPreset::XRay => "X-Ray",
            MaterialPreset::Pbr => "PBR",
        }
    }

    /// The material this preset substitutes, or `None` for
    /// [`MaterialPreset::Textured`], which restores the original.
    #[must_use]
    pub fn override_material(self) -> Option<Material> {
        let material = match self {
            MaterialPreset::Textured => return None,
            MaterialPreset::Clay => Material {
                roughness: 1.0,
                metalness: 0.0,
                ..Material::new("Clay").with_color(Vec4::new(0.8, 0.8, 0.8, 1.0))
            },
            MaterialPreset::Wireframe => Material {
                wireframe: true,
                ..Material::new("Wireframe").with_color(Vec4::new(0.0, 1.0, 0.0, 1.0))
            },
            MaterialPreset::XRay => Material {
                transparent: true,
                double_sided: true,
                ..Material::new("X-Ray").with_color(Vec4::new(0.0, 1.0, 1.0, 0.3))
            },
            MaterialPreset::Pbr => Material {
                roughness: 0.2,
                metalness: 0.8,
                ..Material::new("PBR")
            },
        };
        Some(material)
    }

    /// Shared override instance, created once per application of the preset.
    #[must_use]
    pub(crate) fn override_arc(self) -> Option<Arc<Material>> {
        self.override_material().map(Arc::new)
    }
}
