use crate::error::{RenderError, Result};
use crate::hittable::{Object, Shape};
use crate::vector::unit_vector;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: DVec3,
    /// Radiance, not limited to [0, 1].
    pub color: DVec3,
}

impl Light {
    pub fn new(position: DVec3, color: DVec3) -> Self {
        return Self { position, color };
    }
}

/// Scene-wide shading parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConstants {
    pub ambient: f64,
    pub diffuse_c: f64,
    pub specular_c: f64,
    pub specular_k: f64,
    /// Upper bound on nearest-hit searches per pixel, primary ray included.
    pub max_depth: u32,
}

impl Default for ShadingConstants {
    fn default() -> Self {
        return Self {
            ambient: 0.05,
            diffuse_c: 1.,
            specular_c: 1.,
            specular_k: 50.,
            max_depth: 5,
        };
    }
}

/// Everything the tracer reads while rendering. Built once, then shared
/// read-only across all pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub constants: ShadingConstants,
    #[serde(default)]
    pub lights: Vec<Light>,
    /// Order decides ties in the nearest-hit search.
    #[serde(default)]
    pub objects: Vec<Object>,
}

impl Scene {
    pub fn new(constants: ShadingConstants) -> Self {
        return Self {
            constants,
            lights: vec![],
            objects: vec![],
        };
    }

    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut scene: Scene = toml::from_str(source)?;

        // plane normals in files aren't guaranteed to be unit length
        for object in scene.objects.iter_mut() {
            if let Shape::Plane(plane) = &mut object.shape {
                let length = plane.normal.length();
                if !length.is_finite() || length == 0. {
                    return Err(RenderError::InvalidConfig(format!(
                        "plane normal {} has no direction",
                        plane.normal
                    )));
                }
                plane.normal = unit_vector(plane.normal);
            }
        }
        scene.validate()?;

        debug!(
            objects = scene.objects.len(),
            lights = scene.lights.len(),
            max_depth = scene.constants.max_depth,
            "parsed scene"
        );
        return Ok(scene);
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading scene");
        let source = fs::read_to_string(path)?;
        return Self::from_toml_str(&source);
    }

    fn validate(&self) -> Result<()> {
        if self.constants.max_depth == 0 {
            return Err(RenderError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if !self.constants.specular_k.is_finite() {
            return Err(RenderError::InvalidConfig(
                "specular_k must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
