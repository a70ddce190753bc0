//! Whitted-style ray tracer for spheres, planes and triangles.
//!
//! Each primary ray finds its nearest hit with a linear scan over the scene,
//! is shaded with ambient + Lambert + Blinn-Phong terms under hard shadows
//! from point lights, then follows mirror reflections up to a fixed depth.
//!
//! - [`hittable`] - primitives and their intersection/normal routines
//! - [`scene`] - objects, lights and shading constants
//! - [`shading`] - shadow queries and local illumination
//! - [`tracer`] - nearest-hit search and the reflection loop
//! - [`camera`] - pixel grid, parallel rendering and PPM output

pub mod camera;
pub mod error;
pub mod hittable;
pub mod ray;
pub mod scene;
pub mod shading;
pub mod tracer;
pub mod vector;

use glam::DVec3;
use std::path::Path;

pub use camera::Camera;
pub use error::{RenderError, Result};
pub use hittable::{Hittable, Object, Plane, Shape, Sphere, SurfaceColor, Triangle};
pub use ray::Ray;
pub use scene::{Light, Scene, ShadingConstants};
pub use tracer::{render_pixel, trace_bounce, trace_path, trace_ray, HitRecord, PathSample};

/// Three spheres, a green triangle and a checkered floor under white, red
/// and green lights.
pub fn default_scene() -> Scene {
    let mut scene = Scene::new(ShadingConstants::default());

    scene.add(Object::sphere(DVec3::new(0.75, 0.1, 1.), 0.6, DVec3::new(0., 0., 1.)));
    scene.add(Object::sphere(DVec3::new(-0.75, 0.1, 2.25), 0.6, DVec3::new(0.5, 0.223, 0.5)));
    scene.add(Object::sphere(DVec3::new(-2.75, 0.1, 3.5), 0.6, DVec3::new(1., 0.572, 0.184)));
    scene.add(Object::plane(DVec3::new(0., -0.5, 0.), DVec3::Y));
    scene.add(Object::triangle(
        [
            DVec3::new(-0.1, 0., 0.),
            DVec3::new(0., 0.25, 0.),
            DVec3::new(0.1, 0., 0.),
        ],
        DVec3::new(0., 0.5, 0.),
    ));

    scene.add_light(Light::new(DVec3::new(5., 5., -10.), DVec3::ONE));
    scene.add_light(Light::new(DVec3::new(-8., 3., -5.), DVec3::new(1., 0., 0.)));
    scene.add_light(Light::new(DVec3::new(0., -10., -5.), DVec3::new(0., 0.5, 0.)));

    return scene;
}

/// Render `scene` at the given size and write it as a PPM file.
pub fn render_scene(scene: &Scene, image_width: u32, image_height: u32, path: impl AsRef<Path>) -> Result<()> {
    let camera = Camera::new(image_width, image_height)?;
    return camera.render_to_disk(scene, path);
}
