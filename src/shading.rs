//! Local illumination: ambient, Lambert diffuse and Blinn-Phong specular,
//! masked by hard shadows from point lights.

use crate::hittable::{Hittable, Object};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vector::{offset_origin, unit_vector};
use glam::DVec3;

/// Result of shading a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shade {
    /// Unclamped color leaving the point.
    Lit(DVec3),
    /// Every light is blocked; the point contributes nothing.
    Shadowed,
}

/// Whether any object other than `skip` sits on the ray from `origin` towards
/// `to_light`. Any finite hit counts, including ones past the light.
pub fn occluded(scene: &Scene, origin: DVec3, to_light: DVec3, skip: usize) -> bool {
    let ray = Ray::new(origin, to_light);
    return scene
        .objects
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != skip)
        .any(|(_, object)| object.intersect(&ray).is_some());
}

/// Per-light shadow flags for the surface point `point` on object `index`,
/// in light order.
pub fn blocked_lights(scene: &Scene, index: usize, point: DVec3, normal: DVec3) -> Vec<bool> {
    let origin = offset_origin(point, normal);
    return scene
        .lights
        .iter()
        .map(|light| occluded(scene, origin, unit_vector(light.position - point), index))
        .collect();
}

/// Shade `point` on `scene.objects[index]`.
///
/// `to_view` is the unit direction from the point back to the camera, also for
/// points reached by reflected rays. Diffuse uses only the first light; specular sums over
/// every light. With no lights at all the point counts as shadowed.
pub fn shade(scene: &Scene, index: usize, point: DVec3, normal: DVec3, to_view: DVec3) -> Shade {
    let object: &Object = &scene.objects[index];
    let origin = offset_origin(point, normal);

    let to_lights: Vec<DVec3> = scene
        .lights
        .iter()
        .map(|light| unit_vector(light.position - point))
        .collect();

    // all-or-nothing: one visible light is enough to shade normally
    let lit = to_lights
        .iter()
        .any(|to_light| !occluded(scene, origin, *to_light, index));
    if !lit {
        return Shade::Shadowed;
    }

    let constants = &scene.constants;
    let diffuse_c = object.diffuse_c.unwrap_or(constants.diffuse_c);
    let specular_c = object.specular_c.unwrap_or(constants.specular_c);
    let surface_color = object.color_at(point);

    let mut color = DVec3::splat(constants.ambient);

    // lambert
    color += diffuse_c * normal.dot(to_lights[0]).max(0.) * surface_color;

    // blinn-phong
    for (to_light, light) in to_lights.iter().zip(scene.lights.iter()) {
        let half = unit_vector(*to_light + to_view);
        color += specular_c * normal.dot(half).max(0.).powf(constants.specular_k) * light.color;
    }

    return Shade::Lit(color);
}
