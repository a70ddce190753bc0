use crate::hittable::{Hittable, Object};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::shading::{shade, Shade};
use crate::vector::unit_vector;
use glam::DVec3;

#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    pub object: &'a Object,
    /// Position of `object` in the scene's object list.
    pub index: usize,
    pub point: DVec3,
    pub normal: DVec3,
    pub t: f64,
    /// Unclamped local shading at `point`.
    pub color: DVec3,
}

/// Color gathered along one primary ray and its reflections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Unclamped accumulated color.
    pub color: DVec3,
    /// Nearest-hit searches performed, never more than `max_depth`.
    pub searches: u32,
}

/// Index and distance of the closest object along `ray`. The earliest object
/// in the list wins exact ties; non-finite distances never win.
pub fn nearest_hit(scene: &Scene, ray: &Ray) -> Option<(usize, f64)> {
    return scene
        .objects
        .iter()
        .enumerate()
        .fold(None, |closest, (index, object)| match object.intersect(ray) {
            Some(t) if t.is_finite() && closest.map_or(true, |(_, best)| t < best) => Some((index, t)),
            _ => closest,
        });
}

/// Find what `ray` hits first and shade it, viewed from the ray's origin.
///
/// `None` both when nothing is hit and when the hit point is in shadow from
/// every light; callers can't tell the two apart.
pub fn trace_ray<'a>(scene: &'a Scene, ray: &Ray) -> Option<HitRecord<'a>> {
    return trace_bounce(scene, ray, ray.origin);
}

/// Like [`trace_ray`], but highlights are computed towards `eye` instead of
/// the ray origin. Reflected rays are still shaded as seen from the camera.
pub fn trace_bounce<'a>(scene: &'a Scene, ray: &Ray, eye: DVec3) -> Option<HitRecord<'a>> {
    let (index, t) = nearest_hit(scene, ray)?;
    let object = &scene.objects[index];

    let point = ray.at(t);
    let normal = object.normal_at(point);
    let to_view = unit_vector(eye - point);

    match shade(scene, index, point, normal, to_view) {
        Shade::Lit(color) => Some(HitRecord {
            object,
            index,
            point,
            normal,
            t,
            color,
        }),
        Shade::Shadowed => None,
    }
}

/// Follow `ray` through up to `max_depth` mirror bounces, weighting each
/// bounce by the product of the reflection coefficients before it.
pub fn trace_path(scene: &Scene, ray: Ray) -> PathSample {
    let mut color = DVec3::ZERO;
    let mut reflection = 1.;
    let eye = ray.origin;
    let mut ray = ray;
    let mut searches = 0;

    while searches < scene.constants.max_depth {
        searches += 1;
        let Some(hit) = trace_bounce(scene, &ray, eye) else {
            break;
        };
        color += reflection * hit.color;
        reflection *= hit.object.reflection;
        ray = ray.reflected(hit.point, hit.normal);
    }

    return PathSample { color, searches };
}

/// Final color for one primary ray, clamped to [0, 1].
pub fn render_pixel(scene: &Scene, ray: Ray) -> DVec3 {
    return trace_path(scene, ray)
        .color
        .clamp(DVec3::ZERO, DVec3::ONE);
}
