use crate::ray::Ray;
use crate::vector::{cross, unit_vector};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Rays closer than this to parallel with a plane are treated as misses.
const PARALLEL_EPSILON: f64 = 1e-6;

/// Reflection coefficient for objects that don't specify one.
pub const DEFAULT_REFLECTION: f64 = 0.5;

pub trait Hittable {
    /// Distance along `ray` to the nearest surface point in front of its
    /// origin, or `None` if the ray misses.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Outward unit normal at `point`, which must lie on the surface.
    fn normal_at(&self, point: DVec3) -> DVec3;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: DVec3, radius: f64) -> Self {
        return Self { center, radius };
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2. * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - 4. * a * c;

        if discriminant <= 0. {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // pick the sign that adds magnitudes so the subtraction can't cancel
        let q = if b < 0. {
            (-b + sqrtd) / 2.
        } else {
            (-b - sqrtd) / 2.
        };
        let (t0, t1) = {
            let (r0, r1) = (q / a, c / q);
            (r0.min(r1), r0.max(r1))
        };

        // both roots behind the origin
        if t1 < 0. {
            return None;
        }
        // a negative near root means the origin is inside the sphere
        return Some(if t0 < 0. { t1 } else { t0 });
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        return unit_vector(point - self.center);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: DVec3,
    pub normal: DVec3,
}

impl Plane {
    pub fn new(point: DVec3, normal: DVec3) -> Self {
        return Self {
            point,
            normal: unit_vector(normal),
        };
    }
}

/// Distance along `ray` to the plane through `point` with unit `normal`.
pub fn intersect_plane(ray: &Ray, point: DVec3, normal: DVec3) -> Option<f64> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    if t < 0. {
        return None;
    }
    return Some(t);
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        return intersect_plane(ray, self.point, self.normal);
    }

    fn normal_at(&self, _point: DVec3) -> DVec3 {
        return self.normal;
    }
}

/// Flat-shaded triangle. The face normal follows the winding `v0 -> v1 -> v2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [DVec3; 3],
}

impl Triangle {
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        return Self {
            vertices: [v0, v1, v2],
        };
    }

    pub fn face_normal(&self) -> DVec3 {
        let [v0, v1, v2] = self.vertices;
        return unit_vector(cross(v1 - v0, v2 - v0));
    }

    pub fn centroid(&self) -> DVec3 {
        let [v0, v1, v2] = self.vertices;
        return (v0 + v1 + v2) / 3.;
    }

    /// Same-side test for a point already known to lie in the triangle's plane.
    /// Points on an edge count as inside.
    pub fn contains(&self, p: DVec3) -> bool {
        let [v0, v1, v2] = self.vertices;
        let c0 = cross(v1 - v0, p - v0);
        let c1 = cross(v2 - v1, p - v1);
        let c2 = cross(v0 - v2, p - v2);

        return c0.dot(c1) >= 0. && c1.dot(c2) >= 0. && c2.dot(c0) >= 0.;
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let t = intersect_plane(ray, self.vertices[0], self.face_normal())?;
        if self.contains(ray.at(t)) {
            return Some(t);
        }
        return None;
    }

    fn normal_at(&self, _point: DVec3) -> DVec3 {
        return self.face_normal();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        match self {
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Plane(plane) => plane.normal_at(point),
            Shape::Triangle(triangle) => triangle.normal_at(point),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkerboard {
    pub even: DVec3,
    pub odd: DVec3,
}

impl Checkerboard {
    /// Half-unit squares on the XZ plane.
    pub fn color_at(&self, point: DVec3) -> DVec3 {
        let parity = |v: f64| ((2. * v).floor() as i64).rem_euclid(2) == 1;
        if parity(point.x) ^ parity(point.z) {
            self.odd
        } else {
            self.even
        }
    }
}

/// Surface color, either fixed or a function of the hit point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurfaceColor {
    Constant(DVec3),
    Checkerboard { checkerboard: Checkerboard },
}

impl SurfaceColor {
    pub fn checkerboard(even: DVec3, odd: DVec3) -> Self {
        return SurfaceColor::Checkerboard {
            checkerboard: Checkerboard { even, odd },
        };
    }

    pub fn resolve(&self, point: DVec3) -> DVec3 {
        match self {
            SurfaceColor::Constant(color) => *color,
            SurfaceColor::Checkerboard { checkerboard } => checkerboard.color_at(point),
        }
    }
}

fn default_reflection() -> f64 {
    DEFAULT_REFLECTION
}

/// A shape plus its material. Missing `diffuse_c`/`specular_c` fall back to
/// the scene's shading constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    #[serde(flatten)]
    pub shape: Shape,
    pub color: SurfaceColor,
    #[serde(default = "default_reflection")]
    pub reflection: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffuse_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular_c: Option<f64>,
}

impl Object {
    pub fn new(shape: Shape, color: SurfaceColor) -> Self {
        return Self {
            shape,
            color,
            reflection: DEFAULT_REFLECTION,
            diffuse_c: None,
            specular_c: None,
        };
    }

    pub fn sphere(center: DVec3, radius: f64, color: DVec3) -> Self {
        return Self::new(
            Shape::Sphere(Sphere::new(center, radius)),
            SurfaceColor::Constant(color),
        );
    }

    /// White/black checkered plane with a matte, mildly reflective finish.
    pub fn plane(point: DVec3, normal: DVec3) -> Self {
        return Self::new(
            Shape::Plane(Plane::new(point, normal)),
            SurfaceColor::checkerboard(DVec3::ONE, DVec3::ZERO),
        )
        .with_diffuse(0.75)
        .with_specular(0.5)
        .with_reflection(0.25);
    }

    pub fn triangle(vertices: [DVec3; 3], color: DVec3) -> Self {
        let [v0, v1, v2] = vertices;
        return Self::new(
            Shape::Triangle(Triangle::new(v0, v1, v2)),
            SurfaceColor::Constant(color),
        );
    }

    pub fn with_reflection(mut self, reflection: f64) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn with_diffuse(mut self, diffuse_c: f64) -> Self {
        self.diffuse_c = Some(diffuse_c);
        self
    }

    pub fn with_specular(mut self, specular_c: f64) -> Self {
        self.specular_c = Some(specular_c);
        self
    }

    pub fn color_at(&self, point: DVec3) -> DVec3 {
        return self.color.resolve(point);
    }
}

impl Hittable for Object {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        return self.shape.intersect(ray);
    }

    fn normal_at(&self, point: DVec3) -> DVec3 {
        return self.shape.normal_at(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro128PlusPlus;

    #[test]
    fn sphere_hit_from_outside_returns_near_root() {
        let sphere = Sphere::new(DVec3::ZERO, 1.);
        let ray = Ray::new(DVec3::new(0., 0., -5.), DVec3::Z);
        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 4.).abs() < 1e-12);
    }

    #[test]
    fn sphere_origin_inside_returns_far_root() {
        let sphere = Sphere::new(DVec3::new(1., 2., 3.), 2.5);
        for direction in [DVec3::X, -DVec3::Y, unit_vector(DVec3::new(1., 1., -1.))] {
            let ray = Ray::new(sphere.center, direction);
            let t = sphere.intersect(&ray).unwrap();
            assert!((t - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let sphere = Sphere::new(DVec3::new(0., 0., -5.), 1.);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn sphere_disjoint_line_is_missed() {
        let sphere = Sphere::new(DVec3::new(0., 3., 5.), 1.);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn sphere_tangent_ray_is_missed() {
        let sphere = Sphere::new(DVec3::new(0., 1., 5.), 1.);
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn sphere_normal_points_outward() {
        let sphere = Sphere::new(DVec3::new(1., 0., 0.), 2.);
        let n = sphere.normal_at(DVec3::new(1., 2., 0.));
        assert!(n.abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn plane_hit_distance() {
        let plane = Plane::new(DVec3::new(0., -0.5, 0.), DVec3::Y);
        let ray = Ray::new(DVec3::new(0., 1.5, 0.), -DVec3::Y);
        assert!((plane.intersect(&ray).unwrap() - 2.).abs() < 1e-12);
    }

    #[test]
    fn plane_parallel_ray_is_missed() {
        let mut rng = Xoshiro128PlusPlus::seed_from_u64(11);
        for _ in 0..200 {
            let normal = unit_vector(DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(0.1..1.0),
            ));
            let plane = Plane::new(DVec3::new(0., 0., 3.), normal);
            // any vector orthogonal to the normal
            let direction = unit_vector(cross(normal, DVec3::new(0.3, -0.7, 0.2)));
            let ray = Ray::new(DVec3::new(rng.gen_range(-5.0..5.0), 0., 0.), direction);
            assert_eq!(plane.intersect(&ray), None);
        }
    }

    #[test]
    fn plane_behind_origin_is_missed() {
        let plane = Plane::new(DVec3::new(0., -1., 0.), DVec3::Y);
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert_eq!(plane.intersect(&ray), None);
    }

    #[test]
    fn plane_new_normalizes() {
        let plane = Plane::new(DVec3::ZERO, DVec3::new(0., 4., 0.));
        assert!(plane.normal_at(DVec3::ONE).abs_diff_eq(DVec3::Y, 1e-12));
    }

    fn unit_triangle() -> Triangle {
        Triangle::new(
            DVec3::new(-0.1, 0., 0.),
            DVec3::new(0., 0.25, 0.),
            DVec3::new(0.1, 0., 0.),
        )
    }

    #[test]
    fn triangle_hit_through_interior() {
        let triangle = unit_triangle();
        let ray = Ray::new(DVec3::new(0., 0.05, -1.), DVec3::Z);
        assert!((triangle.intersect(&ray).unwrap() - 1.).abs() < 1e-12);
    }

    #[test]
    fn triangle_miss_outside_edges() {
        let triangle = unit_triangle();
        let ray = Ray::new(DVec3::new(0.5, 0.05, -1.), DVec3::Z);
        assert_eq!(triangle.intersect(&ray), None);
        let ray = Ray::new(DVec3::new(0., -0.01, -1.), DVec3::Z);
        assert_eq!(triangle.intersect(&ray), None);
    }

    #[test]
    fn triangle_vertices_count_as_inside() {
        let triangle = unit_triangle();
        for v in triangle.vertices {
            assert!(triangle.contains(v));
        }
    }

    #[test]
    fn triangle_centroid_is_inside() {
        let mut rng = Xoshiro128PlusPlus::seed_from_u64(3);
        let mut point = || {
            DVec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            )
        };
        for _ in 0..500 {
            let triangle = Triangle::new(point(), point(), point());
            assert!(triangle.contains(triangle.centroid()));
        }
    }

    #[test]
    fn triangle_normal_follows_winding() {
        let triangle = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
        assert!(triangle.normal_at(DVec3::ZERO).abs_diff_eq(DVec3::Z, 1e-12));
        let flipped = Triangle::new(DVec3::ZERO, DVec3::Y, DVec3::X);
        assert!(flipped.normal_at(DVec3::ZERO).abs_diff_eq(-DVec3::Z, 1e-12));
    }

    #[test]
    fn checkerboard_alternates_every_half_unit() {
        let color = SurfaceColor::checkerboard(DVec3::ONE, DVec3::ZERO);
        assert_eq!(color.resolve(DVec3::new(0.1, 0., 0.1)), DVec3::ONE);
        assert_eq!(color.resolve(DVec3::new(0.6, 0., 0.1)), DVec3::ZERO);
        assert_eq!(color.resolve(DVec3::new(0.6, 0., 0.6)), DVec3::ONE);
        // floor, not truncation, across the origin
        assert_eq!(color.resolve(DVec3::new(-0.1, 0., 0.1)), DVec3::ZERO);
        assert_eq!(color.resolve(DVec3::new(-0.1, 0., -0.1)), DVec3::ONE);
    }

    #[test]
    fn constant_color_ignores_point() {
        let color = SurfaceColor::Constant(DVec3::new(0., 0., 1.));
        assert_eq!(color.resolve(DVec3::splat(42.)), DVec3::new(0., 0., 1.));
    }

    #[test]
    fn object_constructors_set_materials() {
        let plane = Object::plane(DVec3::ZERO, DVec3::Y);
        assert_eq!(plane.reflection, 0.25);
        assert_eq!(plane.diffuse_c, Some(0.75));
        assert_eq!(plane.specular_c, Some(0.5));

        let sphere = Object::sphere(DVec3::ZERO, 1., DVec3::X);
        assert_eq!(sphere.reflection, 0.5);
        assert_eq!(sphere.diffuse_c, None);
        assert_eq!(sphere.color_at(DVec3::ONE), DVec3::X);
    }
}
