use glam::DVec3;

/// Offset applied along the surface normal to secondary ray origins so they
/// don't immediately re-hit the surface they start on.
pub const SURFACE_EPSILON: f64 = 1e-4;

pub fn unit_vector(v: DVec3) -> DVec3 {
    return v / v.length();
}

pub fn cross(u: DVec3, v: DVec3) -> DVec3 {
    return DVec3 {
        x: u.y * v.z - u.z * v.y,
        y: u.z * v.x - u.x * v.z,
        z: u.x * v.y - u.y * v.x,
    };
}

pub fn distance(a: DVec3, b: DVec3) -> f64 {
    return (a - b).length();
}

/// Mirror `v` about the unit normal `n`.
///
/// A unit `v` stays unit length, so reflected rays need no renormalization.
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    return v - 2. * v.dot(n) * n;
}

/// Move `point` off the surface along `normal`.
pub fn offset_origin(point: DVec3, normal: DVec3) -> DVec3 {
    return point + normal * SURFACE_EPSILON;
}
