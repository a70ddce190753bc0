use glam::DVec3;
use crate::vector::{offset_origin, reflect, unit_vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit length. Use [`Ray::towards`] when starting from an arbitrary vector.
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        return Self { origin, direction };
    }

    /// Ray from `origin` through `target`.
    pub fn towards(origin: DVec3, target: DVec3) -> Self {
        return Self {
            origin,
            direction: unit_vector(target - origin),
        };
    }

    pub fn at(&self, t: f64) -> DVec3 {
        return self.origin + t * self.direction;
    }

    /// The mirror bounce of this ray off a surface at `point` with unit `normal`.
    pub fn reflected(&self, point: DVec3, normal: DVec3) -> Ray {
        return Ray {
            origin: offset_origin(point, normal),
            direction: reflect(self.direction, normal),
        };
    }
}
