mod aabb;

pub use aabb::Aabb;

pub type FloatType = f32;

pub const EPSILON: FloatType = 1e-8;

pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Direction of the ray, not necessarily normalized.
    /// The intersection code divides by `direction.dot(&direction)` where it matters.
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray { origin, direction }
    }

    pub fn point_at(&self, t: FloatType) -> WorldPoint {
        self.origin + self.direction * t
    }
}

/// Result of a successful ray-object intersection.
///
/// A fresh record is produced per query and returned by value, so no state can
/// leak between unrelated rays.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub point: WorldPoint,
    /// Always oriented against the incoming ray direction.
    pub normal: WorldVector,
    pub t: FloatType,
    pub front_face: bool,
    /// Index of the list member that produced the hit, if the query went
    /// through a `HittableList`.
    pub object_id: Option<usize>,
}

impl HitRecord {
    /// Builds a record from the geometric outward normal, flipping it so that
    /// it opposes the ray and classifying the face accordingly.
    pub fn with_outward_normal(
        ray: &Ray,
        t: FloatType,
        point: WorldPoint,
        outward_normal: WorldVector,
    ) -> HitRecord {
        let front_face = ray.direction.dot(&outward_normal) < 0.0;
        HitRecord {
            point,
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            t,
            front_face,
            object_id: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert2::assert;

    #[test]
    fn point_at_scales_direction() {
        let r = Ray::new(WorldPoint::new(1.0, 2.0, 3.0), WorldVector::new(0.0, 0.0, 2.0));
        assert!(r.point_at(0.0) == WorldPoint::new(1.0, 2.0, 3.0));
        assert!(r.point_at(1.5) == WorldPoint::new(1.0, 2.0, 6.0));
        assert!(r.point_at(-1.0) == WorldPoint::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn front_face_keeps_opposing_normal() {
        let r = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 0.0, -1.0));
        let rec = HitRecord::with_outward_normal(
            &r,
            1.0,
            WorldPoint::new(0.0, 0.0, -1.0),
            WorldVector::new(0.0, 0.0, 1.0),
        );
        assert!(rec.front_face);
        assert!(rec.normal == WorldVector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn back_face_flips_normal() {
        // Ray leaving a sphere from the inside: outward normal points along the ray
        let r = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 0.0, -1.0));
        let rec = HitRecord::with_outward_normal(
            &r,
            1.0,
            WorldPoint::new(0.0, 0.0, -1.0),
            WorldVector::new(0.0, 0.0, -1.0),
        );
        assert!(!rec.front_face);
        assert!(rec.normal == WorldVector::new(0.0, 0.0, 1.0));
    }
}
