use crate::geometry::{Aabb, FloatType, HitRecord, Ray, WorldPoint, WorldVector};

use super::Hittable;

#[derive(Copy, Clone, Debug)]
pub struct Sphere {
    pub center: WorldPoint,
    pub radius: FloatType,
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let half_b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Nearest root within the interval, falling back to the far one
        let sqrt_disc = discriminant.sqrt();
        let mut root = (-half_b - sqrt_disc) / a;
        if root < t_min || t_max < root {
            root = (-half_b + sqrt_disc) / a;
            if root < t_min || t_max < root {
                return None;
            }
        }

        let point = ray.point_at(root);
        let outward_normal = (point - self.center) / self.radius;
        Some(HitRecord::with_outward_normal(ray, root, point, outward_normal))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let r_vec = WorldVector::repeat(self.radius);
        Some(Aabb::new(self.center - r_vec, self.center + r_vec))
    }
}

/// Incomplete primitive: intersects the side surface of a cylinder around a
/// fixed vertical axis. There are no end caps, so rays entering through the
/// open top or bottom pass right through.
//
// TODO: add end caps, then derive the bounding box from radius and height so
// the cylinder can participate in BVH construction.
#[derive(Copy, Clone, Debug)]
pub struct Cylinder {
    pub center: WorldPoint,
    pub radius: FloatType,
    pub height: FloatType,
}

const CYLINDER_AXIS: WorldVector = WorldVector::new(0.0, 1.0, 0.0);

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        // Distance of ray points to the axis line, as a quadratic in t:
        // |(origin - center + t*dir) x axis|^2 = radius^2
        let cross_dir = ray.direction.cross(&CYLINDER_AXIS);
        let co = ray.origin - self.center;
        let cross_co = co.cross(&CYLINDER_AXIS);

        let a = cross_dir.dot(&cross_dir);
        if a == 0.0 {
            // Ray parallel to the axis, can only hit the missing caps
            return None;
        }
        let half_b = cross_dir.dot(&cross_co);
        let c = cross_co.dot(&cross_co) - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let mut root = (-half_b - sqrt_disc) / a;
        if root < t_min || t_max < root {
            root = (-half_b + sqrt_disc) / a;
            if root < t_min || t_max < root {
                return None;
            }
        }

        // Side surface only: the accepted root must lie in the height band
        let point = ray.point_at(root);
        let half_height = self.height / 2.0;
        if point.y <= self.center.y - half_height || point.y > self.center.y + half_height {
            return None;
        }

        let mut outward_normal = (point - self.center) / self.radius;
        outward_normal.y = 0.0;
        Some(HitRecord::with_outward_normal(ray, root, point, outward_normal))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        // Not implemented yet, see the TODO above
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert2::assert;

    #[test]
    fn direct_hit_through_center() {
        let sphere = Sphere {
            center: WorldPoint::new(1.0, 2.0, 3.0),
            radius: 1.0,
        };
        let ray = Ray::new(WorldPoint::new(1.0, 2.0, 0.0), WorldVector::new(0.0, 0.0, 1.0));

        let h = sphere
            .hit(&ray, 0.0, FloatType::INFINITY)
            .expect("We should have a hit!");
        assert!((h.t - 2.0).abs() < 1e-6);
        assert!(h.front_face);
        assert!((h.normal - WorldVector::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn grazing_hit() {
        let sphere = Sphere {
            center: WorldPoint::new(1.0, 2.0, 3.0),
            radius: 1.0,
        };
        let ray = Ray::new(WorldPoint::new(2.0, 2.0, 0.0), WorldVector::new(0.0, 0.0, 1.0));

        let h = sphere
            .hit(&ray, 0.0, FloatType::INFINITY)
            .expect("We should have a hit!");
        assert!((h.t - 3.0).abs() < 1e-3);
    }

    #[test]
    fn narrow_miss() {
        let sphere = Sphere {
            center: WorldPoint::new(1.0, 2.0, 3.0),
            radius: 1.0,
        };
        let ray = Ray::new(WorldPoint::new(2.01, 2.0, 0.0), WorldVector::new(0.0, 0.0, 1.0));
        assert!(sphere.hit(&ray, 0.0, FloatType::INFINITY).is_none());
    }

    #[test]
    fn far_root_from_inside_is_back_face() {
        let sphere = Sphere {
            center: WorldPoint::new(0.0, 0.0, 0.0),
            radius: 1.0,
        };
        let ray = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 0.0, -1.0));

        let h = sphere
            .hit(&ray, 0.0, FloatType::INFINITY)
            .expect("We should have a hit!");
        assert!((h.t - 1.0).abs() < 1e-6);
        assert!(!h.front_face);
        // Normal still opposes the ray
        assert!(h.normal.dot(&ray.direction) < 0.0);
    }

    #[test]
    fn interval_excludes_near_root() {
        let sphere = Sphere {
            center: WorldPoint::new(0.0, 0.0, -3.0),
            radius: 1.0,
        };
        let ray = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 0.0, -1.0));

        // Near root at t=2, far root at t=4
        let h = sphere.hit(&ray, 3.0, FloatType::INFINITY).unwrap();
        assert!((h.t - 4.0).abs() < 1e-6);
        assert!(sphere.hit(&ray, 5.0, FloatType::INFINITY).is_none());
    }

    #[test]
    fn sphere_bounding_box() {
        let sphere = Sphere {
            center: WorldPoint::new(0.0, 0.0, -1.0),
            radius: 0.5,
        };
        let bbox = sphere.bounding_box().unwrap();
        assert!(bbox.min == WorldPoint::new(-0.5, -0.5, -1.5));
        assert!(bbox.max == WorldPoint::new(0.5, 0.5, -0.5));
    }

    fn unit_cylinder() -> Cylinder {
        Cylinder {
            center: WorldPoint::new(0.0, 0.0, -2.0),
            radius: 0.5,
            height: 1.0,
        }
    }

    #[test]
    fn cylinder_side_hit() {
        let cylinder = unit_cylinder();
        let ray = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 0.0, -1.0));

        let h = cylinder
            .hit(&ray, 0.0, FloatType::INFINITY)
            .expect("We should have a hit!");
        assert!((h.t - 1.5).abs() < 1e-6);
        assert!(h.front_face);
        assert!((h.normal - WorldVector::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn cylinder_miss_above_height_band() {
        let cylinder = unit_cylinder();
        let ray = Ray::new(
            WorldPoint::new(0.0, 0.8, 0.0),
            WorldVector::new(0.0, 0.0, -1.0),
        );
        assert!(cylinder.hit(&ray, 0.0, FloatType::INFINITY).is_none());
    }

    #[test]
    fn cylinder_ignores_ray_along_axis() {
        // Would enter through the missing cap
        let cylinder = unit_cylinder();
        let ray = Ray::new(
            WorldPoint::new(0.0, 5.0, -2.0),
            WorldVector::new(0.0, -1.0, 0.0),
        );
        assert!(cylinder.hit(&ray, 0.0, FloatType::INFINITY).is_none());
    }

    #[test]
    fn cylinder_has_no_bounding_box() {
        assert!(unit_cylinder().bounding_box().is_none());
    }
}
