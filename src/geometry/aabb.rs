use crate::geometry::{FloatType, Ray, WorldPoint};

/// Axis-aligned bounding box.
///
/// For a real box `min <= max` holds componentwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: WorldPoint,
    pub max: WorldPoint,
}

impl Aabb {
    pub fn new(min: WorldPoint, max: WorldPoint) -> Aabb {
        Aabb { min, max }
    }

    /// Smallest box containing both `a` and `b`.
    pub fn surrounding_box(a: &Aabb, b: &Aabb) -> Aabb {
        Aabb {
            min: a.min.coords.inf(&b.min.coords).into(),
            max: a.max.coords.sup(&b.max.coords).into(),
        }
    }

    /// Slab test: narrows `[t_min, t_max]` by the entry/exit interval of each
    /// axis and rejects as soon as the interval becomes empty.
    ///
    /// A zero direction component turns the corresponding numerator into
    /// +-infinity based on its sign, so a ray starting outside the slab gets an
    /// empty interval instead of a NaN from 0/0.
    pub fn hit(&self, ray: &Ray, mut t_min: FloatType, mut t_max: FloatType) -> bool {
        for axis in 0..3 {
            let dir = ray.direction[axis];
            let to_min = self.min[axis] - ray.origin[axis];
            let to_max = self.max[axis] - ray.origin[axis];

            let (mut t0, mut t1) = if dir == 0.0 {
                let signed_inf =
                    |x: FloatType| if x < 0.0 { FloatType::NEG_INFINITY } else { FloatType::INFINITY };
                (signed_inf(to_min), signed_inf(to_max))
            } else {
                let inv_dir = 1.0 / dir;
                (to_min * inv_dir, to_max * inv_dir)
            };
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max <= t_min {
                return false;
            }
        }
        true
    }
}

impl Default for Aabb {
    /// Placeholder box with a tiny but non-degenerate extent, usable as a safe
    /// default before any real geometry bound is known.
    fn default() -> Aabb {
        Aabb::new(
            WorldPoint::new(-1.0, -1.0, -1e-4),
            WorldPoint::new(1.0, 1.0, 1e-4),
        )
    }
}
