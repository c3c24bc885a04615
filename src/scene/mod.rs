pub mod bvh;
pub mod primitives;

use std::sync::Arc;

use crate::geometry::{Aabb, FloatType, HitRecord, Ray};

/// Object a ray can be tested against.
pub trait Hittable {
    /// Closest intersection with `ray` whose parameter lies in `(t_min, t_max)`,
    /// or `None`.
    fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord>;

    /// Bounding box of the object, or `None` if the object cannot currently
    /// produce one. Callers must treat `None` as "no valid spatial bound" and
    /// must not substitute a synthetic box.
    fn bounding_box(&self) -> Option<Aabb>;
}

/// Shared ownership of scene objects; a one-object BVH span aliases the same
/// leaf from both children.
pub type SharedHittable = Arc<dyn Hittable + Send + Sync>;

/// Flat, ordered scene container.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<SharedHittable>,
}

impl HittableList {
    pub fn new() -> HittableList {
        HittableList::default()
    }

    pub fn add(&mut self, object: impl Hittable + Send + Sync + 'static) {
        self.objects.push(Arc::new(object));
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SharedHittable] {
        &self.objects
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = t_max;

        for (object_id, object) in self.objects.iter().enumerate() {
            if let Some(mut record) = object.hit(ray, t_min, closest_so_far) {
                closest_so_far = record.t;
                record.object_id = Some(object_id);
                closest = Some(record);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let mut objects = self.objects.iter();
        let mut output_box = objects.next()?.bounding_box()?;
        for object in objects {
            output_box = Aabb::surrounding_box(&output_box, &object.bounding_box()?);
        }
        Some(output_box)
    }
}
