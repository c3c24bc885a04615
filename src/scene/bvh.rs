use std::fmt;
use std::sync::Arc;

use log::debug;
use ordered_float::OrderedFloat;
use rand::Rng;
use thiserror::Error;

use crate::geometry::{Aabb, FloatType, HitRecord, Ray};
use crate::scene::{Hittable, HittableList, SharedHittable};

/// Node of a bounding volume hierarchy.
///
/// The tree is built bottom-up once and never rebalanced or mutated
/// afterwards.
pub struct BvhNode {
    left: BvhChild,
    right: BvhChild,
    bbox: Aabb,
}

/// Inner nodes own their subtrees, leaves share the scene's objects.
/// A single-object subrange aliases the same leaf from both children.
enum BvhChild {
    Leaf(SharedHittable),
    Inner(Box<BvhNode>),
}

impl BvhChild {
    fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        match self {
            BvhChild::Leaf(object) => object.hit(ray, t_min, t_max),
            BvhChild::Inner(node) => node.hit(ray, t_min, t_max),
        }
    }
}

impl fmt::Debug for BvhNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BvhNode")
            .field("bbox", &self.bbox)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl fmt::Debug for BvhChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The leaf object itself is opaque, its box is the useful part
            BvhChild::Leaf(object) => f.debug_tuple("Leaf").field(&object.bounding_box()).finish(),
            BvhChild::Inner(node) => node.fmt(f),
        }
    }
}

#[derive(Debug, Error)]
pub enum BvhBuildError {
    #[error("cannot build a BVH from an empty scene")]
    EmptyScene,

    #[error("object {index} has no bounding box")]
    MissingBoundingBox { index: usize },
}

impl BvhNode {
    /// Builds the hierarchy over all objects of `list`.
    ///
    /// Every object must be able to produce a bounding box; an object that
    /// cannot makes the whole construction fail. Continuing with a made-up
    /// box would silently break traversal pruning.
    pub fn build(list: &HittableList, rng: &mut impl Rng) -> Result<BvhNode, BvhBuildError> {
        if list.is_empty() {
            return Err(BvhBuildError::EmptyScene);
        }

        let mut objects = list
            .objects()
            .iter()
            .enumerate()
            .map(|(index, object)| {
                let bbox = object
                    .bounding_box()
                    .ok_or(BvhBuildError::MissingBoundingBox { index })?;
                Ok((Arc::clone(object), bbox))
            })
            .collect::<Result<Vec<_>, BvhBuildError>>()?;

        Ok(Self::build_range(&mut objects, rng).0)
    }

    /// Recursive midpoint split; returns the node together with its box so
    /// parent boxes are always computed bottom-up from actual child boxes.
    fn build_range(
        objects: &mut [(SharedHittable, Aabb)],
        rng: &mut impl Rng,
    ) -> (BvhNode, Aabb) {
        let axis = rng.random_range(0..3usize);
        debug!("splitting {} objects along axis {}", objects.len(), axis);

        let (left, left_box, right, right_box) = match objects {
            [] => unreachable!("build_range is never called with an empty range"),
            [(object, bbox)] => (
                BvhChild::Leaf(Arc::clone(object)),
                *bbox,
                // The duplicate only costs one extra intersection test
                BvhChild::Leaf(Arc::clone(object)),
                *bbox,
            ),
            [(a, a_box), (b, b_box)] => {
                if a_box.min[axis] <= b_box.min[axis] {
                    (
                        BvhChild::Leaf(Arc::clone(a)),
                        *a_box,
                        BvhChild::Leaf(Arc::clone(b)),
                        *b_box,
                    )
                } else {
                    (
                        BvhChild::Leaf(Arc::clone(b)),
                        *b_box,
                        BvhChild::Leaf(Arc::clone(a)),
                        *a_box,
                    )
                }
            }
            _ => {
                objects.sort_by_key(|(_, bbox)| OrderedFloat(bbox.min[axis]));
                let mid = objects.len() / 2;
                let (left_half, right_half) = objects.split_at_mut(mid);
                let (left, left_box) = Self::build_range(left_half, rng);
                let (right, right_box) = Self::build_range(right_half, rng);
                (
                    BvhChild::Inner(Box::new(left)),
                    left_box,
                    BvhChild::Inner(Box::new(right)),
                    right_box,
                )
            }
        };

        let bbox = Aabb::surrounding_box(&left_box, &right_box);
        (BvhNode { left, right, bbox }, bbox)
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, t_min: FloatType, t_max: FloatType) -> Option<HitRecord> {
        if !self.bbox.hit(ray, t_min, t_max) {
            return None;
        }

        let hit_left = self.left.hit(ray, t_min, t_max);
        // A closer hit may still be in the right subtree, so the right child is
        // always tested, only over an interval capped at the left hit.
        let narrowed_max = hit_left.map_or(t_max, |record| record.t);
        let hit_right = self.right.hit(ray, t_min, narrowed_max);

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}
