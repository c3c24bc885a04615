use rgb::RGB8;

use crate::camera::Camera;
use crate::geometry::{FloatType, Ray, WorldVector};
use crate::renderer::frame::{Radiance, quantize};
use crate::renderer::jitter::JitterTable;
use crate::scene::Hittable;

/// Renders scanlines of one frame. Only reads the shared scene, camera and
/// jitter table, so any number of workers can run over disjoint rows.
pub(crate) struct Worker<'a, H> {
    world: &'a H,
    camera: &'a Camera,
    jitter: &'a JitterTable,
}

impl<'a, H: Hittable> Worker<'a, H> {
    pub fn new(world: &'a H, camera: &'a Camera, jitter: &'a JitterTable) -> Self {
        Worker {
            world,
            camera,
            jitter,
        }
    }

    /// Renders one full scanline: per pixel, sum `sample_count` jittered rays
    /// and quantize once. `row` must be as long as the image is wide.
    pub fn render_row(&self, y: u32, sample_count: u32, row: &mut [RGB8]) {
        debug_assert!(row.len() == self.camera.width() as usize);
        for (x, pixel) in row.iter_mut().enumerate() {
            let mut sum = Radiance::new(0.0, 0.0, 0.0);
            for sample in 0..sample_count {
                sum += self.render_sample(x as u32, y, sample);
            }
            *pixel = quantize(sum, sample_count);
        }
    }

    /// One jittered camera ray through pixel `(x, y)`.
    pub fn render_sample(&self, x: u32, y: u32, sample: u32) -> Radiance {
        let rr = self.jitter.offset(sample);
        let u = (x as FloatType + rr) / (self.camera.width() - 1) as FloatType;
        let v = (y as FloatType + rr) / (self.camera.height() - 1) as FloatType;
        let ray = self.camera.get_ray(u, v);
        ray_color(&ray, self.world)
    }
}

/// Radiance carried by one ray: normal-based shading on a hit, a vertical
/// white-to-sky-blue gradient on a miss. Independent of which acceleration
/// structure produced the hit.
pub(crate) fn ray_color<H: Hittable>(ray: &Ray, world: &H) -> Radiance {
    if let Some(record) = world.hit(ray, 0.0, FloatType::INFINITY) {
        let n = (record.normal + WorldVector::repeat(1.0)) * 0.5;
        return Radiance::new(n.x, n.y, n.z);
    }

    let unit_direction = ray.direction.normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    let white = Radiance::new(1.0, 1.0, 1.0);
    let sky_blue = Radiance::new(0.5, 0.7, 1.0);
    white * (1.0 - t) + sky_blue * t
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::WorldPoint;
    use crate::scene::HittableList;
    use crate::scene::primitives::Sphere;
    use assert2::assert;

    #[test]
    fn miss_blends_white_to_sky() {
        let world = HittableList::new();

        let up = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 1.0, 0.0));
        assert!(ray_color(&up, &world) == Radiance::new(0.5, 0.7, 1.0));

        let down = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, -1.0, 0.0));
        assert!(ray_color(&down, &world) == Radiance::new(1.0, 1.0, 1.0));

        let level = Ray::new(WorldPoint::origin(), WorldVector::new(1.0, 0.0, 0.0));
        let color = ray_color(&level, &world);
        assert!((color.r - 0.75).abs() < 1e-6);
        assert!((color.g - 0.85).abs() < 1e-6);
        assert!((color.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hit_shades_by_normal() {
        let mut world = HittableList::new();
        world.add(Sphere {
            center: WorldPoint::new(0.0, 0.0, -2.0),
            radius: 1.0,
        });

        // Head-on hit: normal is +Z, so the color is (0.5, 0.5, 1.0)
        let ray = Ray::new(WorldPoint::origin(), WorldVector::new(0.0, 0.0, -1.0));
        let color = ray_color(&ray, &world);
        assert!((color.r - 0.5).abs() < 1e-6);
        assert!((color.g - 0.5).abs() < 1e-6);
        assert!((color.b - 1.0).abs() < 1e-6);
    }
}
