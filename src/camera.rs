use assert2::assert;
use bon::bon;
use nalgebra::Unit;

use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, WorldVector};

const VFOV_DEGREES: FloatType = 90.0;
const ASPECT_RATIO: FloatType = 16.0 / 9.0;
const WORLD_UP: WorldVector = WorldVector::new(0.0, 1.0, 0.0);

/// Pinhole camera with a fixed 90 degree vertical field of view and 16:9
/// aspect ratio. Computed once from its builder inputs, immutable afterwards.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    origin: WorldPoint,
    lower_left_corner: WorldPoint,
    horizontal: WorldVector,
    vertical: WorldVector,

    width: u32,
    height: u32,
}

#[bon]
impl Camera {
    #[builder]
    pub fn new(look_from: WorldPoint, look_at: WorldPoint, width: u32) -> Self {
        assert!(width > 1);

        // 16:9 in integer math so the height does not fall victim to float
        // truncation (1600/1.777... must be 900, not 899)
        let height = width * 9 / 16;

        let theta = VFOV_DEGREES.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = ASPECT_RATIO * viewport_height;

        let w = Unit::try_new(look_from - look_at, EPSILON)
            .expect("look_from and look_at must be distinct");
        let u = Unit::try_new(WORLD_UP.cross(&w), EPSILON)
            .expect("viewing direction must not be vertical");
        let v = w.cross(&u);

        let origin = look_from;
        let horizontal = u.into_inner() * viewport_width;
        let vertical = v * viewport_height;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - w.into_inner();

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            width,
            height,
        }
    }
}

impl Camera {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ray through viewport coordinates `s, t` in `[0, 1]`, measured from the
    /// lower left corner.
    pub fn get_ray(&self, s: FloatType, t: FloatType) -> Ray {
        let direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin;
        Ray::new(self.origin, direction)
    }
}
