mod camera;
pub mod geometry;
mod renderer;
pub mod scene;

pub use camera::Camera;
pub use renderer::{
    CancelToken, Frame, RenderSettings, WorkerCount, render, render_progressive,
};
pub use scene::{Hittable, HittableList, bvh::BvhNode};
