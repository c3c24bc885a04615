mod cancel;
mod frame;
mod jitter;
mod machinery;
mod worker;

pub use cancel::CancelToken;
pub use frame::Frame;
pub use machinery::{render, render_progressive};

use std::num::{NonZeroU32, NonZeroUsize};

#[derive(Copy, Clone, Debug)]
pub enum WorkerCount {
    /// One worker per available core, pinned.
    Auto,
    /// Fixed number of unpinned workers.
    Manual(NonZeroUsize),
}

#[derive(Copy, Clone, Debug)]
pub struct RenderSettings {
    pub sample_count: NonZeroU32,
    pub workers: WorkerCount,
    /// Seed for the per-sample jitter table. `None` seeds from the OS; a fixed
    /// seed makes the whole render deterministic.
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            sample_count: NonZeroU32::new(16).unwrap(),
            workers: WorkerCount::Auto,
            seed: None,
        }
    }
}
