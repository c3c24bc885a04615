use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use anyhow::Context as _;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rgb::RGB8;

use crate::camera::Camera;
use crate::renderer::{
    RenderSettings, WorkerCount,
    cancel::CancelToken,
    frame::{Accumulator, Frame},
    jitter::JitterTable,
    worker::Worker,
};
use crate::scene::Hittable;

/// Renders a full frame with per-pixel sample accumulation in the inner loop.
///
/// Scanlines are handed out to worker threads through an atomic counter; each
/// worker renders whole rows into a private buffer and copies them into the
/// shared frame. Workers poll the cancellation token at row boundaries, so a
/// cancelled render returns the partial frame written so far. All workers are
/// joined before this returns.
pub fn render<H>(
    camera: &Camera,
    settings: &RenderSettings,
    world: &H,
    cancel: &CancelToken,
) -> anyhow::Result<Frame>
where
    H: Hittable + Sync,
{
    // A stale signal from before this call must not abort it
    cancel.drain();

    let sample_count = settings.sample_count.get();
    let jitter = JitterTable::generate(sample_count, &mut jitter_rng(settings));
    let frame = Mutex::new(Frame::new(camera.width(), camera.height()));
    let next_row = AtomicU32::new(0);

    thread::scope(|scope| -> anyhow::Result<()> {
        for (worker_id, core) in worker_cores(settings.workers).into_iter().enumerate() {
            let jitter = &jitter;
            let frame = &frame;
            let next_row = &next_row;

            thread::Builder::new()
                .name(format!("render{worker_id}"))
                .spawn_scoped(scope, move || {
                    if let Some(core) = core {
                        core_affinity::set_for_current(core);
                    }

                    let worker = Worker::new(world, camera, jitter);
                    let mut row_buffer = vec![RGB8::new(0, 0, 0); camera.width() as usize];

                    loop {
                        if cancel.is_cancelled() {
                            break;
                        }
                        let y = next_row.fetch_add(1, Ordering::AcqRel);
                        if y >= camera.height() {
                            break;
                        }

                        worker.render_row(y, sample_count, &mut row_buffer);
                        frame
                            .lock()
                            .expect("Poisoned lock!")
                            .set_row(y, &row_buffer);
                    }
                })
                .context("failed to spawn a render worker")?;
        }
        Ok(())
    })?;

    Ok(frame.into_inner().expect("Poisoned lock!"))
}

/// Renders with the sample loop on the outside: every pass adds one jittered
/// sample per pixel into a floating point accumulator, renormalizes by the
/// running pass count and hands a snapshot frame to `sink`.
///
/// The cancellation token is polled at pass boundaries; a cancelled render
/// returns the snapshot of the last completed pass.
pub fn render_progressive<H, F>(
    camera: &Camera,
    settings: &RenderSettings,
    world: &H,
    cancel: &CancelToken,
    mut sink: F,
) -> anyhow::Result<Frame>
where
    H: Hittable + Sync,
    F: FnMut(&Frame),
{
    cancel.drain();

    let sample_count = settings.sample_count.get();
    let jitter = JitterTable::generate(sample_count, &mut jitter_rng(settings));
    let worker = Worker::new(world, camera, &jitter);

    let mut accumulator = Accumulator::new(camera.width(), camera.height());
    let mut frame = Frame::new(camera.width(), camera.height());

    for pass in 0..sample_count {
        if cancel.is_cancelled() {
            break;
        }

        for y in 0..camera.height() {
            for x in 0..camera.width() {
                accumulator.add(x, y, worker.render_sample(x, y, pass));
            }
        }

        accumulator.snapshot(pass + 1, &mut frame);
        sink(&frame);
    }

    Ok(frame)
}

fn jitter_rng(settings: &RenderSettings) -> SmallRng {
    match settings.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn worker_cores(count: WorkerCount) -> Vec<Option<core_affinity::CoreId>> {
    match count {
        WorkerCount::Auto => match core_affinity::get_core_ids() {
            Some(cores) if !cores.is_empty() => cores.into_iter().map(Some).collect(),
            _ => vec![None; num_cpus::get().max(1)],
        },
        WorkerCount::Manual(n) => vec![None; n.get()],
    }
}
