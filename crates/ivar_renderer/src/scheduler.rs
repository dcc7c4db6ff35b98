//! Parallel row-stripe rendering.
//!
//! Image rows are dealt out round-robin from the top: worker `i` of `N`
//! owns rows `H-1-i, H-1-i-N, ...`. Each worker gets its rows as disjoint
//! mutable slices of the framebuffer plus its own seeded generator, so the
//! render needs no locks and repeats exactly for a given seed and worker count.

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use thiserror::Error;

use crate::framebuffer::{Framebuffer, ImageError, BYTES_PER_PIXEL};
use crate::renderer::{color_to_rgb, render_pixel, RenderConfig};
use crate::{Camera, Scene};

/// Errors that stop a render before any pixel is traced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be nonzero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    NoSamples,

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error(transparent)]
    Framebuffer(#[from] ImageError),

    #[error("Failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// One stripe: `(image row counted from the bottom, that row's RGB bytes)`.
type Stripe<'a> = Vec<(u32, &'a mut [u8])>;

/// Hardware parallelism minus headroom for the coordinating thread, at least 1.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(2)
        .max(1)
}

/// Seed for worker `worker`'s generator.
#[inline]
pub fn worker_seed(seed: u64, worker: usize) -> u64 {
    seed ^ worker as u64
}

/// Rows owned by `worker` out of `workers`, counted from the bottom of the image.
pub fn stripe_rows(height: u32, workers: usize, worker: usize) -> impl Iterator<Item = u32> {
    debug_assert!(workers > 0, "stripe_rows needs at least one worker");
    (0..height).rev().skip(worker).step_by(workers.max(1))
}

/// Render the scene into an 8-bit, gamma-corrected framebuffer.
///
/// Blocks until every stripe is finished. A panicking worker propagates its
/// panic to the caller.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Result<Framebuffer, RenderError> {
    let (width, height) = (config.width, config.height);
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    if config.samples_per_pixel == 0 {
        return Err(RenderError::NoSamples);
    }
    let requested = config.workers.unwrap_or_else(default_worker_count);
    if requested == 0 {
        return Err(RenderError::NoWorkers);
    }
    // Workers beyond the row count would own nothing
    let workers = requested.min(height as usize);

    if (camera.aspect_ratio() - config.aspect_ratio()).abs() > 1e-3 {
        warn!(
            "Camera aspect ratio {:.4} differs from image aspect ratio {:.4}; image will be stretched",
            camera.aspect_ratio(),
            config.aspect_ratio()
        );
    }

    let mut framebuffer = Framebuffer::new(width, height)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("ivar-worker-{i}"))
        .build()?;

    info!(
        "Rendering {}x{} @ {} spp, depth {}, {} primitives, {} workers",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        scene.len(),
        workers
    );
    let start = Instant::now();

    let stripes = split_stripes(&mut framebuffer, workers);
    pool.install(|| {
        stripes
            .into_par_iter()
            .enumerate()
            .for_each(|(worker, stripe)| render_stripe(camera, scene, config, worker, stripe));
    });

    info!("Rendered in {:.2?}", start.elapsed());
    Ok(framebuffer)
}

/// Hand each worker the framebuffer rows of its stripe.
fn split_stripes(framebuffer: &mut Framebuffer, workers: usize) -> Vec<Stripe<'_>> {
    let height = framebuffer.height();
    // Framebuffer row 0 is the top, i.e. image row height - 1
    let mut rows: Vec<Option<&mut [u8]>> = framebuffer.rows_mut().map(Some).collect();

    (0..workers)
        .map(|worker| {
            stripe_rows(height, workers, worker)
                .filter_map(|row| {
                    let top_down = (height - 1 - row) as usize;
                    rows[top_down].take().map(|pixels| (row, pixels))
                })
                .collect()
        })
        .collect()
}

fn render_stripe(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    worker: usize,
    stripe: Stripe<'_>,
) {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(worker_seed(config.seed, worker));
    let row_count = stripe.len();

    for (row, pixels) in stripe {
        for (col, pixel) in pixels.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let color = render_pixel(camera, scene, col as u32, row, config, &mut rng);
            pixel.copy_from_slice(&color_to_rgb(color));
        }
    }

    debug!(
        "Worker {} finished {} rows in {:.2?}",
        worker,
        row_count,
        start.elapsed()
    );
}
