use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use raster_image::{Image, Pixel};

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls which thread pool runs the row-parallel loops of the transformations.
///
/// Every strategy produces identical pixels; only the scheduling differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool and process rows in parallel.
    #[default]
    ParallelRows,

    /// Run on a single thread.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Run `op` under this strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if a local thread pool is requested with zero threads or
    /// cannot be built.
    pub fn install<R, F>(self, op: F) -> Result<R, ParallelError>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        let threads = match self {
            ExecutionStrategy::ParallelRows => return Ok(op()),
            ExecutionStrategy::Serial => 1,
            ExecutionStrategy::Fixed(0) => return Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => n,
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ParallelError::BuildError(e.to_string()))?;

        Ok(pool.install(op))
    }
}

/// Apply `f(row, col, src_pixel)` to each pixel and write the result into `dst`,
/// processing rows in parallel.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_map_pixels(
    src: &Image,
    dst: &mut Image,
    f: impl Fn(usize, usize, &Pixel) -> Pixel + Send + Sync,
) {
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(row, (src_row, dst_row))| {
            src_row
                .iter()
                .zip(dst_row.iter_mut())
                .enumerate()
                .for_each(|(col, (src_pixel, dst_pixel))| {
                    *dst_pixel = f(row, col, src_pixel);
                });
        });
}

/// Fill every pixel of `dst` with `f(row, col)`, processing rows in parallel.
///
/// Used by neighborhood operations that read the source image as a whole.
pub fn par_fill_pixels(dst: &mut Image, f: impl Fn(usize, usize) -> Pixel + Send + Sync) {
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(row, dst_row)| {
            dst_row
                .iter_mut()
                .enumerate()
                .for_each(|(col, dst_pixel)| {
                    *dst_pixel = f(row, col);
                });
        });
}

/// Apply `f` to each triple of pixels from three same-sized images in parallel.
///
/// PRECONDITION: all images must have the same size.
pub fn par_iter_rows_three(
    src1: &Image,
    src2: &Image,
    src3: &Image,
    dst: &mut Image,
    f: impl Fn(&Pixel, &Pixel, &Pixel) -> Pixel + Send + Sync,
) {
    let cols = src1.cols();
    src1.as_slice()
        .par_chunks_exact(cols)
        .zip(src2.as_slice().par_chunks_exact(cols))
        .zip(src3.as_slice().par_chunks_exact(cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|(((row1, row2), row3), dst_row)| {
            for (((p1, p2), p3), d) in row1.iter().zip(row2).zip(row3).zip(dst_row.iter_mut()) {
                *d = f(p1, p2, p3);
            }
        });
}
