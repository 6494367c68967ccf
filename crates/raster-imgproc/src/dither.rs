use raster_image::{clamp, Image, Pixel};

use crate::{
    error::{ensure_same_size, TransformError},
    parallel,
    split::SplitPercentage,
};

/// Blue values below this become black, the rest white.
const THRESHOLD: i32 = 128;

/// Error diffusion weights as `(dx, dy, weight)`, out of 16.
const DIFFUSION: [(isize, usize, i32); 4] = [(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)];

/// Dither an image to black and white with error diffusion.
///
/// The blue channel stands in for luminance. Pixels are visited in row-major order; each
/// becomes black or white, and the quantization error is pushed into the neighbors not yet
/// visited. A neighbor receiving error is turned gray at its new blue value.
///
/// Dithered pixels keep the alpha of their source pixel; they are not made opaque.
///
/// The diffusion runs on a private copy, so `src` is never modified.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `split` - The part of the image to dither.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn dither(src: &Image, dst: &mut Image, split: SplitPercentage) -> Result<(), TransformError> {
    ensure_same_size(src, dst)?;

    let (rows, cols) = (src.rows(), src.cols());
    let mut work: Vec<i32> = src.as_slice().iter().map(|p| p.blue() as i32).collect();
    let mut levels = vec![0u8; work.len()];

    for y in 0..rows {
        for x in 0..cols {
            let old = work[y * cols + x];
            let new = if old < THRESHOLD { 0 } else { 255 };
            levels[y * cols + x] = new as u8;

            let error = old - new;
            for (dx, dy, weight) in DIFFUSION {
                let (Some(nx), ny) = (x.checked_add_signed(dx), y + dy) else {
                    continue;
                };
                if nx >= cols || ny >= rows {
                    continue;
                }
                let idx = ny * cols + nx;
                work[idx] = clamp(work[idx] + error * weight / 16) as i32;
            }
        }
    }

    let width = src.width();
    parallel::par_map_pixels(src, dst, |row, col, pixel| {
        if split.applies_to(col, width) {
            let v = levels[row * cols + col];
            Pixel::rgba(v, v, v, pixel.alpha())
        } else {
            *pixel
        }
    });

    Ok(())
}
