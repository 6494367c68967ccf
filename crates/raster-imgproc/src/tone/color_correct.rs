use raster_image::Image;

use crate::{
    error::{ensure_same_size, TransformError},
    histogram::compute_histogram,
    parallel,
    split::SplitPercentage,
};

/// Peaks at or below this value are considered unreliable.
const LOW_CUTOFF: u8 = 10;

/// Peaks at or above this value are considered unreliable.
const HIGH_CUTOFF: u8 = 245;

/// Compute the per-channel offsets that align every channel peak on their average.
///
/// A peak in `[0, 10]` or `[245, 255]` is treated as zero and left out of the average
/// divisor. The average is truncated toward zero.
///
/// # Arguments
///
/// * `peaks` - The histogram peaks as `[red, green, blue]`.
///
/// # Returns
///
/// The offsets to add to `[red, green, blue]`.
///
/// # Example
///
/// ```
/// use raster_imgproc::tone::color_correct_offsets;
///
/// assert_eq!(color_correct_offsets([150, 220, 40]), [-14, -84, 96]);
/// assert_eq!(color_correct_offsets([100, 250, 50]), [-25, 75, 25]);
/// ```
pub fn color_correct_offsets(peaks: [u8; 3]) -> [i32; 3] {
    let mut divider = 3;
    let peaks = peaks.map(|peak| {
        if peak <= LOW_CUTOFF || peak >= HIGH_CUTOFF {
            divider -= 1;
            0
        } else {
            peak as i32
        }
    });
    let divider = divider.max(1);

    let avg = peaks.iter().sum::<i32>() / divider;
    peaks.map(|peak| avg - peak)
}

/// Color correct an image by shifting each channel so that its histogram peak lands on
/// the average peak.
///
/// Alpha is kept.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `split` - The part of the image to correct.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn color_correct(
    src: &Image,
    dst: &mut Image,
    split: SplitPercentage,
) -> Result<(), TransformError> {
    ensure_same_size(src, dst)?;

    let peaks = compute_histogram(src).peaks();
    let [dr, dg, db] = color_correct_offsets(peaks);
    log::debug!("color correct peaks {peaks:?}, offsets [{dr}, {dg}, {db}]");

    let width = src.width();
    parallel::par_map_pixels(src, dst, |_, col, pixel| {
        if split.applies_to(col, width) {
            pixel.offset(dr, dg, db)
        } else {
            *pixel
        }
    });

    Ok(())
}
