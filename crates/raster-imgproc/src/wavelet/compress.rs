use rayon::prelude::*;

use raster_image::{clamp, Image, Pixel};

use super::{haar, threshold};
use crate::error::TransformError;

/// Side of the smallest power-of-two square that holds an image of the given size.
///
/// # Example
///
/// ```
/// use raster_imgproc::wavelet::padded_size;
///
/// assert_eq!(padded_size(3, 5), 8);
/// assert_eq!(padded_size(4, 4), 4);
/// assert_eq!(padded_size(1, 1), 1);
/// ```
pub fn padded_size(width: usize, height: usize) -> usize {
    width.max(height).next_power_of_two()
}

/// Number of Haar cycles a padded square of side `n` supports, `log2(n)`.
pub fn max_cycles(n: usize) -> u32 {
    n.trailing_zeros()
}

/// Number of Haar cycles to run for a compression percentage, `ceil(max * percentage / 100)`.
pub fn cycle_count(max_cycles: u32, percentage: f64) -> u32 {
    (max_cycles as f64 * percentage / 100.0).ceil() as u32
}

/// Compress an image with a lossy 2D Haar wavelet and return the reconstruction.
///
/// Higher percentages run more cycles and discard more coefficients. The result has the
/// size and alpha channel of `src`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `percentage` - The compression percentage, strictly inside (0, 100).
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameter`] if `percentage` is not inside (0, 100).
///
/// # Example
///
/// ```
/// use raster_image::{Image, Pixel};
/// use raster_imgproc::wavelet::compress;
///
/// let image = Image::from_size_val([4, 4].into(), Pixel::new(90, 30, 200)).unwrap();
///
/// let compressed = compress(&image, 30.0).unwrap();
/// assert_eq!(compressed, image);
///
/// assert!(compress(&image, 100.0).is_err());
/// ```
pub fn compress(src: &Image, percentage: f64) -> Result<Image, TransformError> {
    if !(percentage > 0.0 && percentage < 100.0) {
        return Err(TransformError::InvalidParameter(format!(
            "compression percentage {percentage} is outside (0, 100)"
        )));
    }

    let n = padded_size(src.width(), src.height());
    let cycles = cycle_count(max_cycles(n), percentage);

    let mut planes = pad_planes(src, n);
    planes
        .par_iter_mut()
        .for_each(|plane| haar::haar_forward(plane, n, cycles));

    let [r, g, b] = &planes;
    let thr = threshold::compute_threshold(&[r, g, b], percentage);
    log::debug!(
        "compress {}x{} padded to {n}: {cycles}/{} cycles, threshold {thr}",
        src.width(),
        src.height(),
        max_cycles(n)
    );

    planes.par_iter_mut().for_each(|plane| {
        threshold::apply_threshold(plane, thr);
        haar::haar_inverse(plane, n, cycles);
    });

    crop_planes(src, &planes, n)
}

/// Copy the color channels of `src` into three `n`×`n` planes, padding with black.
fn pad_planes(src: &Image, n: usize) -> [Vec<i32>; 3] {
    let mut planes = [vec![0i32; n * n], vec![0i32; n * n], vec![0i32; n * n]];
    for (row, pixels) in src.rows_iter().enumerate() {
        for (col, pixel) in pixels.iter().enumerate() {
            for (plane, value) in planes.iter_mut().zip(pixel.rgb()) {
                plane[row * n + col] = value as i32;
            }
        }
    }
    planes
}

/// Build an image of the size of `src` from the top-left corner of the planes.
fn crop_planes(src: &Image, planes: &[Vec<i32>; 3], n: usize) -> Result<Image, TransformError> {
    let [r, g, b] = planes;
    let alpha = src.as_slice();
    let cols = src.cols();
    Ok(Image::from_fn(src.size(), |row, col| {
        let i = row * n + col;
        Pixel::rgba(
            clamp(r[i]),
            clamp(g[i]),
            clamp(b[i]),
            alpha[row * cols + col].alpha(),
        )
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_image::ImageSize;

    fn mean_abs_error(a: &Image, b: &Image) -> f64 {
        let total: u32 = a
            .as_slice()
            .iter()
            .zip(b.as_slice())
            .flat_map(|(p, q)| p.rgb().into_iter().zip(q.rgb()))
            .map(|(x, y)| x.abs_diff(y) as u32)
            .sum();
        total as f64 / (a.size().area() * 3) as f64
    }

    #[test]
    fn cycle_budget() {
        assert_eq!(max_cycles(1), 0);
        assert_eq!(max_cycles(2), 1);
        assert_eq!(max_cycles(256), 8);
        assert_eq!(cycle_count(8, 1.0), 1);
        assert_eq!(cycle_count(8, 50.0), 4);
        assert_eq!(cycle_count(8, 99.0), 8);
        assert_eq!(cycle_count(3, 50.0), 2);
    }

    #[test]
    fn rejects_percentages_outside_open_range() -> Result<(), TransformError> {
        let src = Image::from_size_val([2, 2].into(), Pixel::default())?;
        for p in [0.0, 100.0, -5.0, 150.0, f64::NAN] {
            let res = compress(&src, p);
            assert!(res.is_err_and(|e| e.is_invalid_parameter()), "{p}");
        }
        Ok(())
    }

    #[test]
    fn worked_2x2_example() -> Result<(), TransformError> {
        let gray = |v| Pixel::new(v, v, v);
        let src = Image::from_rows(vec![vec![gray(10), gray(20)], vec![gray(30), gray(60)]])?;

        // every pair ascends, so the differences are negative and must survive as such
        let compressed = compress(&src, 10.0)?;
        assert_eq!(compressed, src);
        approx::assert_relative_eq!(mean_abs_error(&src, &compressed), 0.0);

        let compressed = compress(&src, 30.0)?;
        assert_eq!(
            compressed,
            Image::from_rows(vec![vec![gray(15), gray(15)], vec![gray(30), gray(60)]])?
        );
        approx::assert_relative_eq!(mean_abs_error(&src, &compressed), 2.5);

        let compressed = compress(&src, 90.0)?;
        assert!(compressed.as_slice().iter().all(|p| *p == gray(30)));
        approx::assert_relative_eq!(mean_abs_error(&src, &compressed), 15.0);
        Ok(())
    }

    #[test]
    fn keeps_size_and_alpha() -> Result<(), TransformError> {
        let size = ImageSize {
            width: 7,
            height: 3,
        };
        let src = Image::from_fn(size, |row, col| {
            Pixel::with_alpha((row * 30) as i32, (col * 20) as i32, 99, (row + col) as i32)
        })?;
        let compressed = compress(&src, 40.0)?;

        assert_eq!(compressed.size(), size);
        for (p, q) in src.as_slice().iter().zip(compressed.as_slice()) {
            assert_eq!(p.alpha(), q.alpha());
        }
        Ok(())
    }

    #[test]
    fn error_grows_with_percentage() -> Result<(), TransformError> {
        let src = Image::from_fn([16, 16].into(), |row, col| {
            Pixel::new(
                ((row * 37 + col * 11) % 256) as i32,
                ((row * col) % 256) as i32,
                (255 - row * 9 - col * 3) as i32,
            )
        })?;

        let mut last = 0.0;
        for p in [1.0, 5.0, 20.0, 45.0, 70.0, 95.0] {
            let err = mean_abs_error(&src, &compress(&src, p)?);
            assert!(err >= last, "error {err} at {p}% is below {last}");
            last = err;
        }
        Ok(())
    }
}
