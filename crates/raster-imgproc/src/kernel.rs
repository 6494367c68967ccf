use raster_image::{clamp, Image, Pixel};

use crate::{
    error::{ensure_same_size, TransformError},
    parallel,
    split::SplitPercentage,
};

/// A 3×3 matrix applied to the `[red, green, blue]` vector of a single pixel.
///
/// Row `i` produces output channel `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Apply the matrix to one pixel. Alpha is kept.
    ///
    /// Each product is truncated toward zero before summing; the sum is then clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use raster_image::Pixel;
    /// use raster_imgproc::kernel::ColorMatrix;
    ///
    /// let swap = ColorMatrix([[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
    /// assert_eq!(swap.apply(&Pixel::new(1, 2, 3)).rgb(), [3, 2, 1]);
    /// ```
    pub fn apply(&self, pixel: &Pixel) -> Pixel {
        let channels = pixel.rgb();
        let [r, g, b] = self.0.map(|row| {
            row.iter()
                .zip(channels)
                .map(|(&coef, value)| (coef * value as f64) as i32)
                .sum::<i32>()
        });
        Pixel::with_alpha(r, g, b, pixel.alpha() as i32)
    }
}

/// An odd-sized square convolution kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    coefficients: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidParameter`] if the kernel is not square or its size
    /// is not odd.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, TransformError> {
        let size = rows.len();
        if size % 2 == 0 {
            return Err(TransformError::InvalidParameter(format!(
                "kernel size must be odd, got {size}"
            )));
        }

        let mut coefficients = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return Err(TransformError::InvalidParameter(format!(
                    "kernel must be square, got a row of {} for size {size}",
                    row.len()
                )));
            }
            coefficients.extend_from_slice(row);
        }

        Ok(Self { size, coefficients })
    }

    /// The side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The coefficient at row `s`, column `t`.
    pub fn get(&self, s: usize, t: usize) -> f64 {
        self.coefficients[s * self.size + t]
    }

    /// Convolve the neighborhood of `[row, col]`.
    ///
    /// Neighbors outside the image are left out of the sum. Alpha comes from the center
    /// pixel.
    pub fn apply_at(&self, src: &Image, row: usize, col: usize) -> Pixel {
        let c = (self.size - 1) / 2;
        let (rows, cols) = (src.rows(), src.cols());
        let pixels = src.as_slice();

        let mut sum = [0i32; 3];
        for s in 0..self.size {
            let Some(r) = (row + s).checked_sub(c).filter(|&r| r < rows) else {
                continue;
            };
            for t in 0..self.size {
                let Some(q) = (col + t).checked_sub(c).filter(|&q| q < cols) else {
                    continue;
                };
                let coef = self.get(s, t);
                let neighbor = pixels[r * cols + q].rgb();
                for (acc, value) in sum.iter_mut().zip(neighbor) {
                    *acc += (coef * value as f64) as i32;
                }
            }
        }

        let alpha = pixels[row * cols + col].alpha();
        Pixel::rgba(clamp(sum[0]), clamp(sum[1]), clamp(sum[2]), alpha)
    }
}

/// Which coefficient matrix [`apply_transform`] runs and how.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformMode {
    /// Per-pixel color matrix.
    ColorMatrix(ColorMatrix),
    /// Neighborhood convolution.
    SpatialKernel(Kernel),
}

/// Apply a color matrix or a spatial kernel to an image.
///
/// Columns outside the split boundary are copied from the source verbatim.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image, the same size as the source.
/// * `mode` - The matrix and how to apply it.
/// * `split` - The part of the image to transform.
///
/// # Errors
///
/// Returns [`TransformError::InvalidImageSize`] if `src` and `dst` differ in size.
pub fn apply_transform(
    src: &Image,
    dst: &mut Image,
    mode: &TransformMode,
    split: SplitPercentage,
) -> Result<(), TransformError> {
    ensure_same_size(src, dst)?;

    let width = src.width();
    match mode {
        TransformMode::ColorMatrix(matrix) => {
            parallel::par_map_pixels(src, dst, |_, col, pixel| {
                if split.applies_to(col, width) {
                    matrix.apply(pixel)
                } else {
                    *pixel
                }
            });
        }
        TransformMode::SpatialKernel(kernel) => {
            let pixels = src.as_slice();
            parallel::par_fill_pixels(dst, |row, col| {
                if split.applies_to(col, width) {
                    kernel.apply_at(src, row, col)
                } else {
                    pixels[row * width + col]
                }
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_image::ImageSize;

    #[test]
    fn color_matrix_truncates_each_term() {
        let matrix = ColorMatrix([[0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]]);
        // 0.5*3 + 0.5*3 + 0.5*3 truncates to 1 + 1 + 1
        let out = matrix.apply(&Pixel::with_alpha(3, 3, 3, 40));
        assert_eq!(out.to_rgba(), [3, 3, 0, 40]);
    }

    #[test]
    fn kernel_rejects_bad_shapes() {
        assert!(Kernel::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).is_err());
        assert!(Kernel::from_rows(&[vec![1.0, 2.0, 3.0], vec![1.0], vec![1.0, 2.0, 3.0]]).is_err());
        assert!(Kernel::from_rows::<[f64; 0]>(&[]).is_err());
    }

    #[test]
    fn identity_kernel_is_identity() -> Result<(), TransformError> {
        let src = Image::from_fn(
            ImageSize {
                width: 4,
                height: 3,
            },
            |row, col| Pixel::with_alpha((row * 40) as i32, (col * 50) as i32, 7, 9),
        )?;
        let kernel = Kernel::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]])?;
        let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
        apply_transform(
            &src,
            &mut dst,
            &TransformMode::SpatialKernel(kernel),
            SplitPercentage::FULL,
        )?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn out_of_bounds_neighbors_are_skipped() -> Result<(), TransformError> {
        let src = Image::from_size_val([3, 3].into(), Pixel::new(100, 100, 100))?;
        let ones = Kernel::from_rows(&[[0.25; 3]; 3])?;

        // corner has 4 in-bounds neighbors, edge 6, center 9
        assert_eq!(ones.apply_at(&src, 0, 0).rgb(), [100, 100, 100]);
        assert_eq!(ones.apply_at(&src, 0, 1).rgb(), [150, 150, 150]);
        assert_eq!(ones.apply_at(&src, 1, 1).rgb(), [225, 225, 225]);
        Ok(())
    }

    #[test]
    fn split_copies_right_columns() -> Result<(), TransformError> {
        let src = Image::from_size_val([4, 2].into(), Pixel::with_alpha(10, 20, 30, 5))?;
        let invert = ColorMatrix([[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]]);
        let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
        apply_transform(
            &src,
            &mut dst,
            &TransformMode::ColorMatrix(invert),
            SplitPercentage::from_fraction(0.5),
        )?;
        for row in dst.rows_iter() {
            assert_eq!(row[0].to_rgba(), [0, 0, 0, 5]);
            assert_eq!(row[1].to_rgba(), [0, 0, 0, 5]);
            assert_eq!(row[2], Pixel::with_alpha(10, 20, 30, 5));
            assert_eq!(row[3], Pixel::with_alpha(10, 20, 30, 5));
        }
        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), TransformError> {
        let src = Image::from_size_val([4, 2].into(), Pixel::default())?;
        let mut dst = Image::from_size_val([2, 4].into(), Pixel::default())?;
        let res = apply_transform(
            &src,
            &mut dst,
            &TransformMode::ColorMatrix(ColorMatrix([[1.0; 3]; 3])),
            SplitPercentage::FULL,
        );
        assert_eq!(res, Err(TransformError::InvalidImageSize(4, 2, 2, 4)));
        Ok(())
    }
}
