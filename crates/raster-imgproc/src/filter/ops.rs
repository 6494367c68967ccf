use raster_image::Image;

use super::kernels;
use crate::{
    error::TransformError,
    kernel::{apply_transform, Kernel, TransformMode},
    split::SplitPercentage,
};

/// Convolve an image with an arbitrary odd-sized kernel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `kernel` - The kernel to convolve with.
/// * `split` - The part of the image to filter.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn filter2d(
    src: &Image,
    dst: &mut Image,
    kernel: &Kernel,
    split: SplitPercentage,
) -> Result<(), TransformError> {
    apply_transform(src, dst, &TransformMode::SpatialKernel(kernel.clone()), split)
}

/// Blur an image with the 3×3 averaging kernel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `split` - The part of the image to blur.
///
/// PRECONDITION: `src` and `dst` must have the same size.
///
/// # Example
///
/// ```
/// use raster_image::{Image, Pixel};
/// use raster_imgproc::{filter::blur, split::SplitPercentage};
///
/// let image = Image::from_size_val([4, 4].into(), Pixel::new(80, 80, 80)).unwrap();
/// let mut blurred = image.clone();
/// blur(&image, &mut blurred, SplitPercentage::FULL).unwrap();
///
/// // the interior keeps its value, the corner loses the weight of missing neighbors
/// assert_eq!(blurred[[1, 1]].rgb(), [80, 80, 80]);
/// assert_eq!(blurred[[0, 0]].rgb(), [45, 45, 45]);
/// ```
pub fn blur(src: &Image, dst: &mut Image, split: SplitPercentage) -> Result<(), TransformError> {
    let kernel = kernels::blur_kernel()?;
    apply_transform(src, dst, &TransformMode::SpatialKernel(kernel), split)
}

/// Sharpen an image with the 5×5 sharpen kernel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `split` - The part of the image to sharpen.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn sharpen(src: &Image, dst: &mut Image, split: SplitPercentage) -> Result<(), TransformError> {
    let kernel = kernels::sharpen_kernel()?;
    apply_transform(src, dst, &TransformMode::SpatialKernel(kernel), split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_image::{ImageSize, Pixel};

    #[test]
    fn blur_uniform_interior_is_stable() -> Result<(), TransformError> {
        let src = Image::from_size_val(
            ImageSize {
                width: 5,
                height: 5,
            },
            Pixel::new(160, 32, 64),
        )?;
        let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
        blur(&src, &mut dst, SplitPercentage::FULL)?;

        assert_eq!(dst[[2, 2]].rgb(), [160, 32, 64]);
        // corner keeps 0.25 + 2 * 0.125 + 0.0625 of the weight
        assert_eq!(dst[[0, 0]].rgb(), [90, 18, 36]);
        Ok(())
    }

    #[test]
    fn sharpen_uniform_interior_is_stable() -> Result<(), TransformError> {
        let src = Image::from_size_val([7, 7].into(), Pixel::new(96, 96, 96))?;
        let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
        sharpen(&src, &mut dst, SplitPercentage::FULL)?;

        assert_eq!(dst[[3, 3]].rgb(), [96, 96, 96]);
        // corner sees center, 3 inner and 5 outer neighbors
        assert_eq!(dst[[0, 0]].rgb(), [108, 108, 108]);
        Ok(())
    }

    #[test]
    fn sharpen_boosts_an_isolated_point() -> Result<(), TransformError> {
        let mut src = Image::from_size_val([5, 5].into(), Pixel::new(0, 0, 0))?;
        src.set([2, 2], Pixel::new(100, 100, 100))?;
        let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
        sharpen(&src, &mut dst, SplitPercentage::FULL)?;

        assert_eq!(dst[[2, 2]].rgb(), [100, 100, 100]);
        assert_eq!(dst[[1, 1]].rgb(), [25, 25, 25]);
        assert_eq!(dst[[0, 0]].rgb(), [0, 0, 0]);
        Ok(())
    }

    #[test]
    fn filter2d_matches_blur() -> Result<(), TransformError> {
        let src = Image::from_fn([5, 4].into(), |row, col| {
            Pixel::new((row * 40) as i32, (col * 30) as i32, 120)
        })?;
        let mut expected = Image::from_size_val(src.size(), Pixel::default())?;
        blur(&src, &mut expected, SplitPercentage::FULL)?;

        let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
        filter2d(&src, &mut dst, &kernels::blur_kernel()?, SplitPercentage::FULL)?;
        assert_eq!(dst, expected);
        Ok(())
    }

    #[test]
    fn blur_honors_split() -> Result<(), TransformError> {
        let src = Image::from_fn([6, 3].into(), |row, col| {
            Pixel::new((row * 60 + col * 20) as i32, 10, 200)
        })?;
        let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
        let split = SplitPercentage::from_percent(50.0);
        blur(&src, &mut dst, split)?;

        let mut full = Image::from_size_val(src.size(), Pixel::default())?;
        blur(&src, &mut full, SplitPercentage::FULL)?;

        for row in 0..src.rows() {
            for col in 0..src.cols() {
                let expected = if col < 3 { full[[row, col]] } else { src[[row, col]] };
                assert_eq!(dst[[row, col]], expected);
            }
        }
        Ok(())
    }
}
