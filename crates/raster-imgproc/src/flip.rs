use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use raster_image::Image;

/// Flip the input image horizontally.
///
/// # Arguments
///
/// * `src` - The input image.
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use raster_image::{Image, Pixel};
/// use raster_imgproc::flip::horizontal_flip;
///
/// let image = Image::from_rows(vec![
///     vec![Pixel::new(1, 1, 1), Pixel::new(2, 2, 2)],
/// ])
/// .unwrap();
///
/// let flipped = horizontal_flip(&image);
/// assert_eq!(flipped[[0, 0]], Pixel::new(2, 2, 2));
/// ```
pub fn horizontal_flip(src: &Image) -> Image {
    let mut dst = src.clone();

    dst.as_slice_mut()
        .par_chunks_exact_mut(src.cols())
        .for_each(|row| row.reverse());

    dst
}

/// Flip the input image vertically.
///
/// # Arguments
///
/// * `src` - The input image.
///
/// # Returns
///
/// The flipped image.
pub fn vertical_flip(src: &Image) -> Image {
    let mut dst = src.clone();

    dst.as_slice_mut()
        .par_chunks_exact_mut(src.cols())
        .zip(src.as_slice().par_chunks_exact(src.cols()).rev())
        .for_each(|(dst_row, src_row)| dst_row.copy_from_slice(src_row));

    dst
}
