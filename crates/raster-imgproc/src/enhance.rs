use raster_image::Image;

use crate::{
    error::{ensure_same_size, TransformError},
    parallel,
};

/// Adjust the brightness of an image.
///
/// dst(x,y,c) = clamp(src(x,y,c) + delta)
///
/// Applies to red, green and blue. Alpha is kept.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image to store the result.
/// * `delta` - The signed offset to add to each channel.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use raster_image::{Image, Pixel};
/// use raster_imgproc::enhance::brighten;
///
/// let image = Image::from_size_val([2, 2].into(), Pixel::new(10, 128, 250)).unwrap();
/// let mut bright = image.clone();
///
/// brighten(&image, &mut bright, 10).unwrap();
/// assert_eq!(bright[[1, 1]].rgb(), [20, 138, 255]);
/// ```
pub fn brighten(src: &Image, dst: &mut Image, delta: i32) -> Result<(), TransformError> {
    ensure_same_size(src, dst)?;

    parallel::par_map_pixels(src, dst, |_, _, pixel| pixel.offset(delta, delta, delta));

    Ok(())
}
