use raster_image::{Image, Pixel};

use crate::{
    error::{ensure_same_size, TransformError},
    parallel,
};

fn map_component(
    src: &Image,
    dst: &mut Image,
    f: impl Fn(&Pixel) -> Pixel + Send + Sync,
) -> Result<(), TransformError> {
    ensure_same_size(src, dst)?;
    parallel::par_map_pixels(src, dst, |_, _, pixel| f(pixel));
    Ok(())
}

/// Keep the red channel and zero green and blue.
///
/// Precondition: the input and output images must have the same size.
pub fn red_component(src: &Image, dst: &mut Image) -> Result<(), TransformError> {
    map_component(src, dst, |p| Pixel::rgba(p.red(), 0, 0, p.alpha()))
}

/// Keep the green channel and zero red and blue.
///
/// Precondition: the input and output images must have the same size.
pub fn green_component(src: &Image, dst: &mut Image) -> Result<(), TransformError> {
    map_component(src, dst, |p| Pixel::rgba(0, p.green(), 0, p.alpha()))
}

/// Keep the blue channel and zero red and green.
///
/// Precondition: the input and output images must have the same size.
pub fn blue_component(src: &Image, dst: &mut Image) -> Result<(), TransformError> {
    map_component(src, dst, |p| Pixel::rgba(0, 0, p.blue(), p.alpha()))
}

/// Replace each pixel by the maximum of its three channels.
///
/// # Example
///
/// ```
/// use raster_image::{Image, Pixel};
/// use raster_imgproc::color::value_component;
///
/// let image = Image::from_size_val([2, 1].into(), Pixel::new(10, 200, 30)).unwrap();
/// let mut value = image.clone();
///
/// value_component(&image, &mut value).unwrap();
/// assert_eq!(value[[0, 1]].rgb(), [200, 200, 200]);
/// ```
pub fn value_component(src: &Image, dst: &mut Image) -> Result<(), TransformError> {
    map_component(src, dst, |p| {
        let v = p.red().max(p.green()).max(p.blue());
        Pixel::rgba(v, v, v, p.alpha())
    })
}

/// Replace each pixel by the truncated mean of its three channels.
pub fn intensity_component(src: &Image, dst: &mut Image) -> Result<(), TransformError> {
    map_component(src, dst, |p| {
        let sum: i32 = p.rgb().iter().map(|&c| c as i32).sum();
        Pixel::gray(sum / 3, p.alpha())
    })
}

/// Split an image into its red, green and blue component images.
///
/// # Returns
///
/// The three component images in the order red, green, blue.
pub fn rgb_split(src: &Image) -> Result<[Image; 3], TransformError> {
    let mut red = Image::from_size_val(src.size(), Pixel::default())?;
    let mut green = red.clone();
    let mut blue = red.clone();

    red_component(src, &mut red)?;
    green_component(src, &mut green)?;
    blue_component(src, &mut blue)?;

    Ok([red, green, blue])
}

/// Combine three images into one, taking red from `red`, green from `green` and blue from
/// `blue`. Alpha comes from `red`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidImageSize`] if the images do not all have the same size.
pub fn rgb_combine(
    red: &Image,
    green: &Image,
    blue: &Image,
    dst: &mut Image,
) -> Result<(), TransformError> {
    ensure_same_size(red, green)?;
    ensure_same_size(red, blue)?;
    ensure_same_size(red, dst)?;

    parallel::par_iter_rows_three(red, green, blue, dst, |r, g, b| {
        Pixel::rgba(r.red(), g.green(), b.blue(), r.alpha())
    });

    Ok(())
}
