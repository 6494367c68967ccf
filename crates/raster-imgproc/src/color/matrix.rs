use raster_image::Image;

use crate::{
    error::TransformError,
    kernel::{apply_transform, ColorMatrix, TransformMode},
    split::SplitPercentage,
};

/// Define the RGB weights for the luma conversion.
const RW: f64 = 0.2126;
const GW: f64 = 0.7152;
const BW: f64 = 0.0722;

/// Replicates the luma of a pixel on all three channels.
pub const GREYSCALE_MATRIX: ColorMatrix = ColorMatrix([[RW, GW, BW], [RW, GW, BW], [RW, GW, BW]]);

/// Maps a pixel to its sepia tone.
pub const SEPIA_MATRIX: ColorMatrix = ColorMatrix([
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
]);

/// Convert an RGB image to greyscale using the formula:
///
/// Y = 0.2126 * R + 0.7152 * G + 0.0722 * B
///
/// Each term is truncated before summing. Alpha is kept.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `split` - The part of the image to convert.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use raster_image::{Image, Pixel};
/// use raster_imgproc::{color::greyscale, split::SplitPercentage};
///
/// let image = Image::from_size_val([4, 5].into(), Pixel::new(100, 100, 100)).unwrap();
/// let mut grey = Image::from_size_val(image.size(), Pixel::default()).unwrap();
///
/// greyscale(&image, &mut grey, SplitPercentage::FULL).unwrap();
/// assert_eq!(grey[[0, 0]].rgb(), [99, 99, 99]);
/// ```
pub fn greyscale(src: &Image, dst: &mut Image, split: SplitPercentage) -> Result<(), TransformError> {
    apply_transform(src, dst, &TransformMode::ColorMatrix(GREYSCALE_MATRIX), split)
}

/// Apply a sepia tone to an image.
///
/// Precondition: the input and output images must have the same size.
pub fn sepia(src: &Image, dst: &mut Image, split: SplitPercentage) -> Result<(), TransformError> {
    apply_transform(src, dst, &TransformMode::ColorMatrix(SEPIA_MATRIX), split)
}

/// Extract the luma component of the whole image.
///
/// Same weights as [`greyscale`], without a split.
pub fn luma_component(src: &Image, dst: &mut Image) -> Result<(), TransformError> {
    greyscale(src, dst, SplitPercentage::FULL)
}
