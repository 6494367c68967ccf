use raster_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the transformation engine.
///
/// Validation errors are always reported before any output pixel is written.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A parameter is out of range or has the wrong shape for the transformation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two images that must share a size do not.
    #[error("Image size ({0}, {1}) does not match ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// No transformation is registered under the given name.
    #[error("Transformation not found: {0}")]
    UnknownTransform(String),

    /// A referenced source image is not in the store.
    #[error("Source image not found: {0}")]
    MissingSource(String),

    /// A source image could not be built or is not a valid grid.
    #[error("Malformed source image. {0}")]
    MalformedSource(#[from] ImageError),

    /// The worker pool for the requested execution strategy could not be set up.
    #[error("Parallel execution failed. {0}")]
    Parallel(#[from] ParallelError),
}

impl TransformError {
    /// Whether this error reports a bad caller-supplied parameter, including mismatched
    /// image sizes.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            TransformError::InvalidParameter(_) | TransformError::InvalidImageSize(..)
        )
    }
}

/// Return an error unless both images share the same size.
pub(crate) fn ensure_same_size(
    src: &raster_image::Image,
    dst: &raster_image::Image,
) -> Result<(), TransformError> {
    if src.size() != dst.size() {
        return Err(TransformError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }
    Ok(())
}
