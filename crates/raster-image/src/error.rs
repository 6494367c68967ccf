/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the image has no rows or no columns.
    #[error("Image must have at least one row and one column")]
    EmptyImage,

    /// Error when a row does not have the same length as the first row.
    #[error("Row {row} has {found} pixels but the image is {expected} pixels wide")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// Error when the pixel data does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when a pixel index is outside the image.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),
}
