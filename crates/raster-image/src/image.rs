use std::ops;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;
use crate::pixel::Pixel;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use raster_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A rectangular, row-major grid of [`Pixel`]s.
///
/// Row 0 is the top of the image. Pixels are addressed as `[row, col]`. An image always
/// has at least one row and one column, and all rows have the same width since the data
/// is stored as a single contiguous buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    size: ImageSize,
    data: Vec<Pixel>,
}

impl Image {
    /// Create a new image from pixel data in row-major order.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::EmptyImage`] for a zero-sized image and
    /// [`ImageError::InvalidDataLength`] if the data does not cover the image exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use raster_image::{Image, ImageSize, Pixel};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![Pixel::default(); 10 * 20],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<Pixel>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::EmptyImage);
        }

        if data.len() != size.area() {
            return Err(ImageError::InvalidDataLength(data.len(), size.area()));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size filled with `val`.
    pub fn from_size_val(size: ImageSize, val: Pixel) -> Result<Self, ImageError> {
        Image::new(size, vec![val; size.area()])
    }

    /// Create a new image by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(
        size: ImageSize,
        mut f: impl FnMut(usize, usize) -> Pixel,
    ) -> Result<Self, ImageError> {
        let mut data = Vec::with_capacity(size.area());
        for row in 0..size.height {
            for col in 0..size.width {
                data.push(f(row, col));
            }
        }
        Image::new(size, data)
    }

    /// Create an image from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::EmptyImage`] if there are no rows or the first row is empty,
    /// and [`ImageError::RaggedRows`] if any row differs in length from the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use raster_image::{Image, Pixel};
    ///
    /// let p = Pixel::new(1, 2, 3);
    /// let image = Image::from_rows(vec![vec![p, p], vec![p, p]]).unwrap();
    /// assert_eq!(image.rows(), 2);
    ///
    /// assert!(Image::from_rows(vec![vec![p, p], vec![p]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, ImageError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(ImageError::EmptyImage);
        }

        let height = rows.len();
        let mut data = Vec::with_capacity(width * height);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ImageError::RaggedRows {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            data.extend(row);
        }

        Image::new(ImageSize { width, height }, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the pixel at `[row, col]`, or `None` when outside the image.
    pub fn get(&self, index: [usize; 2]) -> Option<&Pixel> {
        let [row, col] = index;
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.data.get(row * self.cols() + col)
    }

    /// Set the pixel at `[row, col]`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] when the index is outside the image.
    pub fn set(&mut self, index: [usize; 2], pixel: Pixel) -> Result<(), ImageError> {
        let [row, col] = index;
        if row >= self.rows() || col >= self.cols() {
            return Err(ImageError::PixelIndexOutOfBounds(
                col,
                row,
                self.width(),
                self.height(),
            ));
        }
        let cols = self.cols();
        self.data[row * cols + col] = pixel;
        Ok(())
    }

    /// Get the pixels of a single row.
    pub fn row(&self, row: usize) -> Option<&[Pixel]> {
        if row >= self.rows() {
            return None;
        }
        let start = row * self.cols();
        Some(&self.data[start..start + self.cols()])
    }

    /// Iterate over the rows of the image, top to bottom.
    pub fn rows_iter(&self) -> std::slice::ChunksExact<'_, Pixel> {
        self.data.chunks_exact(self.cols())
    }

    /// The pixel data in row-major order.
    pub fn as_slice(&self) -> &[Pixel] {
        &self.data
    }

    /// The mutable pixel data in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Consume the image and return its row-major pixel data.
    pub fn into_vec(self) -> Vec<Pixel> {
        self.data
    }

    /// Copy the image into a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.rows_iter().map(<[Pixel]>::to_vec).collect()
    }
}

/// Index the image by `[row, col]`.
///
/// # Panics
///
/// Panics when the index is outside the image.
impl ops::Index<[usize; 2]> for Image {
    type Output = Pixel;

    fn index(&self, index: [usize; 2]) -> &Self::Output {
        let [row, col] = index;
        assert!(
            row < self.rows() && col < self.cols(),
            "pixel index [{row}, {col}] out of bounds for {}",
            self.size
        );
        &self.data[row * self.cols() + col]
    }
}

impl ops::IndexMut<[usize; 2]> for Image {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut Self::Output {
        let [row, col] = index;
        assert!(
            row < self.rows() && col < self.cols(),
            "pixel index [{row}, {col}] out of bounds for {}",
            self.size
        );
        let cols = self.cols();
        &mut self.data[row * cols + col]
    }
}
