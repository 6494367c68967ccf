use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use raster_image::{Image, ImageSize, Pixel};

use crate::error::IoError;

/// The container formats the engine reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    /// Lossless, keeps alpha.
    Png,
    /// Lossy, no alpha.
    Jpeg,
    /// Binary portable pixmap, no alpha.
    Ppm,
}

impl FileFormat {
    /// Detect the format from the extension of `file_path`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidFileExtension`] for anything other than `png`, `jpg`,
    /// `jpeg` or `ppm`.
    pub fn from_path(file_path: &Path) -> Result<Self, IoError> {
        let ext = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("png") => Ok(FileFormat::Png),
            Some("jpg" | "jpeg") => Ok(FileFormat::Jpeg),
            Some("ppm") => Ok(FileFormat::Ppm),
            _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
        }
    }

    /// Whether the format stores an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, FileFormat::Png)
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            FileFormat::Png => ImageFormat::Png,
            FileFormat::Jpeg => ImageFormat::Jpeg,
            FileFormat::Ppm => ImageFormat::Pnm,
        }
    }
}

/// Reads an image from the given file path.
///
/// The format is picked from the file extension. Formats without alpha are read back
/// opaque.
///
/// # Arguments
///
/// * `file_path` - The path to a png, jpg, jpeg or ppm file.
///
/// # Returns
///
/// An image containing the decoded pixels.
pub fn read_image(file_path: impl AsRef<Path>) -> Result<Image, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists and has a known extension
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }
    let format = FileFormat::from_path(file_path)?;

    let reader = image::ImageReader::open(file_path)?.with_guessed_format()?;
    let decoded = reader.decode()?.to_rgba8();
    log::debug!(
        "decoded {} as {format:?}, {}x{}",
        file_path.display(),
        decoded.width(),
        decoded.height()
    );

    let size = ImageSize {
        width: decoded.width() as usize,
        height: decoded.height() as usize,
    };
    let data = decoded.pixels().map(|p| Pixel::from(p.0)).collect();

    Ok(Image::new(size, data)?)
}

/// Writes an image to the given file path.
///
/// The format is picked from the file extension. Alpha is dropped for formats that
/// cannot store it.
///
/// # Arguments
///
/// * `file_path` - The path to a png, jpg, jpeg or ppm file.
/// * `image` - The image to write.
pub fn write_image(file_path: impl AsRef<Path>, image: &Image) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let format = FileFormat::from_path(file_path)?;

    let buffer = RgbaImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        Rgba(image[[y as usize, x as usize]].to_rgba())
    });

    if format.has_alpha() {
        buffer.save_with_format(file_path, format.image_format())?;
    } else {
        image::DynamicImage::ImageRgba8(buffer)
            .to_rgb8()
            .save_with_format(file_path, format.image_format())?;
    }

    Ok(())
}
