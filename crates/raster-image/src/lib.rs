#![deny(missing_docs)]
//! Pixel and image grid types for the raster transformation engine

/// error types for the image module.
pub mod error;

/// image grid representation.
pub mod image;

/// 8-bit RGBA color sample.
pub mod pixel;

/// named image store passed explicitly between caller and engine.
pub mod store;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::pixel::{clamp, Pixel, MAX_CHANNEL_VALUE};
pub use crate::store::ImageStore;
