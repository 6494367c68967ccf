#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image`] and [`functional::write_image`].
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{read_image, write_image, FileFormat};
