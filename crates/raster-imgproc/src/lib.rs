#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// engine configuration module.
pub mod config;

/// error-diffusion dithering module.
pub mod dither;

/// utilities to draw on images.
pub mod draw;

/// image enhancement module.
pub mod enhance;

/// error types for the transformation engine.
pub mod error;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// compute image histogram module.
pub mod histogram;

/// color matrix and spatial kernel engine.
pub mod kernel;

/// module containing parallization utilities.
pub mod parallel;

/// named transformation dispatch module.
pub mod registry;

/// split-view column selection.
pub mod split;

/// histogram-driven tone adjustments module.
pub mod tone;

/// wavelet compression module.
pub mod wavelet;

pub use crate::error::TransformError;
