//! Filter operations
//!
//! This module provides neighborhood filters built on the spatial kernel engine.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
