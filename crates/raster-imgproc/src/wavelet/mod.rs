//! Lossy image compression with a 2D Haar wavelet.
//!
//! The pipeline pads the image to a power-of-two square, runs a number of forward Haar
//! cycles on each color channel, zeroes the small coefficients, runs the inverse cycles and
//! crops the result back to the source size.

mod compress;
mod haar;
mod threshold;

pub use compress::{compress, cycle_count, max_cycles, padded_size};
pub use haar::{haar_forward, haar_inverse};
pub use threshold::{apply_threshold, compute_threshold};
