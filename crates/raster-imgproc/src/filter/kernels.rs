use crate::{error::TransformError, kernel::Kernel};

/// Coefficients of the 3×3 blur kernel.
pub const BLUR_3X3: [[f64; 3]; 3] = [
    [0.0625, 0.125, 0.0625],
    [0.125, 0.25, 0.125],
    [0.0625, 0.125, 0.0625],
];

/// Coefficients of the 5×5 sharpen kernel: a negative outer ring, a positive inner ring and
/// a unit center.
pub const SHARPEN_5X5: [[f64; 5]; 5] = [
    [-0.125, -0.125, -0.125, -0.125, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, 0.25, 1.0, 0.25, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, -0.125, -0.125, -0.125, -0.125],
];

/// Create the blur kernel.
///
/// # Returns
///
/// A 3×3 kernel whose weights sum to one.
pub fn blur_kernel() -> Result<Kernel, TransformError> {
    Kernel::from_rows(&BLUR_3X3)
}

/// Create the sharpen kernel.
///
/// # Returns
///
/// A 5×5 kernel whose weights sum to one.
pub fn sharpen_kernel() -> Result<Kernel, TransformError> {
    Kernel::from_rows(&SHARPEN_5X5)
}
