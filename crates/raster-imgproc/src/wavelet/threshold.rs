/// Pick the coefficient magnitude below which coefficients are discarded.
///
/// All non-zero magnitudes of all planes are sorted ascending and the one at index
/// `floor(percentage / 100 * count)` is returned. Without any non-zero coefficient the
/// threshold is `0`.
///
/// # Arguments
///
/// * `planes` - The coefficient planes.
/// * `percentage` - The compression percentage in (0, 100).
///
/// # Example
///
/// ```
/// use raster_imgproc::wavelet::compute_threshold;
///
/// let plane = [30, -5, -15, -15, 0];
/// assert_eq!(compute_threshold(&[&plane], 10.0), 5);
/// assert_eq!(compute_threshold(&[&plane], 50.0), 15);
/// ```
pub fn compute_threshold(planes: &[&[i32]], percentage: f64) -> i32 {
    let mut magnitudes = planes
        .iter()
        .flat_map(|plane| plane.iter())
        .map(|c| c.abs())
        .filter(|&c| c != 0)
        .collect::<Vec<_>>();

    if magnitudes.is_empty() {
        log::warn!("no non-zero wavelet coefficients, nothing to threshold");
        return 0;
    }

    magnitudes.sort_unstable();

    let len = magnitudes.len();
    let idx = ((percentage / 100.0 * len as f64).floor() as usize).min(len - 1);
    magnitudes[idx]
}

/// Zero every coefficient whose magnitude is strictly below `threshold`.
pub fn apply_threshold(plane: &mut [i32], threshold: i32) {
    plane
        .iter_mut()
        .filter(|c| c.abs() < threshold)
        .for_each(|c| *c = 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_across_planes() {
        let r = [30, -5, -15, -15];
        let g = [30, -5, -15, -15];
        let b = [30, -5, -15, -15];
        let planes: [&[i32]; 3] = [&r, &g, &b];

        assert_eq!(compute_threshold(&planes, 10.0), 5);
        assert_eq!(compute_threshold(&planes, 30.0), 15);
        assert_eq!(compute_threshold(&planes, 90.0), 30);
        assert_eq!(compute_threshold(&planes, 99.999), 30);
    }

    #[test]
    fn all_zero_gives_zero() {
        let plane = [0; 16];
        assert_eq!(compute_threshold(&[&plane], 50.0), 0);
    }

    #[test]
    fn equal_magnitudes_are_kept() {
        let mut plane = [15, -15, 14, -14, 0, 100];
        apply_threshold(&mut plane, 15);
        assert_eq!(plane, [15, -15, 0, 0, 0, 100]);
    }
}
