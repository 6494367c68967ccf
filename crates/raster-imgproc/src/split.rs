use serde::{Deserialize, Serialize};

/// The fraction of the image width, from the left, over which a transformation applies.
///
/// A value of `0` means the whole image. Columns at or past the boundary are copied from
/// the source unchanged.
///
/// # Examples
///
/// ```
/// use raster_imgproc::split::SplitPercentage;
///
/// let split = SplitPercentage::from_percent(50.0);
/// assert!(split.applies_to(4, 10));
/// assert!(!split.applies_to(5, 10));
///
/// // out of range falls back to the whole image
/// assert!(SplitPercentage::from_percent(150.0).is_full());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitPercentage(f64);

impl SplitPercentage {
    /// Apply to the whole image.
    pub const FULL: SplitPercentage = SplitPercentage(0.0);

    /// Create a split from a percentage in (0, 100).
    ///
    /// Any other value, including NaN, logs a warning and yields [`SplitPercentage::FULL`].
    pub fn from_percent(percent: f64) -> Self {
        if percent > 0.0 && percent < 100.0 {
            SplitPercentage(percent / 100.0)
        } else {
            log::warn!("split percentage {percent} is outside (0, 100), using the whole image");
            Self::FULL
        }
    }

    /// Create a split from a fraction in (0, 1).
    ///
    /// `0` selects the whole image. Any other value outside the range logs a warning and
    /// also yields [`SplitPercentage::FULL`].
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction > 0.0 && fraction < 1.0 {
            SplitPercentage(fraction)
        } else {
            if fraction != 0.0 {
                log::warn!("split fraction {fraction} is outside (0, 1), using the whole image");
            }
            Self::FULL
        }
    }

    /// The stored fraction; `0` for the whole image.
    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// Whether the transformation covers the whole image.
    pub fn is_full(&self) -> bool {
        self.0 == 0.0
    }

    /// Whether column `col` of an image `width` pixels wide receives the transformed value.
    #[inline]
    pub fn applies_to(&self, col: usize, width: usize) -> bool {
        self.is_full() || (col as f64) < width as f64 * self.0
    }

    /// Number of leading columns of an image `width` pixels wide that are transformed.
    pub fn boundary(&self, width: usize) -> usize {
        (0..width)
            .position(|col| !self.applies_to(col, width))
            .unwrap_or(width)
    }
}

#[cfg(test)]
mod tests {
    use super::SplitPercentage;

    #[test]
    fn percent_is_stored_as_fraction() {
        let split = SplitPercentage::from_percent(25.0);
        assert_eq!(split.fraction(), 0.25);
        assert!(!split.is_full());
    }

    #[test]
    fn invalid_values_mean_full_image() {
        for p in [0.0, 100.0, -3.0, 250.0, f64::NAN] {
            assert!(SplitPercentage::from_percent(p).is_full(), "{p}");
        }
        for f in [0.0, 1.0, -0.5, 7.0, f64::NAN] {
            assert!(SplitPercentage::from_fraction(f).is_full(), "{f}");
        }
    }

    #[test]
    fn boundary_is_first_column_at_or_past_product() {
        let split = SplitPercentage::from_fraction(0.5);
        assert_eq!(split.boundary(10), 5);
        assert_eq!(split.boundary(7), 4);

        let split = SplitPercentage::from_fraction(0.3);
        assert_eq!(split.boundary(1), 1);
        assert_eq!(split.boundary(20), 6);

        assert_eq!(SplitPercentage::FULL.boundary(13), 13);
    }
}
