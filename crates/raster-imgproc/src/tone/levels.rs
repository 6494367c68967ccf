use serde::{Deserialize, Serialize};

use raster_image::{clamp, Image, Pixel, MAX_CHANNEL_VALUE};

use crate::{
    error::{ensure_same_size, TransformError},
    parallel,
    split::SplitPercentage,
};

/// Output value the mid point is mapped to.
const MID_TARGET: i64 = 128;

/// Output value the white point is mapped to.
const WHITE_TARGET: i64 = MAX_CHANNEL_VALUE as i64;

/// How the black, mid and white points of a levels adjustment must be ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelsOrdering {
    /// `black < mid < white`.
    #[default]
    Strict,
    /// `black <= mid <= white`.
    ///
    /// Equal points still give a degenerate curve, which is rejected when fitting.
    NonStrict,
}

impl LevelsOrdering {
    fn is_ordered(&self, black: i32, mid: i32, white: i32) -> bool {
        match self {
            LevelsOrdering::Strict => black < mid && mid < white,
            LevelsOrdering::NonStrict => black <= mid && mid <= white,
        }
    }
}

/// The quadratic tone curve `y = a·x² + b·x + c` through `(black, 0)`, `(mid, 128)` and
/// `(white, 255)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelsCurve {
    a: f64,
    b: f64,
    c: f64,
}

impl LevelsCurve {
    /// Fit the curve through the three control points.
    ///
    /// The coefficients come from the closed-form determinants of the 3×3 system.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidParameter`] if a point is outside `[0, 255]`, the
    /// points are not ordered under `ordering`, or two points coincide.
    ///
    /// # Example
    ///
    /// ```
    /// use raster_imgproc::tone::{LevelsCurve, LevelsOrdering};
    ///
    /// let curve = LevelsCurve::fit(20, 100, 255, LevelsOrdering::Strict).unwrap();
    /// assert_eq!(curve.eval(20), 0);
    /// assert_eq!(curve.eval(100), 128);
    /// assert_eq!(curve.eval(255), 255);
    ///
    /// assert!(LevelsCurve::fit(100, 20, 255, LevelsOrdering::Strict).is_err());
    /// ```
    pub fn fit(
        black: i32,
        mid: i32,
        white: i32,
        ordering: LevelsOrdering,
    ) -> Result<Self, TransformError> {
        for (name, value) in [("black", black), ("mid", mid), ("white", white)] {
            if !(0..=MAX_CHANNEL_VALUE).contains(&value) {
                return Err(TransformError::InvalidParameter(format!(
                    "{name} point {value} is outside [0, {MAX_CHANNEL_VALUE}]"
                )));
            }
        }

        if !ordering.is_ordered(black, mid, white) {
            return Err(TransformError::InvalidParameter(format!(
                "levels points ({black}, {mid}, {white}) are not ordered ({ordering:?})"
            )));
        }

        let (b, m, w) = (black as i64, mid as i64, white as i64);
        let (t1, t2) = (MID_TARGET, WHITE_TARGET);

        let det = b * b * (m - w) - b * (m * m - w * w) + w * m * m - m * w * w;
        if det == 0 {
            return Err(TransformError::InvalidParameter(format!(
                "levels points ({black}, {mid}, {white}) do not define a curve"
            )));
        }

        let det_a = -b * (t1 - t2) + t1 * w - t2 * m;
        let det_b = b * b * (t1 - t2) + t2 * m * m - t1 * w * w;
        let det_c = b * b * (t2 * m - t1 * w) - b * (t2 * m * m - t1 * w * w);

        let det = det as f64;
        let curve = Self {
            a: det_a as f64 / det,
            b: det_b as f64 / det,
            c: det_c as f64 / det,
        };
        log::debug!("levels curve for ({black}, {mid}, {white}): {curve:?}");

        Ok(curve)
    }

    /// The coefficients `(a, b, c)`.
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Evaluate the curve at `x`, rounding half up and clamping into `[0, 255]`.
    pub fn eval(&self, x: u8) -> u8 {
        let x = x as f64;
        let y = self.a * x * x + self.b * x + self.c;
        clamp((y + 0.5).floor() as i32)
    }

    /// Tabulate the curve for every 8-bit input.
    pub fn lut(&self) -> [u8; 256] {
        std::array::from_fn(|x| self.eval(x as u8))
    }
}

/// Adjust the levels of an image through a [`LevelsCurve`].
///
/// Red, green and blue are mapped through the curve. Alpha is kept.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `curve` - The tone curve.
/// * `split` - The part of the image to adjust.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn levels_adjust(
    src: &Image,
    dst: &mut Image,
    curve: &LevelsCurve,
    split: SplitPercentage,
) -> Result<(), TransformError> {
    ensure_same_size(src, dst)?;

    let lut = curve.lut();
    let width = src.width();
    parallel::par_map_pixels(src, dst, |_, col, pixel| {
        if split.applies_to(col, width) {
            let [r, g, b] = pixel.rgb().map(|v| lut[v as usize]);
            Pixel::rgba(r, g, b, pixel.alpha())
        } else {
            *pixel
        }
    });

    Ok(())
}
