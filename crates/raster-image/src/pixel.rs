use serde::{Deserialize, Serialize};

/// Largest value a color channel can hold.
pub const MAX_CHANNEL_VALUE: i32 = 255;

/// Clamp an integer channel value into the range [0, 255].
///
/// # Examples
///
/// ```
/// use raster_image::clamp;
///
/// assert_eq!(clamp(-12), 0);
/// assert_eq!(clamp(128), 128);
/// assert_eq!(clamp(300), 255);
/// ```
#[inline]
pub fn clamp(value: i32) -> u8 {
    value.clamp(0, MAX_CHANNEL_VALUE) as u8
}

/// A 4-channel RGBA color sample with 8 bits per channel.
///
/// Pixels are value objects. Every constructor taking integers clamps each channel into
/// [0, 255], so a `Pixel` never holds an out-of-range value. The alpha channel defaults to
/// 255 (opaque).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
}

impl Default for Pixel {
    /// Opaque black.
    fn default() -> Self {
        Pixel::rgba(0, 0, 0, u8::MAX)
    }
}

impl Pixel {
    /// Create an opaque pixel, clamping each channel into [0, 255].
    ///
    /// # Examples
    ///
    /// ```
    /// use raster_image::Pixel;
    ///
    /// let p = Pixel::new(300, 20, -5);
    /// assert_eq!(p.to_rgba(), [255, 20, 0, 255]);
    /// ```
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        Self::with_alpha(red, green, blue, MAX_CHANNEL_VALUE)
    }

    /// Create a pixel with an explicit alpha, clamping every channel into [0, 255].
    pub fn with_alpha(red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        Self {
            red: clamp(red),
            green: clamp(green),
            blue: clamp(blue),
            alpha: clamp(alpha),
        }
    }

    /// Create a pixel from raw 8-bit channels.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create a gray pixel with the same value on the three color channels.
    pub fn gray(value: i32, alpha: u8) -> Self {
        let v = clamp(value);
        Self::rgba(v, v, v, alpha)
    }

    /// The red channel.
    #[inline]
    pub fn red(&self) -> u8 {
        self.red
    }

    /// The green channel.
    #[inline]
    pub fn green(&self) -> u8 {
        self.green
    }

    /// The blue channel.
    #[inline]
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// The alpha channel.
    #[inline]
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// The color channels as `[red, green, blue]`.
    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// All four channels as `[red, green, blue, alpha]`.
    #[inline]
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Add a signed offset to each color channel with saturation. Alpha is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use raster_image::Pixel;
    ///
    /// let p = Pixel::new(250, 10, 100).offset(10, -20, 5);
    /// assert_eq!(p.rgb(), [255, 0, 105]);
    /// ```
    pub fn offset(&self, red: i32, green: i32, blue: i32) -> Self {
        Self {
            red: clamp((self.red as i32).saturating_add(red)),
            green: clamp((self.green as i32).saturating_add(green)),
            blue: clamp((self.blue as i32).saturating_add(blue)),
            alpha: self.alpha,
        }
    }

    /// Map each color channel through `f`, clamping the result. Alpha is kept.
    pub fn map_rgb(&self, f: impl Fn(u8) -> i32) -> Self {
        Self {
            red: clamp(f(self.red)),
            green: clamp(f(self.green)),
            blue: clamp(f(self.blue)),
            alpha: self.alpha,
        }
    }
}

impl std::fmt::Display for Pixel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} {}", self.red, self.green, self.blue)
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(rgba: [u8; 4]) -> Self {
        Pixel::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(rgb: [u8; 3]) -> Self {
        Pixel::rgba(rgb[0], rgb[1], rgb[2], u8::MAX)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(pixel: Pixel) -> Self {
        pixel.to_rgba()
    }
}
